//! String-level recognition of Windows path shapes.
//!
//! Everything here is pure: no filesystem access, no platform queries
//! beyond the [`Platform`] value passed in. Paths are treated as strings
//! with `\` separators so that Windows paths can be classified on any host.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::host::Platform;

/// Character that marks a short (8.3) path segment, as in `VERYLO~1`.
pub const SHORT_MARKER: char = '~';

/// Separator used when splitting and joining Windows paths.
pub const SEPARATOR: char = '\\';

static USER_DIRECTORY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z]:\\(?i-u:users)\\[^\\]+").expect("user directory pattern")
});

/// A path under the conventional `X:\Users\<name>` directory, split after
/// the user name segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserDirMatch<'a> {
    /// Everything up to and including the user name, e.g. `C:\Users\VERYLO~1`.
    pub prefix: &'a str,
    /// Everything after the user name, including its leading separator.
    pub remainder: &'a str,
}

/// Whether `path` is a local absolute drive path (`X:\...`).
///
/// # Examples
///
/// ```
/// use normtmp::path::classify::is_drive_absolute;
///
/// assert!(is_drive_absolute(r"C:\Users"));
/// assert!(is_drive_absolute(r"d:\"));
/// assert!(!is_drive_absolute(r"\\server\share"));
/// assert!(!is_drive_absolute("C:/Users"));
/// assert!(!is_drive_absolute("C:"));
/// assert!(!is_drive_absolute(""));
/// ```
#[must_use]
pub fn is_drive_absolute(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'\\'
}

/// Whether `path` contains a short segment marker anywhere.
#[must_use]
pub fn has_short_segment(path: &str) -> bool {
    path.contains(SHORT_MARKER)
}

/// Whether `path` is a candidate for short path expansion on `platform`.
///
/// True only on Windows, for local absolute drive paths that contain at
/// least one short segment marker.
///
/// # Examples
///
/// ```
/// use normtmp::path::classify::is_supported_short_path;
/// use normtmp::Platform;
///
/// assert!(is_supported_short_path(Platform::Windows, r"C:\PROGRA~1"));
/// assert!(!is_supported_short_path(Platform::Windows, r"C:\Program Files"));
/// assert!(!is_supported_short_path(Platform::Linux, r"C:\PROGRA~1"));
/// assert!(!is_supported_short_path(Platform::Windows, r"\\server\PROGRA~1"));
/// ```
#[must_use]
pub fn is_supported_short_path(platform: Platform, path: &str) -> bool {
    platform.is_short_path_prone() && is_drive_absolute(path) && has_short_segment(path)
}

/// Split a path under `X:\Users\<name>` into the user directory and the rest.
///
/// The drive letter and the `Users` segment match case-insensitively.
///
/// # Examples
///
/// ```
/// use normtmp::path::classify::match_user_directory;
///
/// let m = match_user_directory(r"C:\Users\VERYLO~1\AppData\Local\Temp").unwrap();
/// assert_eq!(m.prefix, r"C:\Users\VERYLO~1");
/// assert_eq!(m.remainder, r"\AppData\Local\Temp");
///
/// assert!(match_user_directory(r"D:\VERYLO~1\Temp").is_none());
/// ```
#[must_use]
pub fn match_user_directory(path: &str) -> Option<UserDirMatch<'_>> {
    USER_DIRECTORY.find(path).map(|m| UserDirMatch {
        prefix: m.as_str(),
        remainder: &path[m.end()..],
    })
}

fn is_separator(c: char) -> bool {
    c == '\\' || c == '/'
}

fn drive_len(path: &str) -> usize {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        2
    } else {
        0
    }
}

fn root_len(path: &str) -> usize {
    let drive = drive_len(path);
    match path[drive..].chars().next() {
        Some(c) if is_separator(c) => drive + 1,
        _ => drive,
    }
}

/// Parent directory of a Windows path.
///
/// Both `\` and `/` count as separators, trailing separators are ignored,
/// and the root of a drive is its own parent. Only the final separator is
/// removed, so `D:\a\\b` has the parent `D:\a\`, not `D:\a`.
///
/// # Examples
///
/// ```
/// use normtmp::path::classify::win_dirname;
///
/// assert_eq!(win_dirname(r"D:\VeryLongName\ExtraStuff"), r"D:\VeryLongName");
/// assert_eq!(win_dirname(r"D:\VeryLongName"), r"D:\");
/// assert_eq!(win_dirname(r"D:\"), r"D:\");
/// assert_eq!(win_dirname(r"C:\a\b\"), r"C:\a");
/// ```
#[must_use]
pub fn win_dirname(path: &str) -> &str {
    let (root, rest) = path.split_at(root_len(path));
    let rest = rest.trim_end_matches(is_separator);
    match rest.rfind(is_separator) {
        // Only the last separator goes; a doubled one leaves its twin.
        Some(idx) => &path[..root.len() + idx],
        None if root.is_empty() => ".",
        None => root,
    }
}

/// Last segment of a Windows path.
///
/// # Examples
///
/// ```
/// use normtmp::path::classify::win_basename;
///
/// assert_eq!(win_basename(r"C:\Users\VeryLongName"), "VeryLongName");
/// assert_eq!(win_basename(r"C:\Users\VeryLongName\"), "VeryLongName");
/// assert_eq!(win_basename(r"C:\"), "");
/// ```
#[must_use]
pub fn win_basename(path: &str) -> &str {
    let rest = path[drive_len(path)..].trim_end_matches(is_separator);
    match rest.rfind(is_separator) {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    }
}
