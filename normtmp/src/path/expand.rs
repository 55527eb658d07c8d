//! Expansion of Windows short (8.3) paths to their long form.
//!
//! Two strategies are tried in order:
//!
//! 1. **Home directory substitution.** When the only short segment is the
//!    user name in `X:\Users\<name>`, and that directory is provably the
//!    same object as the (long) home directory, the home directory is
//!    spliced in. No process is spawned.
//! 2. **Per-segment query.** Each short segment is resolved left to right
//!    by asking the OS for the long name of the partial path ending at that
//!    segment. The resolver only expands the *last* segment it is given, so
//!    a path with two short segments costs two queries.
//!
//! Any doubt along the way ends in [`ExpansionResult::Unsupported`]; a
//! partially expanded path is never returned.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ExpansionFailure;
use crate::host::{Host, Platform};
use crate::path::classify::{
    has_short_segment, is_drive_absolute, is_supported_short_path, match_user_directory,
    win_basename, win_dirname, SEPARATOR,
};

static DRIVE_PATH_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z]:\\").expect("drive path pattern"));

/// Text the resolver puts in front of a path it could not find, as in
/// `File not found - C:\badname`.
const ERROR_MARKER: &str = "- ";

/// Outcome of expanding a short path.
///
/// # Examples
///
/// ```
/// use normtmp::ExpansionResult;
///
/// let result = ExpansionResult::Expanded(r"C:\Users\VeryLongName".to_string());
/// assert_eq!(result.as_expanded(), Some(r"C:\Users\VeryLongName"));
/// assert!(!result.is_unsupported());
///
/// assert_eq!(ExpansionResult::Unsupported.into_expanded(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExpansionResult {
    /// The fully expanded path.
    Expanded(String),
    /// The path could not be expanded: wrong platform, unsupported path
    /// shape, or a segment that could not be verified.
    Unsupported,
}

impl ExpansionResult {
    /// The expanded path, if expansion succeeded.
    #[must_use]
    pub fn as_expanded(&self) -> Option<&str> {
        match self {
            Self::Expanded(path) => Some(path),
            Self::Unsupported => None,
        }
    }

    /// Consume the result, returning the expanded path if any.
    #[must_use]
    pub fn into_expanded(self) -> Option<String> {
        match self {
            Self::Expanded(path) => Some(path),
            Self::Unsupported => None,
        }
    }

    /// Whether expansion failed.
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported)
    }
}

/// Find the long path in the resolver's output.
///
/// The resolver does not report failures through its exit status; it prints
/// them inline (`File not found - C:\badname`). The first drive path that
/// is not preceded by the error marker is returned, up to the end of its
/// line. Leading attribute letters are skipped.
///
/// # Examples
///
/// ```
/// use normtmp::path::expand::parse_query_output;
///
/// let output = "A                  C:\\Users\\VeryLongName\r\n";
/// assert_eq!(parse_query_output(output), Some(r"C:\Users\VeryLongName"));
///
/// assert_eq!(parse_query_output("File not found - C:\\badname\r\n"), None);
/// ```
#[must_use]
pub fn parse_query_output(output: &str) -> Option<&str> {
    let output = output.trim();
    let mut from = 0;
    while let Some(found) = DRIVE_PATH_START.find_at(output, from) {
        if !output[..found.start()].ends_with(ERROR_MARKER) {
            let line = &output[found.start()..];
            let end = line
                .find(['\r', '\n', '\u{2028}', '\u{2029}'])
                .unwrap_or(line.len());
            return Some(&line[..end]);
        }
        // The match starts with an ASCII letter, so this stays on a char boundary.
        from = found.start() + 1;
    }
    None
}

/// Expands short (8.3) Windows paths using the capabilities of a [`Host`].
///
/// # Examples
///
/// ```
/// use normtmp::path::ShortPathExpander;
/// use normtmp::{ExpansionResult, SystemHost};
///
/// let host = SystemHost::new();
/// let expander = ShortPathExpander::new(&host);
///
/// // Network paths are never expanded, whatever the platform.
/// assert_eq!(expander.expand(r"\\server\share"), ExpansionResult::Unsupported);
/// ```
#[derive(Debug)]
pub struct ShortPathExpander<'h, H: ?Sized> {
    host: &'h H,
}

impl<'h, H: Host + ?Sized> ShortPathExpander<'h, H> {
    /// Create an expander backed by `host`.
    #[must_use]
    pub fn new(host: &'h H) -> Self {
        Self { host }
    }

    /// Expand every short segment of `short_path`.
    ///
    /// Returns the input unchanged when it is a drive path without short
    /// segments, and [`ExpansionResult::Unsupported`] when not on Windows,
    /// when the input is not a local absolute drive path, or when any
    /// segment cannot be expanded and verified.
    pub fn expand(&self, short_path: &str) -> ExpansionResult {
        match self.try_expand(short_path) {
            Ok(long_path) => ExpansionResult::Expanded(long_path),
            Err(failure) => {
                log::debug!("Cannot expand short path {short_path}: {failure}");
                ExpansionResult::Unsupported
            }
        }
    }

    fn try_expand(&self, short_path: &str) -> Result<String, ExpansionFailure> {
        let platform = self.host.platform();
        if !is_supported_short_path(platform, short_path) {
            return Self::classify_rejection(platform, short_path);
        }

        match self.substitute_home_dir(short_path) {
            Ok(Some(long_path)) => return Ok(long_path),
            Ok(None) => {}
            Err(failure) => log::debug!("Home directory shortcut not taken: {failure}"),
        }

        self.expand_segments(short_path)
    }

    /// Outcome for a path the classifier turned down.
    ///
    /// A drive path with no short segment is already long and comes back
    /// unchanged; everything else says which check failed.
    fn classify_rejection(platform: Platform, path: &str) -> Result<String, ExpansionFailure> {
        if !platform.is_short_path_prone() {
            return Err(ExpansionFailure::UnsupportedPlatform { platform });
        }
        if !is_drive_absolute(path) {
            return Err(ExpansionFailure::UnsupportedPathShape {
                path: path.to_string(),
            });
        }
        Ok(path.to_string())
    }

    /// Replace a short user directory with the home directory.
    ///
    /// `Ok(None)` means the shortcut does not apply; the caller moves on to
    /// the per-segment query either way.
    fn substitute_home_dir(&self, short_path: &str) -> Result<Option<String>, ExpansionFailure> {
        let Some(user_dir) = match_user_directory(short_path) else {
            return Ok(None);
        };
        // Only when the user name is the sole short segment.
        if !has_short_segment(user_dir.prefix) || has_short_segment(user_dir.remainder) {
            return Ok(None);
        }

        let Some(home) = self.host.home_dir() else {
            return Ok(None);
        };
        let Some(home) = home.to_str() else {
            return Ok(None);
        };
        if has_short_segment(home) || !self.host.exists(Path::new(user_dir.prefix)) {
            return Ok(None);
        }

        // Similar names are not enough: both must be the same directory.
        let same_object = match (
            self.host.file_identity(Path::new(user_dir.prefix)),
            self.host.file_identity(Path::new(home)),
        ) {
            (Ok(prefix_id), Ok(home_id)) => prefix_id == home_id,
            (Err(e), _) | (_, Err(e)) => {
                log::debug!("Cannot compare {} with {home}: {e}", user_dir.prefix);
                return Ok(None);
            }
        };
        if !same_object {
            return Err(ExpansionFailure::IdentityMismatch {
                prefix: user_dir.prefix.to_string(),
                home: home.to_string(),
            });
        }

        Ok(Some(format!("{home}{}", user_dir.remainder)))
    }

    fn expand_segments(&self, short_path: &str) -> Result<String, ExpansionFailure> {
        let mut segments: Vec<String> = short_path.split(SEPARATOR).map(str::to_owned).collect();

        for index in 1..segments.len() {
            if !has_short_segment(&segments[index]) {
                continue;
            }

            let partial = segments[..=index].join("\\");
            let long_name = self.query_segment(&partial)?;
            segments[index] = long_name;
        }

        let long_path = segments.join("\\");
        if self.host.exists(Path::new(&long_path)) {
            Ok(long_path)
        } else {
            Err(ExpansionFailure::PostExpansionVerificationFailure { path: long_path })
        }
    }

    /// Resolve the last segment of `partial` to its long name.
    fn query_segment(&self, partial: &str) -> Result<String, ExpansionFailure> {
        let query_failure = |reason: String| ExpansionFailure::QueryFailure {
            path: partial.to_string(),
            reason,
        };

        let output = self
            .host
            .query_long_name(partial)
            .map_err(|e| query_failure(e.to_string()))?;
        log::debug!("Long name query for {partial} printed {:?}", output.trim());

        let long_path = parse_query_output(&output)
            .ok_or_else(|| query_failure("no long path in output".to_string()))?;

        // A different parent means the resolver answered some other question.
        let expected_parent = win_dirname(partial).to_lowercase();
        if win_dirname(long_path).to_lowercase() != expected_parent {
            return Err(query_failure(format!(
                "{long_path} is not in {}",
                win_dirname(partial)
            )));
        }

        Ok(win_basename(long_path).to_string())
    }
}
