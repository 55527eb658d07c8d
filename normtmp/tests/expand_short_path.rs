//! Integration tests for short path expansion.
//!
//! These tests drive [`ShortPathExpander`] through a scripted Windows host
//! and check both the results and how many collaborator calls were made.

mod common;

use common::ScriptedHost;
use normtmp::path::classify::is_supported_short_path;
use normtmp::{ExpansionResult, Platform, ShortPathExpander, TmpdirCache, TmpdirNormalizer};

const HOME_DIR: &str = r"C:\Users\VeryLongName";
const SHORT_USER_DIR: &str = r"C:\Users\VERYLO~1";
const SHORT_TEMP: &str = r"C:\Users\VERYLO~1\AppData\Local\Temp";
const LONG_TEMP: &str = r"C:\Users\VeryLongName\AppData\Local\Temp";

fn expanded(path: &str) -> ExpansionResult {
    ExpansionResult::Expanded(path.to_string())
}

/// A host where `C:\Users\VERYLO~1` is the home directory under another name.
fn home_host() -> ScriptedHost {
    ScriptedHost::windows(SHORT_TEMP)
        .with_home(HOME_DIR)
        .with_object(HOME_DIR, 7)
        .with_link(SHORT_USER_DIR, HOME_DIR)
        .with_object(LONG_TEMP, 8)
}

#[test]
fn test_long_paths_returned_unchanged_without_collaborators() {
    let host = ScriptedHost::windows(LONG_TEMP);
    let expander = ShortPathExpander::new(&host);

    for path in [LONG_TEMP, r"D:\", r"z:\Program Files\App"] {
        assert_eq!(expander.expand(path), expanded(path));
    }
    assert_eq!(host.home_calls(), 0);
    assert_eq!(host.identity_calls(), 0);
    assert!(host.queries().is_empty());
}

#[test]
fn test_non_drive_paths_unsupported() {
    let host = ScriptedHost::windows(SHORT_TEMP).with_home(HOME_DIR);
    let expander = ShortPathExpander::new(&host);

    for path in [
        "",
        r"\\server\share\VERYLO~1",
        "C:/Users/VERYLO~1",
        r"Users\VERYLO~1",
        "/home/VERYLO~1",
    ] {
        assert_eq!(expander.expand(path), ExpansionResult::Unsupported, "{path}");
    }
    assert!(host.queries().is_empty());
}

#[test]
fn test_unsupported_off_windows() {
    for platform in [Platform::MacOs, Platform::Linux, Platform::Other] {
        let host = ScriptedHost::on(platform, SHORT_TEMP)
            .with_home(HOME_DIR)
            .answering(SHORT_USER_DIR, HOME_DIR);
        let expander = ShortPathExpander::new(&host);

        assert!(!is_supported_short_path(platform, SHORT_TEMP));
        assert_eq!(expander.expand(SHORT_TEMP), ExpansionResult::Unsupported);
        assert_eq!(expander.expand(LONG_TEMP), ExpansionResult::Unsupported);
        assert_eq!(host.home_calls(), 0);
        assert!(host.queries().is_empty());
    }
}

#[test]
fn test_home_directory_shortcut() {
    let host = home_host();
    let expander = ShortPathExpander::new(&host);

    assert_eq!(expander.expand(SHORT_TEMP), expanded(LONG_TEMP));
    assert_eq!(host.identity_calls(), 2);
    assert!(host.queries().is_empty());
}

#[test]
fn test_home_directory_lookalike_falls_back_to_query() {
    // Same name, different directory.
    let host = ScriptedHost::windows(SHORT_TEMP)
        .with_home(HOME_DIR)
        .with_object(HOME_DIR, 7)
        .with_object(SHORT_USER_DIR, 9)
        .failing(SHORT_USER_DIR, "attrib.exe not found");
    let expander = ShortPathExpander::new(&host);

    assert_eq!(expander.expand(SHORT_TEMP), ExpansionResult::Unsupported);
    assert_eq!(host.queries(), vec![SHORT_USER_DIR.to_string()]);
}

#[test]
fn test_short_home_directory_not_trusted() {
    let host = ScriptedHost::windows(SHORT_TEMP)
        .with_home(SHORT_USER_DIR)
        .with_object(SHORT_USER_DIR, 7)
        .answering(SHORT_USER_DIR, HOME_DIR)
        .with_object(LONG_TEMP, 8);
    let expander = ShortPathExpander::new(&host);

    assert_eq!(expander.expand(SHORT_TEMP), expanded(LONG_TEMP));
    assert_eq!(host.identity_calls(), 0);
    assert_eq!(host.queries().len(), 1);
}

#[test]
fn test_short_segment_outside_user_directory() {
    let host = ScriptedHost::windows(r"D:\VERYLO~1\Temp")
        .answering(r"D:\VERYLO~1", r"D:\VeryLongName")
        .with_object(r"D:\VeryLongName\Temp", 1);
    let expander = ShortPathExpander::new(&host);

    assert_eq!(
        expander.expand(r"D:\VERYLO~1\Temp"),
        expanded(r"D:\VeryLongName\Temp")
    );
    assert_eq!(host.home_calls(), 0);
}

#[test]
fn test_two_short_segments_take_two_queries() {
    let host = ScriptedHost::windows(r"D:\VERYLO~1\EXTRAS~1\Temp")
        .answering(r"D:\VERYLO~1", r"D:\VeryLongName")
        .answering(r"D:\VeryLongName\EXTRAS~1", r"D:\VeryLongName\ExtraStuff")
        .with_object(r"D:\VeryLongName\ExtraStuff\Temp", 1);
    let expander = ShortPathExpander::new(&host);

    assert_eq!(
        expander.expand(r"D:\VERYLO~1\EXTRAS~1\Temp"),
        expanded(r"D:\VeryLongName\ExtraStuff\Temp")
    );
    assert_eq!(
        host.queries(),
        vec![
            r"D:\VERYLO~1".to_string(),
            r"D:\VeryLongName\EXTRAS~1".to_string()
        ]
    );
}

#[test]
fn test_home_shortcut_skipped_when_remainder_is_short() {
    let host = home_host()
        .answering(SHORT_USER_DIR, HOME_DIR)
        .answering(
            r"C:\Users\VeryLongName\EXTRAS~1",
            r"C:\Users\VeryLongName\ExtraStuff",
        )
        .with_object(r"C:\Users\VeryLongName\ExtraStuff\Temp", 3);
    let expander = ShortPathExpander::new(&host);

    assert_eq!(
        expander.expand(r"C:\Users\VERYLO~1\EXTRAS~1\Temp"),
        expanded(r"C:\Users\VeryLongName\ExtraStuff\Temp")
    );
    assert_eq!(host.identity_calls(), 0);
    assert_eq!(host.queries().len(), 2);
}

#[test]
fn test_error_marker_stops_expansion() {
    let host = ScriptedHost::windows(r"D:\VERYLO~1\EXTRAS~1\Temp")
        .printing(r"D:\VERYLO~1", "File not found - D:\\VERYLO~1\r\n")
        .answering(r"D:\VeryLongName\EXTRAS~1", r"D:\VeryLongName\ExtraStuff");
    let expander = ShortPathExpander::new(&host);

    assert_eq!(
        expander.expand(r"D:\VERYLO~1\EXTRAS~1\Temp"),
        ExpansionResult::Unsupported
    );
    assert_eq!(host.queries().len(), 1);
}

#[test]
fn test_answer_for_other_directory_rejected() {
    let host = ScriptedHost::windows(r"D:\VERYLO~1\Temp")
        .answering(r"D:\VERYLO~1", r"E:\VeryLongName")
        .with_object(r"D:\VeryLongName\Temp", 1);
    let expander = ShortPathExpander::new(&host);

    assert_eq!(expander.expand(r"D:\VERYLO~1\Temp"), ExpansionResult::Unsupported);
}

#[test]
fn test_answer_with_doubled_separator_rejected() {
    let host = ScriptedHost::windows(r"D:\VeryLongName\EXTRAS~1\Temp")
        .answering(r"D:\VeryLongName\EXTRAS~1", r"D:\VeryLongName\\ExtraStuff")
        .with_object(r"D:\VeryLongName\ExtraStuff\Temp", 1);
    let expander = ShortPathExpander::new(&host);

    assert_eq!(
        expander.expand(r"D:\VeryLongName\EXTRAS~1\Temp"),
        ExpansionResult::Unsupported
    );
    assert_eq!(host.queries().len(), 1);
}

#[test]
fn test_answer_compared_case_insensitively() {
    let host = ScriptedHost::windows(r"d:\VERYLO~1\Temp")
        .answering(r"d:\VERYLO~1", r"D:\VeryLongName")
        .with_object(r"d:\VeryLongName\Temp", 1);
    let expander = ShortPathExpander::new(&host);

    assert_eq!(
        expander.expand(r"d:\VERYLO~1\Temp"),
        expanded(r"d:\VeryLongName\Temp")
    );
}

#[test]
fn test_expanded_path_must_exist() {
    let host = ScriptedHost::windows(r"D:\VERYLO~1\Temp")
        .answering(r"D:\VERYLO~1", r"D:\VeryLongName");
    let expander = ShortPathExpander::new(&host);

    assert_eq!(expander.expand(r"D:\VERYLO~1\Temp"), ExpansionResult::Unsupported);
}

#[test]
fn test_expansion_is_idempotent() {
    let host = home_host();
    let expander = ShortPathExpander::new(&host);

    let once = expander.expand(SHORT_TEMP).into_expanded().unwrap();
    assert_eq!(expander.expand(&once), expanded(&once));
}

#[test]
fn test_normalizer_expands_without_caching() {
    let cache = TmpdirCache::new();
    let normalizer = TmpdirNormalizer::with_cache(home_host(), &cache);

    assert_eq!(normalizer.expand_short_path(SHORT_TEMP), expanded(LONG_TEMP));
    assert_eq!(normalizer.expand_short_path(SHORT_TEMP), expanded(LONG_TEMP));
    assert_eq!(normalizer.host().identity_calls(), 4);
    assert!(cache.is_empty());
}

#[test]
fn test_free_function_rejects_network_paths() {
    assert_eq!(
        normtmp::expand_short_path(r"\\server\share\PROGRA~1"),
        ExpansionResult::Unsupported
    );
}
