//! Utility functions for time formatting and text matching.

use std::time::SystemTime;

use chrono::{DateTime, Local, TimeZone};

/// Layout used for every human-readable local timestamp.
pub const LOCAL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Converts any `SystemTime` into a local `YYYY-MM-DD HH:MM:SS` string.
#[must_use]
pub fn format_system_time_local(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format(LOCAL_TIME_FORMAT)
        .to_string()
}

/// Converts Unix seconds into a local `YYYY-MM-DD HH:MM:SS` string.
///
/// Returns `None` for timestamps the local timezone cannot represent.
#[must_use]
pub fn format_unix_timestamp_local(secs: i64) -> Option<String> {
    Local
        .timestamp_opt(secs, 0)
        .single()
        .map(|dt| dt.format(LOCAL_TIME_FORMAT).to_string())
}

/// Returns the first pattern contained in `haystack`, comparing lowercase.
///
/// Patterns are lowercased too, so configured lists may use any case.
#[must_use]
pub fn find_lowercase_match<'a>(haystack: &str, patterns: &'a [String]) -> Option<&'a str> {
    let haystack = haystack.to_lowercase();
    patterns
        .iter()
        .map(String::as_str)
        .find(|p| !p.is_empty() && haystack.contains(&p.to_lowercase()))
}

/// Pads `s` with spaces to `width` characters (not bytes).
#[must_use]
pub fn pad_right(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_unix_timestamp_local_matches_chrono() {
        let expected = Local
            .timestamp_opt(1_700_000_000, 0)
            .single()
            .unwrap()
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        assert_eq!(
            format_unix_timestamp_local(1_700_000_000).as_deref(),
            Some(expected.as_str())
        );
    }

    #[test]
    fn test_format_unix_timestamp_local_shape() {
        let s = format_unix_timestamp_local(0).unwrap();
        assert_eq!(s.len(), 19);
        assert_eq!(&s[4..5], "-");
        assert_eq!(&s[13..14], ":");
    }

    #[test]
    fn test_format_unix_timestamp_out_of_range() {
        assert!(format_unix_timestamp_local(i64::MAX).is_none());
    }

    #[test]
    fn test_format_system_time_local_epoch() {
        let s = format_system_time_local(SystemTime::UNIX_EPOCH);
        assert_eq!(Some(s), format_unix_timestamp_local(0));
    }

    #[test]
    fn test_find_lowercase_match() {
        let patterns = vec!["wg0".to_string(), "UTUN".to_string()];
        assert_eq!(find_lowercase_match("WG0", &patterns), Some("wg0"));
        assert_eq!(find_lowercase_match("utun3", &patterns), Some("UTUN"));
        assert_eq!(find_lowercase_match("eth0", &patterns), None);
    }

    #[test]
    fn test_find_lowercase_match_ignores_empty_pattern() {
        let patterns = vec![String::new()];
        assert_eq!(find_lowercase_match("anything", &patterns), None);
    }

    #[test]
    fn test_pad_right_counts_chars() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_right("abcdef", 4), "abcdef");
        assert_eq!(pad_right("√x", 3), "√x ");
    }
}
