//! Search pattern syntax.
//!
//! The search prompt accepts three forms:
//!
//! - `/body/flags` with flags drawn from `gimsuy`;
//! - `/body`, which is case-insensitive (also used when the text after the
//!   last slash is not made of flags, so `/api/v1` searches for `api/v1`);
//! - a bare `body`, also case-insensitive.
//!
//! Only `i`, `m` and `s` change matching. `g`, `u` and `y` are accepted for
//! familiarity and ignored: every occurrence is always highlighted and the
//! regex engine is always Unicode-aware.

use regex::{Regex, RegexBuilder};
use thiserror::Error;

const FLAGS: &str = "gimsuy";

#[derive(Debug, Error, PartialEq)]
pub enum SearchError {
    #[error("Empty pattern")]
    Empty,

    #[error("Invalid regexp: {0}")]
    InvalidRegex(String),
}

/// Compiles a search prompt entry into a [`Regex`].
///
/// # Examples
///
/// ```
/// use peekjson::search::parse_pattern;
///
/// assert!(parse_pattern("/Foo/").unwrap().is_match("Foo"));
/// assert!(!parse_pattern("/Foo/").unwrap().is_match("foo"));
/// assert!(parse_pattern("/Foo/i").unwrap().is_match("foo"));
/// assert!(parse_pattern("/Foo").unwrap().is_match("foo"));
/// assert!(parse_pattern("Foo").unwrap().is_match("FOO"));
/// assert!(parse_pattern("/[/").is_err());
/// ```
pub fn parse_pattern(input: &str) -> Result<Regex, SearchError> {
    let (body, flags) = split_pattern(input);
    if body.is_empty() {
        return Err(SearchError::Empty);
    }

    let mut builder = RegexBuilder::new(body);
    for flag in flags.chars() {
        match flag {
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            _ => {}
        }
    }
    builder
        .build()
        .map_err(|e| SearchError::InvalidRegex(e.to_string()))
}

/// Splits `input` into the regex body and its flags.
fn split_pattern(input: &str) -> (&str, &str) {
    let Some(rest) = input.strip_prefix('/') else {
        return (input, "i");
    };
    match rest.rfind('/') {
        Some(end) if !is_escaped(rest, end) && is_flags(&rest[end + 1..]) => {
            (&rest[..end], &rest[end + 1..])
        }
        _ => (rest, "i"),
    }
}

/// Text after the closing slash only counts as flags when every character
/// is one; otherwise it belongs to the body, as in `/api/v1`.
fn is_flags(s: &str) -> bool {
    s.chars().all(|c| FLAGS.contains(c))
}

/// True when the byte at `pos` is preceded by an odd number of backslashes.
fn is_escaped(s: &str, pos: usize) -> bool {
    s.as_bytes()[..pos]
        .iter()
        .rev()
        .take_while(|&&b| b == b'\\')
        .count()
        % 2
        == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_forms() {
        assert_eq!(split_pattern("/a/gi"), ("a", "gi"));
        assert_eq!(split_pattern("/a/"), ("a", ""));
        assert_eq!(split_pattern("/a"), ("a", "i"));
        assert_eq!(split_pattern("a"), ("a", "i"));
        assert_eq!(split_pattern("/a/b/m"), ("a/b", "m"));
    }

    #[test]
    fn test_trailing_segment_that_is_not_flags() {
        assert_eq!(split_pattern("/api/v1"), ("api/v1", "i"));
        assert_eq!(split_pattern("/a/gix"), ("a/gix", "i"));
        assert!(parse_pattern("/api/v1").unwrap().is_match("https://host/API/v1/users"));
        assert!(parse_pattern("/a/x").unwrap().is_match("A/X"));
    }

    #[test]
    fn test_escaped_trailing_slash_is_part_of_body() {
        assert_eq!(split_pattern("/a\\/"), ("a\\/", "i"));
        assert_eq!(split_pattern("/a\\\\/"), ("a\\\\", ""));
    }

    #[test]
    fn test_flags() {
        assert!(parse_pattern("/^b/m").unwrap().is_match("a\nb"));
        assert!(parse_pattern("/a.b/s").unwrap().is_match("a\nb"));
        assert!(parse_pattern("/A/gu").unwrap().is_match("A"));
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(parse_pattern("").unwrap_err(), SearchError::Empty);
        assert_eq!(parse_pattern("//").unwrap_err(), SearchError::Empty);
        assert_eq!(parse_pattern("/").unwrap_err(), SearchError::Empty);
    }

    #[test]
    fn test_invalid_regex() {
        assert!(matches!(
            parse_pattern("(unclosed").unwrap_err(),
            SearchError::InvalidRegex(_)
        ));
    }
}
