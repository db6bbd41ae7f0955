// SPDX-License-Identifier: PMPL-1.0-or-later

//! Dot-notation path parsing and building.
//!
//! A dot-path addresses a node in a nested [`crate::value::Value`] tree:
//! segments are separated by `.`, and a purely-numeric segment addresses a
//! sequence index when the traversal target is an array (otherwise it is an
//! ordinary mapping key). Empty segments are never valid.

use crate::error::{OmnibaseError, Result};

/// Path segment separator.
pub const SEPARATOR: char = '.';

/// Split a dot-path into its segments.
///
/// # Errors
///
/// Returns [`OmnibaseError::InvalidPath`] when the path is empty or any
/// segment between separators is empty (`"a..b"`, `".a"`, `"a."`).
pub fn parse(path: &str) -> Result<Vec<String>> {
    if path.is_empty() {
        return Err(OmnibaseError::InvalidPath(path.to_owned()));
    }
    let segments: Vec<String> = path.split(SEPARATOR).map(str::to_owned).collect();
    if segments.iter().any(String::is_empty) {
        return Err(OmnibaseError::InvalidPath(path.to_owned()));
    }
    Ok(segments)
}

/// Join segments into a dot-path, skipping empty segments produced by
/// concatenation with an empty prefix.
pub fn join<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut path = String::new();
    for segment in segments {
        let segment = segment.as_ref();
        if segment.is_empty() {
            continue;
        }
        if !path.is_empty() {
            path.push(SEPARATOR);
        }
        path.push_str(segment);
    }
    path
}

/// True when a segment parses fully as a non-negative integer and may
/// therefore address a sequence index.
pub fn is_index(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

/// Parse an index segment into a `usize`.
///
/// # Errors
///
/// Returns [`OmnibaseError::InvalidPath`] when the segment is not a valid
/// index (including overflow). `full_path` is used for the error message.
pub fn parse_index(segment: &str, full_path: &str) -> Result<usize> {
    segment
        .parse::<usize>()
        .map_err(|_| OmnibaseError::InvalidPath(full_path.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        assert_eq!(parse("a.b.c").unwrap(), vec!["a", "b", "c"]);
        assert_eq!(parse("single").unwrap(), vec!["single"]);
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        for path in ["", ".", "a..b", ".a", "a."] {
            assert!(
                matches!(parse(path), Err(OmnibaseError::InvalidPath(_))),
                "{path:?} must be rejected"
            );
        }
    }

    #[test]
    fn test_join_skips_empty_segments() {
        assert_eq!(join(["", "a", "b"]), "a.b");
        assert_eq!(join(["a", "", "b", ""]), "a.b");
        assert_eq!(join::<_, &str>([]), "");
    }

    #[test]
    fn test_is_index() {
        assert!(is_index("0"));
        assert!(is_index("42"));
        assert!(!is_index("4a"));
        assert!(!is_index("-1"));
        assert!(!is_index(""));
    }
}
