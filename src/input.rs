// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Range list parsing
//!
//! Input is one or more lines of comma-joined `<start>-<end>` specs:
//!
//! ```text
//! 11-22,95-115,998-1012
//! 1188511880-1188511890
//! ```
//!
//! Blank lines and empty comma segments (a trailing comma) are ignored;
//! whitespace around each spec is trimmed.

use crate::errors::RangeError;
use crate::types::range::IdRange;

/// Parses every range spec in `lines`, in order
///
/// Each item is parsed independently, so callers decide whether one bad spec
/// aborts the batch.
pub fn parse_ranges<I, S>(lines: I) -> impl Iterator<Item = Result<IdRange, RangeError>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines.into_iter().flat_map(|line| {
        line.as_ref()
            .split(',')
            .map(str::trim)
            .filter(|spec| !spec.is_empty())
            .map(str::parse::<IdRange>)
            .collect::<Vec<_>>()
    })
}

/// Parses a whole input text, failing on the first invalid spec
pub fn parse_range_list(text: &str) -> Result<Vec<IdRange>, RangeError> {
    parse_ranges(text.lines()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_joined_line() {
        let ranges = parse_range_list("11-22,95-115,998-1012").unwrap();
        let shown: Vec<String> = ranges.iter().map(ToString::to_string).collect();
        assert_eq!(shown, vec!["11-22", "95-115", "998-1012"]);
    }

    #[test]
    fn test_multiple_lines_and_noise() {
        let text = "11-22, 95-115,\n\n   998-1012  \n";
        let ranges = parse_range_list(text).unwrap();
        assert_eq!(ranges.len(), 3);
        assert_eq!(ranges[2].start(), 998);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_range_list("").unwrap().is_empty());
        assert!(parse_range_list("\n , \n").unwrap().is_empty());
    }

    #[test]
    fn test_errors_are_per_spec() {
        let results: Vec<_> = parse_ranges(["11-22,abc,5-x,95-115"]).collect();
        assert_eq!(results.len(), 4);
        assert!(results[0].is_ok());
        assert_eq!(results[1], Err(RangeError::malformed_range("abc")));
        assert!(matches!(results[2], Err(RangeError::InvalidBound { .. })));
        assert!(results[3].is_ok());
    }

    #[test]
    fn test_list_fails_on_first_error() {
        let err = parse_range_list("11-22\n95~115").unwrap_err();
        assert_eq!(err, RangeError::malformed_range("95~115"));
    }
}
