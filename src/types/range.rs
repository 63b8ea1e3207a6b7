// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Inclusive id ranges and their decimal bounds

use std::fmt;
use std::str::FromStr;

use crate::config::constants::{MAX_SUPPORTED_DIGITS, MAX_SUPPORTED_ID};
use crate::errors::RangeError;
use crate::types::digits::count_digits;

/// Parses one decimal range bound
///
/// Accepts ASCII digits only (no sign, no whitespace). Leading zeros are
/// allowed and dropped, so `"0011"` is 11.
pub fn parse_bound(text: &str) -> Result<u64, RangeError> {
    if text.is_empty() {
        return Err(RangeError::invalid_bound(text, "empty bound"));
    }
    if let Some(bad) = text.chars().find(|c| !c.is_ascii_digit()) {
        return Err(RangeError::invalid_bound(
            text,
            format!("unexpected character '{bad}'"),
        ));
    }

    match text.parse::<u64>() {
        Ok(value) if value <= MAX_SUPPORTED_ID => Ok(value),
        _ => Err(RangeError::invalid_bound(
            text,
            format!("more than {MAX_SUPPORTED_DIGITS} significant digits"),
        )),
    }
}

/// Inclusive range of ids `[start, end]`
///
/// A range with `start > end` is valid and empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdRange {
    start: u64,
    end: u64,
}

impl IdRange {
    /// Creates a range, rejecting bounds wider than the supported digit count
    pub fn new(start: u64, end: u64) -> Result<Self, RangeError> {
        for bound in [start, end] {
            if bound > MAX_SUPPORTED_ID {
                return Err(RangeError::invalid_bound(
                    bound.to_string(),
                    format!("more than {MAX_SUPPORTED_DIGITS} significant digits"),
                ));
            }
        }
        Ok(Self { start, end })
    }

    /// Creates a range with both bounds capped at the widest supported id
    pub(crate) fn clamped(start: u64, end: u64) -> Self {
        Self {
            start: start.min(MAX_SUPPORTED_ID),
            end: end.min(MAX_SUPPORTED_ID),
        }
    }

    /// Parses a range from its two decimal bounds
    pub fn from_bounds(start: &str, end: &str) -> Result<Self, RangeError> {
        Ok(Self {
            start: parse_bound(start)?,
            end: parse_bound(end)?,
        })
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    /// True when the range holds no ids (`start > end`)
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, id: u64) -> bool {
        self.start <= id && id <= self.end
    }

    /// Digit count of the upper bound
    pub fn max_digits(&self) -> u32 {
        count_digits(self.end)
    }
}

impl FromStr for IdRange {
    type Err = RangeError;

    /// Parses `"<start>-<end>"`, trimming whitespace around each bound
    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let (start, end) = spec
            .split_once('-')
            .ok_or_else(|| RangeError::malformed_range(spec))?;
        Self::from_bounds(start.trim(), end.trim())
    }
}

impl fmt::Display for IdRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bound_accepts_digits() {
        assert_eq!(parse_bound("0").unwrap(), 0);
        assert_eq!(parse_bound("1188511880").unwrap(), 1_188_511_880);
        assert_eq!(parse_bound("0011").unwrap(), 11);
        assert_eq!(parse_bound("9999999999999999999").unwrap(), MAX_SUPPORTED_ID);
    }

    #[test]
    fn test_parse_bound_rejects_garbage() {
        for text in ["", "12a", "-5", "+5", " 5", "1.5", "١٢"] {
            let err = parse_bound(text).unwrap_err();
            assert!(
                matches!(err, RangeError::InvalidBound { ref bound, .. } if bound == text),
                "expected InvalidBound for {text:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_parse_bound_rejects_overwide() {
        assert!(parse_bound("10000000000000000000").is_err());
        assert!(parse_bound("99999999999999999999999").is_err());
        // Leading zeros do not count toward the width
        assert_eq!(parse_bound("00000000000000000000042").unwrap(), 42);
    }

    #[test]
    fn test_range_from_str() {
        let range: IdRange = "95-115".parse().unwrap();
        assert_eq!((range.start(), range.end()), (95, 115));
        assert_eq!(range.to_string(), "95-115");

        let padded: IdRange = " 998 - 1012 ".trim().parse().unwrap();
        assert_eq!((padded.start(), padded.end()), (998, 1012));
    }

    #[test]
    fn test_range_from_str_errors() {
        assert_eq!(
            "1234".parse::<IdRange>().unwrap_err(),
            RangeError::malformed_range("1234")
        );
        assert!(matches!(
            "5-".parse::<IdRange>().unwrap_err(),
            RangeError::InvalidBound { .. }
        ));
        assert!(matches!(
            "1-2-3".parse::<IdRange>().unwrap_err(),
            RangeError::InvalidBound { .. }
        ));
    }

    #[test]
    fn test_reversed_range_is_empty_not_error() {
        let range: IdRange = "22-11".parse().unwrap();
        assert!(range.is_empty());
        assert!(!range.contains(15));
    }

    #[test]
    fn test_new_rejects_overwide() {
        assert!(IdRange::new(1, MAX_SUPPORTED_ID).is_ok());
        assert!(IdRange::new(1, u64::MAX).is_err());
    }
}
