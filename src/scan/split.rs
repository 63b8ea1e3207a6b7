// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Length normalization: splitting ranges at powers of ten

use crate::types::digits::{count_digits, max_with_digits, min_with_digits};

/// Split `[start, end]` so that each piece has bounds of equal digit count
///
/// E.g., (5, 114) -> [(5, 9), (10, 99), (100, 114)]
///
/// A reversed range (`start > end`) yields nothing.
pub fn split_by_digit_count(start: u64, end: u64) -> impl Iterator<Item = (u64, u64)> {
    let widths = if start > end {
        1..=0
    } else {
        count_digits(start)..=count_digits(end)
    };

    widths.map(move |width| {
        (
            start.max(min_with_digits(width)),
            end.min(max_with_digits(width)),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(start: u64, end: u64) -> Vec<(u64, u64)> {
        split_by_digit_count(start, end).collect()
    }

    #[test]
    fn test_same_width_is_untouched() {
        assert_eq!(split(11, 22), vec![(11, 22)]);
        assert_eq!(split(580_816, 616_131), vec![(580_816, 616_131)]);
    }

    #[test]
    fn test_crosses_several_boundaries() {
        assert_eq!(split(5, 114), vec![(5, 9), (10, 99), (100, 114)]);
        assert_eq!(split(95, 115), vec![(95, 99), (100, 115)]);
        assert_eq!(split(998, 1012), vec![(998, 999), (1000, 1012)]);
    }

    #[test]
    fn test_starts_at_zero() {
        assert_eq!(split(0, 12), vec![(0, 9), (10, 12)]);
    }

    #[test]
    fn test_reversed_range_yields_nothing() {
        assert!(split(22, 11).is_empty());
    }

    #[test]
    fn test_one_to_a_billion() {
        let pieces = split(1, 1_000_000_000);
        assert_eq!(pieces.len(), 10);
        assert_eq!(pieces[0], (1, 9));
        assert_eq!(pieces[8], (100_000_000, 999_999_999));
        assert_eq!(pieces[9], (1_000_000_000, 1_000_000_000));

        // Pieces tile the range with no gaps
        for pair in pieces.windows(2) {
            assert_eq!(pair[0].1 + 1, pair[1].0);
        }
    }
}
