// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Pattern enumeration: repeated-block ids inside a range
//!
//! An id matches when its decimal digits are a shorter block repeated at least
//! twice (`11`, `1010`, `123123`, `777`). Ranges may span billions of ids, so
//! instead of testing every id we build the repeated numbers directly:
//!
//! 1. Split the range at powers of ten so each piece has a single digit count
//!    `L` ([`split_by_digit_count`]).
//! 2. For every block width `d` that divides `L` (`d <= L / 2`), walk blocks
//!    upward from the leading `d` digits of the piece's start and keep the
//!    candidates that land inside it ([`repeated_candidates`]).
//! 3. Union the candidates; ids reachable through several widths (`111111` is
//!    `1` six times and `11` three times) are counted once.
//!
//! The work per piece is bounded by the number of divisors of `L` times the
//! number of blocks whose repetition lands in the piece.
//!
//! # Examples
//!
//! ```rust
//! use repscan::enumerate_matches;
//!
//! let matches = enumerate_matches("95", "115").unwrap();
//! assert_eq!(matches.into_iter().collect::<Vec<_>>(), vec![99, 111]);
//! ```

use tracing::trace;

use crate::errors::RangeError;
use crate::spans;
use crate::types::digits::count_digits;
use crate::types::range::IdRange;
use crate::types::repetition::Repetition;
use crate::types::MatchSet;

mod candidates;
mod split;

pub use candidates::repeated_candidates;
pub use split::split_by_digit_count;

/// Every id in `[start, end]` whose digits repeat a shorter block two or more times
///
/// # Errors
///
/// Returns [`RangeError::InvalidBound`] when either bound is empty, holds
/// anything other than ASCII digits, or is wider than 19 significant digits.
/// A range with `start > end` is not an error and yields an empty set.
pub fn enumerate_matches(start: &str, end: &str) -> Result<MatchSet, RangeError> {
    let range = IdRange::from_bounds(start, end)?;
    Ok(matches_in(range, Repetition::AtLeastTwice))
}

/// Every id in `range` accepted by `repetition`
pub fn matches_in(range: IdRange, repetition: Repetition) -> MatchSet {
    let span = spans::enumerate_matches(range, repetition);
    let _guard = span.enter();

    let matches: MatchSet = split_by_digit_count(range.start(), range.end())
        .flat_map(|(start, end)| same_width_matches(start, end, repetition))
        .collect();

    trace!(range = %range, matches = matches.len(), "Enumerated repeated ids");
    matches
}

/// Matches in a piece whose bounds share one digit count
fn same_width_matches(start: u64, end: u64, repetition: Repetition) -> impl Iterator<Item = u64> {
    repetition
        .block_widths(count_digits(start))
        .flat_map(move |block_width| repeated_candidates(start, end, block_width))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests every id in the range against the digit-level definition
    fn brute_force(start: u64, end: u64, repetition: Repetition) -> MatchSet {
        (start..=end).filter(|&id| repetition.is_match(id)).collect()
    }

    fn set(ids: &[u64]) -> MatchSet {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_eleven_to_twenty_two() {
        assert_eq!(enumerate_matches("11", "22").unwrap(), set(&[11, 22]));
    }

    #[test]
    fn test_crossing_widths() {
        assert_eq!(enumerate_matches("95", "115").unwrap(), set(&[99, 111]));
        assert_eq!(enumerate_matches("998", "1012").unwrap(), set(&[999, 1010]));
    }

    #[test]
    fn test_dense_six_digit_range_matches_brute_force() {
        // Six digits admit blocks of width 1, 2 and 3, so this range is dense
        let matches = enumerate_matches("580816", "616131").unwrap();
        assert_eq!(matches, brute_force(580_816, 616_131, Repetition::AtLeastTwice));
        assert_eq!(matches.len(), 38);
        assert!(matches.contains(&581_581));
        assert!(matches.contains(&585_858));
        assert!(matches.contains(&606_060));
    }

    #[test]
    fn test_shared_ids_counted_once() {
        // 111111 is 1x6, 11x3 and 111x2
        let matches = enumerate_matches("111111", "111111").unwrap();
        assert_eq!(matches, set(&[111_111]));
    }

    #[test]
    fn test_prime_width_uses_single_digits() {
        let matches = enumerate_matches("1000000", "9999999").unwrap();
        assert_eq!(matches.len(), 9);
        assert!(matches.iter().all(|id| id % 1_111_111 == 0));
    }

    #[test]
    fn test_reversed_range_is_empty() {
        assert!(enumerate_matches("22", "11").unwrap().is_empty());
    }

    #[test]
    fn test_single_digit_ranges_have_no_matches() {
        assert!(enumerate_matches("0", "9").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_bounds() {
        assert!(matches!(
            enumerate_matches("", "22"),
            Err(RangeError::InvalidBound { .. })
        ));
        assert!(matches!(
            enumerate_matches("11", "2x2"),
            Err(RangeError::InvalidBound { .. })
        ));
        assert!(matches!(
            enumerate_matches("1", "100000000000000000000"),
            Err(RangeError::InvalidBound { .. })
        ));
    }

    #[test]
    fn test_matches_brute_force_on_small_ranges() {
        for (start, end) in [(1, 12_000), (95, 115), (9_890, 10_120), (99_990, 101_020)] {
            let range = IdRange::new(start, end).unwrap();
            for repetition in [Repetition::Twice, Repetition::AtLeastTwice] {
                assert_eq!(
                    matches_in(range, repetition),
                    brute_force(start, end, repetition),
                    "range {range} with {repetition}"
                );
            }
        }
    }

    #[test]
    fn test_billion_range_equals_sum_of_width_pieces() {
        let whole = enumerate_matches("1", "1000000000").unwrap();

        let mut pieces = MatchSet::new();
        for (start, end) in split_by_digit_count(1, 1_000_000_000) {
            pieces.extend(enumerate_matches(&start.to_string(), &end.to_string()).unwrap());
        }

        assert_eq!(whole, pieces);
        assert_eq!(whole.len(), 11_007);
        assert_eq!(whole.iter().map(|&id| id as u128).sum::<u128>(), 990_640_130_895);
    }

    #[test]
    fn test_idempotent() {
        let first = enumerate_matches("1", "99999999").unwrap();
        let second = enumerate_matches("1", "99999999").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_twice_rule_only_takes_halves() {
        let range = IdRange::new(95, 115).unwrap();
        assert_eq!(matches_in(range, Repetition::Twice), set(&[99]));

        let range = IdRange::new(120_000, 130_000).unwrap();
        let halves = matches_in(range, Repetition::Twice);
        assert!(halves.contains(&120_120));
        assert!(!halves.contains(&121_212));
    }
}
