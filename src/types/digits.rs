// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Decimal digit arithmetic shared by the scanner and the cache

use crate::config::constants::{MAX_SUPPORTED_DIGITS, MAX_SUPPORTED_ID};

/// Number of decimal digits in `n` (`0` has one digit)
#[inline]
pub fn count_digits(n: u64) -> u32 {
    n.checked_ilog10().map_or(1, |log| log + 1)
}

/// `10^exp`
///
/// Callers keep `exp <= MAX_SUPPORTED_DIGITS`.
#[inline]
pub fn pow10(exp: u32) -> u64 {
    10u64.pow(exp)
}

/// Largest number with `digits` digits (`99..9`), or 0 for zero digits
#[inline]
pub fn max_with_digits(digits: u32) -> u64 {
    if digits >= MAX_SUPPORTED_DIGITS {
        MAX_SUPPORTED_ID
    } else {
        pow10(digits) - 1
    }
}

/// Smallest number with `digits` digits (`10..0`); 0 counts as the one-digit floor
#[inline]
pub fn min_with_digits(digits: u32) -> u64 {
    if digits <= 1 {
        0
    } else {
        pow10(digits - 1)
    }
}

/// Multiplier that repeats a `block_width`-digit block `copies` times
///
/// `repunit(3, 2) == 1001`, so `123 * 1001 == 123123`.
pub fn repunit(block_width: u32, copies: u32) -> u64 {
    let base = pow10(block_width);
    (0..copies).fold(0, |acc, _| acc * base + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_digits() {
        assert_eq!(count_digits(0), 1);
        assert_eq!(count_digits(9), 1);
        assert_eq!(count_digits(10), 2);
        assert_eq!(count_digits(999_999), 6);
        assert_eq!(count_digits(1_000_000), 7);
        assert_eq!(count_digits(MAX_SUPPORTED_ID), 19);
        assert_eq!(count_digits(u64::MAX), 20);
    }

    #[test]
    fn test_digit_bounds() {
        assert_eq!(min_with_digits(1), 0);
        assert_eq!(max_with_digits(1), 9);
        assert_eq!(min_with_digits(3), 100);
        assert_eq!(max_with_digits(3), 999);
        assert_eq!(max_with_digits(19), MAX_SUPPORTED_ID);
        assert_eq!(max_with_digits(0), 0);
    }

    #[test]
    fn test_repunit() {
        assert_eq!(repunit(1, 2), 11);
        assert_eq!(repunit(1, 7), 1_111_111);
        assert_eq!(repunit(3, 2), 1001);
        assert_eq!(repunit(2, 3), 10101);
        assert_eq!(123 * repunit(3, 2), 123_123);
        assert_eq!(repunit(1, 19), 1_111_111_111_111_111_111);
    }
}
