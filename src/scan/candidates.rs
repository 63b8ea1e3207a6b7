// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Candidate generation for a single block width

use crate::types::digits::{count_digits, pow10, repunit};

/// Repeated-block numbers inside `[start, end]` built from `block_width`-digit blocks
///
/// `start` and `end` must have the same digit count `width`, and `block_width`
/// must divide `width`. A candidate is `block * 1001..01` (a repunit in base
/// `10^block_width`), e.g. `123_123_123 == 123 * 1_001_001`.
///
/// Blocks are scanned upward starting from the leading `block_width` digits of
/// `start`. Candidates grow strictly with the block, so the scan ends at the
/// first candidate above `end`, and the block range itself stops before the
/// block would gain a digit (`99` never advances to `100` for two-digit blocks).
pub fn repeated_candidates(start: u64, end: u64, block_width: u32) -> impl Iterator<Item = u64> {
    let width = count_digits(start);
    debug_assert!(block_width > 0 && width % block_width == 0);

    let multiplier = repunit(block_width, width / block_width);
    let first_block = start / pow10(width - block_width);
    let block_limit = pow10(block_width);

    (first_block..block_limit)
        .map(move |block| block * multiplier)
        .take_while(move |&candidate| candidate <= end)
        .filter(move |&candidate| candidate >= start && count_digits(candidate) == width)
}
