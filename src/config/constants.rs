// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Numeric limits and well-known defaults
//!
//! This module centralizes the constants that bound the scanner's numeric domain
//! and the defaults used by the match cache and the CLI.

/// Widest decimal id the scanner accepts
///
/// Every repeated candidate of at most this many digits fits in a `u64`
/// (`u64::MAX` has 20 digits, but not every 20-digit repetition does).
pub const MAX_SUPPORTED_DIGITS: u32 = 19;

/// Largest id the scanner accepts (`10^19 - 1`)
pub const MAX_SUPPORTED_ID: u64 = 9_999_999_999_999_999_999;

/// Ceiling of a freshly created cache record
///
/// Single-digit numbers never repeat, so a record that starts at 1 already
/// holds every match at or below its ceiling.
pub const INITIAL_COMPUTED_N: u64 = 1;

/// Widest digit length a cached scan extends the cache to on its own
///
/// Ranges with wider upper bounds are enumerated directly. Ten digits keep the
/// record under a hundred thousand keys; `precompute` can go further.
pub const DEFAULT_CACHE_DIGIT_LIMIT: u32 = 10;

/// Environment variable holding the match cache path for the CLI
pub const CACHE_PATH_ENV: &str = "REPSCAN_CACHE";
