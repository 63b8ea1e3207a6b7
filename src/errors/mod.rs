// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the repscan library.
//!
//! This module provides strongly-typed errors for all public APIs in repscan.
//! It follows a hybrid approach:
//!
//! - **Module-specific errors** for fine-grained error handling (`RangeError`,
//!   `CacheError`)
//! - **Unified error type** (`RepscanError`) for convenience when you don't need
//!   to distinguish between error sources
//!
//! # Architecture
//!
//! - [`RangeError`] - Errors from parsing range specs and their bounds
//! - [`CacheError`] - Errors from extending and persisting the match cache
//!
//! # Examples
//!
//! ```rust
//! use repscan::{RangeScanner, RepscanError, ScanConfig};
//!
//! fn total(input: &str) -> Result<u128, RepscanError> {
//!     let scanner = RangeScanner::new(ScanConfig::default());
//!     // RangeError converts into RepscanError via From
//!     let report = scanner.scan_lines(input.lines())?;
//!     Ok(report.sum())
//! }
//!
//! assert_eq!(total("11-22").unwrap(), 33);
//! assert!(total("11-x").is_err());
//! ```

mod cache;
mod range;

pub use cache::{CacheError, RecoveredMatches};
pub use range::RangeError;

/// Unified error type for all repscan operations.
///
/// All module-specific error types automatically convert to `RepscanError` via
/// `From` implementations, so you can use `?` to propagate errors naturally.
#[derive(Debug, thiserror::Error)]
pub enum RepscanError {
    /// Error from range parsing.
    #[error("Range error: {0}")]
    Range(#[from] RangeError),

    /// Error from the match cache.
    #[error("Match cache error: {0}")]
    Cache(#[from] CacheError),
}
