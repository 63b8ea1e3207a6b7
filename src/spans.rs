// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Span creation helpers for repscan operations.
//!
//! Telemetry concerns are kept apart from the scanning logic. Instead of using
//! `#[instrument]` attributes directly on functions, each instrumented operation
//! has a corresponding span helper function in this module.
//!
//! Usage pattern:
//! ```rust,ignore
//! pub fn my_operation(&self, param: Type) -> Result<T> {
//!     let span = spans::my_operation(param_value);
//!     let _guard = span.enter();
//!     // Business logic here
//! }
//! ```

use tracing::{Level, Span};

use crate::types::range::IdRange;
use crate::types::repetition::Repetition;

/// Create span for enumerating the repeated ids of one range.
///
/// Parent: scan_ranges or extend_record span
/// Children: None
#[inline]
pub(crate) fn enumerate_matches(range: IdRange, repetition: Repetition) -> Span {
    tracing::trace_span!(
        "repscan.enumerate_matches",
        range = %range,
        repetition = %repetition,
    )
}

/// Create span for scanning and summing a batch of ranges.
///
/// This is the main public API entry point for range scanning.
///
/// Parent: None (root span for this operation)
/// Children: enumerate_matches spans (one per range) or ensure_computed span
#[inline]
pub(crate) fn scan_ranges(range_count: usize, repetition: Repetition, cached: bool) -> Span {
    tracing::span!(
        Level::INFO,
        "repscan.scan_ranges",
        range_count = range_count,
        repetition = %repetition,
        cached = cached,
    )
}

/// Create span for bringing the match cache up to a digit length.
///
/// Parent: scan_ranges span, or None when called directly
/// Children: extend_record span when the ceiling moves
#[inline]
pub(crate) fn ensure_computed(store: &'static str, max_digit_length: u32) -> Span {
    tracing::debug_span!(
        "repscan.ensure_computed",
        store = store,
        max_digit_length = max_digit_length,
    )
}

/// Create span for extending a cache record from its ceiling to a new one.
///
/// Parent: ensure_computed span
/// Children: enumerate_matches span
#[inline]
pub(crate) fn extend_record(from: u64, to: u64) -> Span {
    tracing::debug_span!("repscan.extend_record", from = from, to = to)
}
