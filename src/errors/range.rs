// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for range parsing and enumeration.

/// Errors that can occur while turning range text into bounds.
///
/// A range whose start exceeds its end is *not* an error: it is a valid,
/// empty range.
///
/// # Examples
///
/// ```rust
/// use repscan::{enumerate_matches, RangeError};
///
/// match enumerate_matches("12a", "99") {
///     Err(RangeError::InvalidBound { bound, .. }) => assert_eq!(bound, "12a"),
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// A bound is not a non-negative decimal string within the supported width.
    #[error("Invalid bound '{bound}': {reason}")]
    InvalidBound {
        /// The offending bound text
        bound: String,
        /// Why it was rejected
        reason: String,
    },

    /// A range spec is not of the form `<start>-<end>`.
    #[error("Malformed range '{spec}': expected <start>-<end>")]
    MalformedRange {
        /// The offending range text
        spec: String,
    },
}

impl RangeError {
    /// Create an `InvalidBound` error with a reason.
    pub fn invalid_bound(bound: impl Into<String>, reason: impl Into<String>) -> Self {
        RangeError::InvalidBound {
            bound: bound.into(),
            reason: reason.into(),
        }
    }

    /// Create a `MalformedRange` error.
    pub fn malformed_range(spec: impl Into<String>) -> Self {
        RangeError::MalformedRange { spec: spec.into() }
    }
}
