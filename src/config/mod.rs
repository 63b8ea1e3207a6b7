// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration for range scanning
//!
//! This module controls which repetitions count as matches and how a batch
//! reacts to range specs it cannot parse.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use repscan::{InvalidRangePolicy, Repetition, ScanConfig};
//!
//! let config = ScanConfig::default();
//! assert_eq!(config.repetition, Repetition::AtLeastTwice);
//! assert_eq!(config.invalid_ranges, InvalidRangePolicy::Fail);
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use repscan::{InvalidRangePolicy, Repetition, ScanConfigBuilder};
//!
//! let config = ScanConfigBuilder::new()
//!     .repetition(Repetition::Twice)
//!     .skip_invalid_ranges()
//!     .build();
//! assert_eq!(config.invalid_ranges, InvalidRangePolicy::Skip);
//! ```

use std::fmt;

use crate::types::repetition::Repetition;

use self::constants::{DEFAULT_CACHE_DIGIT_LIMIT, MAX_SUPPORTED_DIGITS};

pub mod constants;

/// What a batch scan does with a range spec it cannot parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidRangePolicy {
    /// Abort the whole batch on the first invalid range
    #[default]
    Fail,
    /// Log the invalid range, record it in the report and keep going
    Skip,
}

impl fmt::Display for InvalidRangePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidRangePolicy::Fail => write!(f, "fail"),
            InvalidRangePolicy::Skip => write!(f, "skip"),
        }
    }
}

/// Configuration for [`RangeScanner`](crate::RangeScanner)
///
/// Use [`ScanConfigBuilder`] for a fluent API to construct instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    /// Which repetitions count as matches
    /// Default: at least two copies
    pub repetition: Repetition,

    /// Handling of unparseable range specs
    /// Default: fail the batch
    pub invalid_ranges: InvalidRangePolicy,

    /// Widest range (in digits) answered through a match cache
    /// Default: 10
    pub cache_digit_limit: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            repetition: Repetition::default(),
            invalid_ranges: InvalidRangePolicy::default(),
            cache_digit_limit: DEFAULT_CACHE_DIGIT_LIMIT,
        }
    }
}

impl ScanConfig {
    /// Config for the "exactly two halves" variant
    pub fn halves() -> Self {
        ScanConfigBuilder::new()
            .repetition(Repetition::Twice)
            .build()
    }
}

/// Builder for [`ScanConfig`]
#[derive(Debug, Clone, Default)]
pub struct ScanConfigBuilder {
    config: ScanConfig,
}

impl ScanConfigBuilder {
    /// Start from the defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the repetition rule
    pub fn repetition(mut self, repetition: Repetition) -> Self {
        self.config.repetition = repetition;
        self
    }

    /// Set the invalid range policy
    pub fn invalid_ranges(mut self, policy: InvalidRangePolicy) -> Self {
        self.config.invalid_ranges = policy;
        self
    }

    /// Set the widest range, in digits, that a cached scan may extend the
    /// cache for; capped at the supported width
    pub fn cache_digit_limit(mut self, digits: u32) -> Self {
        self.config.cache_digit_limit = digits.min(MAX_SUPPORTED_DIGITS);
        self
    }

    /// Shorthand for `invalid_ranges(InvalidRangePolicy::Skip)`
    pub fn skip_invalid_ranges(self) -> Self {
        self.invalid_ranges(InvalidRangePolicy::Skip)
    }

    /// Build the final configuration
    pub fn build(self) -> ScanConfig {
        self.config
    }
}
