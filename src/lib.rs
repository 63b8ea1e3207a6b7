// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Repeated-pattern range scanning
//!
//! Finds every id in a set of ranges whose decimal digits are a shorter block
//! repeated two or more times (`11`, `1010`, `123123`, `77777777`) and sums the
//! distinct matches. Candidates are built from their blocks rather than tested
//! one id at a time, so ranges spanning billions of ids are cheap.
//!
//! - [`enumerate_matches`] / [`matches_in`]: the enumerator
//! - [`MatchCache`]: persistent, incrementally extended record of all matches
//!   up to a digit length
//! - [`RangeScanner`]: parses range lists and sums their matches
//!
//! # Examples
//!
//! ```rust
//! use repscan::{enumerate_matches, RangeScanner, ScanConfig};
//!
//! let matches = enumerate_matches("11", "22").unwrap();
//! assert_eq!(matches.into_iter().collect::<Vec<_>>(), vec![11, 22]);
//!
//! let report = RangeScanner::new(ScanConfig::default())
//!     .scan_lines(["11-22,95-115,998-1012"])
//!     .unwrap();
//! assert_eq!(report.sum(), 2252);
//! ```

pub mod cache;
pub mod config;
pub mod errors;
pub mod input;
pub mod scan;
pub mod scanner;
mod spans;
pub mod types;

pub use cache::{
    CacheRecord, CacheStats, DiskStore, MatchCache, MemoryStore, RecordStore, StoreLock,
};
pub use config::{InvalidRangePolicy, ScanConfig, ScanConfigBuilder};
pub use errors::{CacheError, RangeError, RecoveredMatches, RepscanError};
pub use input::{parse_range_list, parse_ranges};
pub use scan::{enumerate_matches, matches_in, repeated_candidates, split_by_digit_count};
pub use scanner::{RangeScanner, ScanReport};
pub use types::range::{parse_bound, IdRange};
pub use types::repetition::Repetition;
pub use types::MatchSet;
