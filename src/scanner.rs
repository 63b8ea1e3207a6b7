// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Batch scanning: parse range lists, enumerate, union and sum
//!
//! [`RangeScanner`] drives the whole pipeline for a list of range specs. Each
//! range is enumerated directly, or, when a [`MatchCache`] is supplied, the
//! cache is brought up to the widest bound once and every range is answered
//! with an ordered lookup.
//!
//! # Examples
//!
//! ```rust
//! use repscan::{RangeScanner, ScanConfig};
//!
//! let scanner = RangeScanner::new(ScanConfig::default());
//! let report = scanner.scan_lines(["11-22,95-115,998-1012"]).unwrap();
//! assert_eq!(report.sum(), 11 + 22 + 99 + 111 + 999 + 1010);
//!
//! let halves = RangeScanner::new(ScanConfig::halves());
//! let report = halves.scan_lines(["11-22,95-115,998-1012"]).unwrap();
//! assert_eq!(report.sum(), 11 + 22 + 99 + 1010);
//! ```

use tracing::{debug, info, warn};

use crate::cache::{MatchCache, RecordStore};
use crate::config::{InvalidRangePolicy, ScanConfig};
use crate::errors::{CacheError, RangeError, RepscanError};
use crate::input::parse_ranges;
use crate::scan::matches_in;
use crate::spans;
use crate::types::range::IdRange;
use crate::types::repetition::Repetition;
use crate::types::MatchSet;

/// Outcome of a batch scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    matches: MatchSet,
    ranges_scanned: usize,
    skipped: Vec<RangeError>,
    persist_failed: bool,
}

impl ScanReport {
    /// Distinct matches across all scanned ranges
    pub fn matches(&self) -> &MatchSet {
        &self.matches
    }

    pub fn into_matches(self) -> MatchSet {
        self.matches
    }

    /// Sum of the distinct matches
    pub fn sum(&self) -> u128 {
        self.matches.iter().map(|&id| u128::from(id)).sum()
    }

    /// Number of ranges that were scanned (skipped specs excluded)
    pub fn ranges_scanned(&self) -> usize {
        self.ranges_scanned
    }

    /// Range specs rejected under [`InvalidRangePolicy::Skip`]
    pub fn skipped(&self) -> &[RangeError] {
        &self.skipped
    }

    /// True when a cached scan computed new matches but could not save them
    pub fn persist_failed(&self) -> bool {
        self.persist_failed
    }
}

/// Scans range lists according to a [`ScanConfig`]
#[derive(Debug, Clone, Default)]
pub struct RangeScanner {
    config: ScanConfig,
}

impl RangeScanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Parses and scans every range in `lines`
    ///
    /// # Errors
    ///
    /// Under [`InvalidRangePolicy::Fail`], the first invalid range spec.
    pub fn scan_lines<I, S>(&self, lines: I) -> Result<ScanReport, RangeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = ScanReport::default();
        let ranges = self.collect_ranges(lines, &mut report)?;
        self.scan_into(&ranges, &mut report);
        Ok(report)
    }

    /// Scans already parsed ranges
    pub fn scan_ranges(&self, ranges: &[IdRange]) -> ScanReport {
        let mut report = ScanReport::default();
        self.scan_into(ranges, &mut report);
        report
    }

    /// Like [`scan_lines`](Self::scan_lines), but answers through `cache`
    ///
    /// The cache is extended once, to the widest upper bound in the batch that
    /// fits [`ScanConfig::cache_digit_limit`]; wider ranges are enumerated
    /// directly. A failed cache write does not fail the scan: the answer is
    /// still exact and [`ScanReport::persist_failed`] is set.
    ///
    /// # Errors
    ///
    /// Invalid range specs (under [`InvalidRangePolicy::Fail`]) and cache
    /// errors other than a failed write.
    pub fn scan_lines_cached<I, S, St>(
        &self,
        lines: I,
        cache: &MatchCache<St>,
    ) -> Result<ScanReport, RepscanError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        St: RecordStore,
    {
        let mut report = ScanReport::default();
        let ranges = self.collect_ranges(lines, &mut report)?;
        let repetition = self.config.repetition;
        let limit = self.config.cache_digit_limit;

        let span = spans::scan_ranges(ranges.len(), repetition, true);
        let _guard = span.enter();

        let widest = ranges
            .iter()
            .filter(|range| !range.is_empty())
            .map(IdRange::max_digits)
            .filter(|&digits| digits <= limit)
            .max();

        let known = match widest.map(|digits| cache.ensure_computed(digits)) {
            None => MatchSet::new(),
            Some(Ok(matches)) => matches,
            Some(Err(e @ CacheError::CachePersist { .. })) => {
                warn!(error = %e, "Match cache not saved, continuing with computed matches");
                report.persist_failed = true;
                e.into_matches().unwrap_or_default()
            }
            Some(Err(e)) => return Err(e.into()),
        };

        // The cache holds every repetition; halves are a subset of it
        let accepted =
            |id: &u64| repetition == Repetition::AtLeastTwice || repetition.is_match(*id);

        for &range in &ranges {
            if range.is_empty() {
                debug!(range = %range, "Skipping reversed range");
            } else if range.max_digits() > limit {
                debug!(range = %range, limit, "Range wider than cache limit, enumerating");
                report.matches.extend(matches_in(range, repetition));
            } else {
                report
                    .matches
                    .extend(known.range(range.start()..=range.end()).copied().filter(accepted));
            }
            report.ranges_scanned += 1;
        }

        info!(
            ranges = report.ranges_scanned,
            matches = report.matches.len(),
            skipped = report.skipped.len(),
            "Scanned ranges through match cache"
        );
        Ok(report)
    }

    fn collect_ranges<I, S>(
        &self,
        lines: I,
        report: &mut ScanReport,
    ) -> Result<Vec<IdRange>, RangeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ranges = Vec::new();
        for parsed in parse_ranges(lines) {
            match (parsed, self.config.invalid_ranges) {
                (Ok(range), _) => ranges.push(range),
                (Err(e), InvalidRangePolicy::Fail) => return Err(e),
                (Err(e), InvalidRangePolicy::Skip) => {
                    warn!(error = %e, "Skipping invalid range");
                    report.skipped.push(e);
                }
            }
        }
        Ok(ranges)
    }

    fn scan_into(&self, ranges: &[IdRange], report: &mut ScanReport) {
        let repetition = self.config.repetition;
        let span = spans::scan_ranges(ranges.len(), repetition, false);
        let _guard = span.enter();

        for &range in ranges {
            report.matches.extend(matches_in(range, repetition));
            report.ranges_scanned += 1;
        }

        info!(
            ranges = report.ranges_scanned,
            matches = report.matches.len(),
            skipped = report.skipped.len(),
            "Scanned ranges"
        );
    }
}
