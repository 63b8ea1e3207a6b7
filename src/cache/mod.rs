// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Persistent match cache
//!
//! [`MatchCache`] keeps a record of every repeated id up to a ceiling and
//! extends it on demand. The record lives behind a [`RecordStore`] handed in at
//! construction:
//!
//! - [`DiskStore`]: JSON file with atomic writes and an advisory lock
//! - [`MemoryStore`]: process-local, nothing persisted
//!
//! The cache only ever holds matches under
//! [`Repetition::AtLeastTwice`](crate::Repetition::AtLeastTwice).
//!
//! # Examples
//!
//! ```rust
//! use repscan::{IdRange, MatchCache, MemoryStore};
//!
//! let cache = MatchCache::new(MemoryStore::new());
//!
//! // Everything with at most four digits
//! let matches = cache.ensure_computed(4).unwrap();
//! assert_eq!(matches.len(), 108);
//!
//! // Answered by an ordered lookup, no further enumeration
//! let range: IdRange = "95-115".parse().unwrap();
//! let hits = cache.matches_in(range).unwrap();
//! assert_eq!(hits.into_iter().collect::<Vec<_>>(), vec![99, 111]);
//! assert_eq!(cache.stats().hits, 1);
//! ```

use std::fmt;
use std::fs::File;
use std::sync::{Mutex, PoisonError};

use tracing::{debug, info, warn};

use crate::config::constants::MAX_SUPPORTED_DIGITS;
use crate::errors::{CacheError, RecoveredMatches};
use crate::spans;
use crate::types::digits::max_with_digits;
use crate::types::range::IdRange;
use crate::types::MatchSet;

mod disk;
mod memory;
mod record;

pub use disk::DiskStore;
pub use memory::MemoryStore;
pub use record::CacheRecord;

/// Exclusive access to a store for one read-modify-write cycle
///
/// Released when dropped.
#[derive(Debug)]
pub struct StoreLock {
    file: Option<File>,
}

impl StoreLock {
    /// A lock that guards nothing, for stores without cross-process sharing
    pub fn unlocked() -> Self {
        Self { file: None }
    }

    /// A lock held through an open, locked file
    pub fn held(file: File) -> Self {
        Self { file: Some(file) }
    }

    pub fn is_held(&self) -> bool {
        self.file.is_some()
    }
}

/// Storage backend for the cache record
///
/// # Error Handling
///
/// `load` errors are never fatal: [`MatchCache`] logs them and starts from an
/// empty record. `save` errors surface to the caller together with the
/// computed answer.
pub trait RecordStore: Send + Sync {
    /// Reads the stored record, `Ok(None)` when nothing has been stored yet
    fn load(&self) -> Result<Option<CacheRecord>, CacheError>;

    /// Replaces the stored record
    fn save(&self, record: &CacheRecord) -> Result<(), CacheError>;

    /// Takes exclusive access across processes for a load/extend/save cycle
    fn lock(&self) -> Result<StoreLock, CacheError> {
        Ok(StoreLock::unlocked())
    }

    /// Deletes the stored record
    fn clear(&self) -> Result<(), CacheError>;

    /// Returns a human-readable name for this store, used in logs
    fn name(&self) -> &'static str;
}

/// Statistics about cache usage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Queries answered without extending the record
    pub hits: u64,
    /// Queries that raised the ceiling
    pub extensions: u64,
    /// Loads that found unreadable or inconsistent data and started over
    pub recovered_loads: u64,
    /// Extensions that could not be written back
    pub persist_failures: u64,
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={}, extensions={}, recovered_loads={}, persist_failures={}",
            self.hits, self.extensions, self.recovered_loads, self.persist_failures
        )
    }
}

/// Monotonically growing cache of repeated ids
///
/// Calls on one `MatchCache` are serialized; the store's lock serializes
/// separate processes sharing a [`DiskStore`] file.
#[derive(Debug)]
pub struct MatchCache<S> {
    store: S,
    stats: Mutex<CacheStats>,
}

impl<S: RecordStore> MatchCache<S> {
    /// Creates a cache over `store`
    pub fn new(store: S) -> Self {
        Self {
            store,
            stats: Mutex::new(CacheStats::default()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Guarantees the record covers every id with at most `max_digit_length`
    /// digits and returns all recorded matches
    ///
    /// Extensions are written back before returning.
    ///
    /// # Errors
    ///
    /// - [`CacheError::UnsupportedDigitLength`] above 19 digits
    /// - [`CacheError::CachePersist`] when the extended record could not be
    ///   written; the error carries the full answer (see
    ///   [`CacheError::into_matches`])
    pub fn ensure_computed(&self, max_digit_length: u32) -> Result<MatchSet, CacheError> {
        if max_digit_length > MAX_SUPPORTED_DIGITS {
            return Err(CacheError::unsupported_digit_length(
                max_digit_length,
                MAX_SUPPORTED_DIGITS,
            ));
        }

        let span = spans::ensure_computed(self.store.name(), max_digit_length);
        let _guard = span.enter();

        let mut stats = self.stats.lock().unwrap_or_else(PoisonError::into_inner);

        let _lock = self.store.lock().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to lock match cache, continuing without lock");
            StoreLock::unlocked()
        });

        let mut record = self.load_record(&mut stats);
        let ceiling = max_with_digits(max_digit_length);

        if record.covers(ceiling) {
            stats.hits += 1;
            debug!(
                computed_n = record.computed_n(),
                ceiling, "Match cache already covers ceiling"
            );
            return Ok(record.into_keys());
        }

        let from = record.computed_n();
        let added = {
            let span = spans::extend_record(from, ceiling);
            let _guard = span.enter();
            record.extend_to(ceiling)
        };
        stats.extensions += 1;

        info!(
            from,
            to = ceiling,
            added,
            total = record.computed_keys().len(),
            "Extended match cache"
        );

        if let Err(e) = self.store.save(&record) {
            stats.persist_failures += 1;
            warn!(error = %e, store = self.store.name(), "Failed to persist match cache");
            return Err(CacheError::cache_persist(e, record.into_keys()));
        }

        Ok(record.into_keys())
    }

    /// Recorded matches inside `range`, extending the record to the range's width
    ///
    /// # Errors
    ///
    /// Same as [`ensure_computed`](Self::ensure_computed); a `CachePersist`
    /// error carries only the matches inside `range`.
    pub fn matches_in(&self, range: IdRange) -> Result<MatchSet, CacheError> {
        if range.is_empty() {
            return Ok(MatchSet::new());
        }

        let within = |all: &MatchSet| -> MatchSet {
            all.range(range.start()..=range.end()).copied().collect()
        };

        match self.ensure_computed(range.max_digits()) {
            Ok(all) => Ok(within(&all)),
            Err(CacheError::CachePersist { source, matches }) => Err(CacheError::CachePersist {
                source,
                matches: RecoveredMatches(within(&matches.0)),
            }),
            Err(e) => Err(e),
        }
    }

    /// Deletes the stored record; the next query starts from scratch
    pub fn clear(&self) -> Result<(), CacheError> {
        let _stats = self.stats.lock().unwrap_or_else(PoisonError::into_inner);
        self.store.clear()
    }

    /// Returns current cache statistics
    pub fn stats(&self) -> CacheStats {
        self.stats
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn load_record(&self, stats: &mut CacheStats) -> CacheRecord {
        match self.store.load() {
            Ok(Some(record)) => match record.validate() {
                Ok(()) => record,
                Err(reason) => {
                    warn!(reason = %reason, "Discarding inconsistent match cache");
                    stats.recovered_loads += 1;
                    CacheRecord::new()
                }
            },
            Ok(None) => CacheRecord::new(),
            Err(e) => {
                warn!(error = %e, "Failed to load match cache, starting empty");
                stats.recovered_loads += 1;
                CacheRecord::new()
            }
        }
    }
}
