// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the persistent match cache.
//!
//! Load failures never surface here: the cache treats an unreadable or corrupt
//! record as absent. What does surface is a failed write, and that error hands
//! back the matches that were computed before the write was attempted.

use std::fmt;

use crate::MatchSet;

/// Matches recovered from a failed cache write.
///
/// Wrapped so that `Debug` output of an error stays short even when the set
/// holds thousands of ids.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct RecoveredMatches(pub MatchSet);

impl fmt::Debug for RecoveredMatches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecoveredMatches")
            .field("len", &self.0.len())
            .finish()
    }
}

/// Errors that can occur while extending or persisting the match cache.
///
/// # Examples
///
/// ```rust,ignore
/// use repscan::{CacheError, DiskStore, MatchCache};
///
/// let cache = MatchCache::new(DiskStore::new("cache/matches.json"));
/// let matches = match cache.ensure_computed(8) {
///     Ok(matches) => matches,
///     Err(e @ CacheError::CachePersist { .. }) => {
///         eprintln!("cache not saved: {e}");
///         e.into_matches().unwrap_or_default()
///     }
///     Err(e) => return Err(e.into()),
/// };
/// ```
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The requested digit length is wider than the scanner supports.
    #[error("Unsupported digit length {requested}: at most {max} digits are supported")]
    UnsupportedDigitLength {
        /// Digit length the caller asked for
        requested: u32,
        /// Widest supported digit length
        max: u32,
    },

    /// Error reading from or writing to the cache store.
    #[error("Cache I/O error at {path}: {details}")]
    CacheIo {
        /// Path to the cache file that caused the error
        path: String,
        /// Details about the I/O error
        details: String,
        /// The underlying I/O error, if available
        #[source]
        source: Option<std::io::Error>,
    },

    /// Error serializing or deserializing a cache record.
    #[error("Serialization error: {details}")]
    Serialization {
        /// Details about the serialization error
        details: String,
        /// The underlying serialization error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An extended record could not be persisted.
    ///
    /// The in-memory answer is still correct and travels with the error; the
    /// next query recomputes the extension.
    #[error("Failed to persist match cache: {source}")]
    CachePersist {
        /// The store error that prevented the write
        #[source]
        source: Box<CacheError>,
        /// Matches computed before the write failed
        matches: RecoveredMatches,
    },
}

impl CacheError {
    /// Create an `UnsupportedDigitLength` error.
    pub fn unsupported_digit_length(requested: u32, max: u32) -> Self {
        CacheError::UnsupportedDigitLength { requested, max }
    }

    /// Create a `CacheIo` error from a path, details and optional I/O error.
    pub fn cache_io(
        path: impl Into<String>,
        details: impl Into<String>,
        source: Option<std::io::Error>,
    ) -> Self {
        CacheError::CacheIo {
            path: path.into(),
            details: details.into(),
            source,
        }
    }

    /// Create a `Serialization` error from any serialization error.
    pub fn serialization(
        details: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        CacheError::Serialization {
            details: details.into(),
            source: Box::new(source),
        }
    }

    /// Wrap a store error raised while persisting `matches`.
    pub fn cache_persist(source: CacheError, matches: MatchSet) -> Self {
        CacheError::CachePersist {
            source: Box::new(source),
            matches: RecoveredMatches(matches),
        }
    }

    /// Matches carried by a `CachePersist` error, if any.
    pub fn into_matches(self) -> Option<MatchSet> {
        match self {
            CacheError::CachePersist { matches, .. } => Some(matches.0),
            _ => None,
        }
    }

    /// Returns true if this error still carries a usable answer.
    pub fn is_persist_failure(&self) -> bool {
        matches!(self, CacheError::CachePersist { .. })
    }
}
