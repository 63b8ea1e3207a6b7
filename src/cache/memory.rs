// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory record store

use std::sync::{Mutex, PoisonError};

use super::{CacheRecord, RecordStore};
use crate::errors::CacheError;

/// Record store that lives only as long as the process
///
/// Useful when a run scans many ranges and wants the cache's range lookups
/// without writing anything to disk, and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: Mutex<Option<CacheRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `record`
    pub fn with_record(record: CacheRecord) -> Self {
        Self {
            record: Mutex::new(Some(record)),
        }
    }

    /// Copy of the stored record, if any
    pub fn snapshot(&self) -> Option<CacheRecord> {
        self.record
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl RecordStore for MemoryStore {
    fn load(&self) -> Result<Option<CacheRecord>, CacheError> {
        Ok(self.snapshot())
    }

    fn save(&self, record: &CacheRecord) -> Result<(), CacheError> {
        *self.record.lock().unwrap_or_else(PoisonError::into_inner) = Some(record.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), CacheError> {
        *self.record.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "MemoryStore"
    }
}
