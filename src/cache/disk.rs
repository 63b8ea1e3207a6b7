// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Disk-based record store with file locking and atomic writes

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::{debug, info};

use super::{CacheRecord, RecordStore, StoreLock};
use crate::errors::CacheError;

/// JSON file holding one [`CacheRecord`]
///
/// The record is read fully on every query and overwritten fully on every
/// extension:
/// - Writes go to a temp file that is renamed over the record, so readers
///   never see a half-written file
/// - A sibling `<file>.lock` carries an advisory exclusive lock for the whole
///   read-modify-write cycle, so separate processes sharing the file do not
///   lose each other's extensions
///
/// # Examples
///
/// ```rust,ignore
/// use repscan::{DiskStore, MatchCache};
///
/// let store = DiskStore::new("data/matches.json").validate()?;
/// let cache = MatchCache::new(store);
/// let matches = cache.ensure_computed(10)?;
/// ```
#[derive(Debug, Clone)]
pub struct DiskStore {
    path: PathBuf,
}

impl DiskStore {
    /// Creates a store backed by the file at `path`
    ///
    /// Nothing is touched on disk until the first I/O operation. Use
    /// [`validate()`](Self::validate) to check the path immediately.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".lock");
        PathBuf::from(name)
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    /// Validates the store path and creates the parent directory if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or is not writable.
    pub fn validate(self) -> Result<Self, CacheError> {
        let parent = self.parent_dir();

        ensure_dir(parent)?;

        // Validate parent is writable by attempting to create a temp file
        let test_file = parent.join(".repscan_write_test");
        std::fs::write(&test_file, b"test").map_err(|e| {
            CacheError::cache_io(
                parent.display().to_string(),
                format!("Cache directory is not writable: {e}"),
                Some(e),
            )
        })?;
        let _ = std::fs::remove_file(&test_file);

        debug!(path = %self.path.display(), "Cache path validated successfully");
        Ok(self)
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

fn ensure_dir(dir: &Path) -> Result<(), CacheError> {
    if dir.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(dir).map_err(|e| {
        CacheError::cache_io(
            dir.display().to_string(),
            format!("Failed to create cache directory: {e}. Ensure you have write permissions."),
            Some(e),
        )
    })?;
    debug!(path = %dir.display(), "Created cache directory");
    Ok(())
}

impl RecordStore for DiskStore {
    fn load(&self) -> Result<Option<CacheRecord>, CacheError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Cache file does not exist, using empty record");
            return Ok(None);
        }

        let file = File::open(&self.path).map_err(|e| {
            CacheError::cache_io(
                self.display_path(),
                format!("Failed to open cache file: {e}. Ensure the file is readable."),
                Some(e),
            )
        })?;

        let record: CacheRecord = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            CacheError::serialization(
                format!("Failed to parse cache file '{}'", self.path.display()),
                e,
            )
        })?;

        info!(
            path = %self.path.display(),
            computed_n = record.computed_n(),
            keys = record.computed_keys().len(),
            "Loaded match cache"
        );

        Ok(Some(record))
    }

    fn save(&self, record: &CacheRecord) -> Result<(), CacheError> {
        // Serialize first so a failure leaves the old file untouched
        let json = serde_json::to_vec(record)
            .map_err(|e| CacheError::serialization("Failed to serialize cache record", e))?;

        ensure_dir(self.parent_dir())?;

        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, &json).map_err(|e| {
            CacheError::cache_io(
                temp_path.display().to_string(),
                format!("Failed to write cache: {e}. Ensure the parent directory is writable."),
                Some(e),
            )
        })?;

        std::fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&temp_path);
            CacheError::cache_io(
                self.display_path(),
                format!(
                    "Failed to rename cache file from '{}': {e}",
                    temp_path.display()
                ),
                Some(e),
            )
        })?;

        debug!(
            path = %self.path.display(),
            computed_n = record.computed_n(),
            keys = record.computed_keys().len(),
            "Saved match cache"
        );

        Ok(())
    }

    fn lock(&self) -> Result<StoreLock, CacheError> {
        let lock_path = self.lock_path();
        ensure_dir(self.parent_dir())?;

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|e| {
                CacheError::cache_io(
                    lock_path.display().to_string(),
                    format!("Failed to open lock file: {e}"),
                    Some(e),
                )
            })?;

        // Blocks until other holders release
        file.lock_exclusive().map_err(|e| {
            CacheError::cache_io(
                lock_path.display().to_string(),
                format!("Failed to acquire write lock: {e}"),
                Some(e),
            )
        })?;

        Ok(StoreLock::held(file))
    }

    fn clear(&self) -> Result<(), CacheError> {
        debug!(path = %self.path.display(), "Clearing match cache");

        if self.path.exists() {
            std::fs::remove_file(&self.path).map_err(|e| {
                CacheError::cache_io(
                    self.display_path(),
                    format!("Failed to delete cache file: {e}"),
                    Some(e),
                )
            })?;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "DiskStore"
    }
}
