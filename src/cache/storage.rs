//! File-backed response cache with TTL expiry
//!
//! Entries live at `<root>/<xx>/<sha256-hex>`; the file's modification time is
//! the write time used for expiry. Writes go through a temporary file in the
//! shard directory followed by an atomic rename, so readers only ever see a
//! complete value.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::PoisonError;
use std::time::{Duration, SystemTime};

use log::debug;

use super::key::entry_path;
use super::locks::LockTable;
use crate::error::CacheError;

type Result<T> = std::result::Result<T, CacheError>;

/// Durable, key-addressed store for raw API response bytes.
#[derive(Debug)]
pub struct ResponseCache {
    root: PathBuf,
    ttl: Duration,
    locks: LockTable,
}

impl ResponseCache {
    /// Open a cache rooted at `root`, creating the directory if needed.
    ///
    /// Fails when `ttl` is zero or the directory cannot be created.
    pub fn new(root: impl Into<PathBuf>, ttl: Duration) -> Result<Self> {
        if ttl.is_zero() {
            return Err(CacheError::InvalidTtl);
        }

        let root = root.into();
        std::fs::create_dir_all(&root)
            .map_err(|e| CacheError::Io(format!("Failed to create cache dir: {}", e)))?;

        Ok(Self {
            root,
            ttl,
            locks: LockTable::new(),
        })
    }

    /// Default cache location (`~/.cache/actrics` on Linux).
    pub fn default_dir() -> Result<PathBuf> {
        let base = dirs::cache_dir().ok_or(CacheError::NoCacheDir)?;
        Ok(base.join("actrics"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return a copy of the bytes stored under `key` if present and fresh.
    ///
    /// An entry older than the TTL is deleted and reported as a miss.
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = entry_path(&self.root, key);
        let lock = self.locks.lock_for(&path);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let modified = match std::fs::metadata(&path).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CacheError::Io(format!("Failed to stat entry: {}", e))),
        };

        // A modification time in the future counts as freshly written.
        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or(Duration::ZERO);
        if age > self.ttl {
            debug!("Cache entry expired ({:?} old), removing", age);
            let _ = std::fs::remove_file(&path);
            return Ok(None);
        }

        std::fs::read(&path)
            .map(Some)
            .map_err(|e| CacheError::Io(format!("Failed to read entry: {}", e)))
    }

    /// Store `data` under `key`, replacing any previous value atomically.
    pub fn set(&self, key: &str, data: &[u8]) -> Result<()> {
        let path = entry_path(&self.root, key);
        let lock = self.locks.lock_for(&path);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let shard_dir = path
            .parent()
            .ok_or_else(|| CacheError::Io("Cache entry has no parent directory".to_string()))?;
        std::fs::create_dir_all(shard_dir)
            .map_err(|e| CacheError::Io(format!("Failed to create shard dir: {}", e)))?;

        // The temp file is removed on drop if anything below fails.
        let mut tmp = tempfile::Builder::new()
            .prefix(".tmp-")
            .tempfile_in(shard_dir)
            .map_err(|e| CacheError::Io(format!("Failed to create temp file: {}", e)))?;
        tmp.write_all(data)
            .and_then(|_| tmp.flush())
            .map_err(|e| CacheError::Io(format!("Failed to write entry: {}", e)))?;
        tmp.persist(&path)
            .map_err(|e| CacheError::Io(format!("Failed to rename entry into place: {}", e)))?;

        Ok(())
    }

    /// Remove every entry by deleting the cache directory.
    ///
    /// Returns `false` when there was nothing to remove.
    pub fn clear_dir(root: &Path) -> Result<bool> {
        match std::fs::remove_dir_all(root) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CacheError::Io(format!("Failed to clear cache dir: {}", e))),
        }
    }

    #[cfg(test)]
    pub(crate) fn locks(&self) -> &LockTable {
        &self.locks
    }
}
