//! Project-local file state cache
//!
//! Maps absolute file paths to the fingerprint and mtime last observed for
//! them. The whole mapping lives in one JSON document under
//! `<root>/.cache-state/cache.json` and is always rewritten wholesale.
//!
//! # Read policy
//!
//! Loading never fails. A missing, unreadable or undecodable document is an
//! empty store; [`CacheStore::parse`] is the only place decoding can fail and
//! [`CacheStore::load`] is the only place that failure is discarded.
//!
//! # Write policy
//!
//! Saving writes a temp file next to the store and renames it into place.
//! Concurrent writers are not coordinated: the last rename wins.

pub mod paths;
pub mod record;

pub use record::{fingerprint_file, FileRecord};

use crate::error::{CtxsyncError, CtxsyncResult};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::debug;

/// Hidden directory holding the store, relative to the project root
pub const CACHE_DIR_NAME: &str = ".cache-state";

/// Store document name inside [`CACHE_DIR_NAME`]
pub const CACHE_FILE_NAME: &str = "cache.json";

/// Directory holding the store for `root`
pub fn cache_dir(root: &Path) -> PathBuf {
    root.join(CACHE_DIR_NAME)
}

/// Path of the store document for `root`
pub fn cache_path(root: &Path) -> PathBuf {
    cache_dir(root).join(CACHE_FILE_NAME)
}

/// The store document could not be decoded
#[derive(Debug, Error)]
#[error("invalid cache store: {0}")]
pub struct StoreParseError(#[from] serde_json::Error);

/// In-memory view of a project's file state cache
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheStore {
    entries: BTreeMap<PathBuf, FileRecord>,
}

impl CacheStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a store document
    pub fn parse(bytes: &[u8]) -> Result<Self, StoreParseError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Encode the store as a pretty-printed document
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load the store for `root`, falling back to an empty store
    pub async fn load(root: &Path) -> Self {
        let path = cache_path(root);

        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No cache store at {}", path.display());
                return Self::new();
            }
            Err(e) => {
                debug!("Cannot read cache store {}: {}", path.display(), e);
                return Self::new();
            }
        };

        match Self::parse(&bytes) {
            Ok(store) => {
                debug!("Loaded {} cache entries from {}", store.len(), path.display());
                store
            }
            Err(e) => {
                debug!("Treating {} as empty: {}", path.display(), e);
                Self::new()
            }
        }
    }

    /// Persist the store for `root`, replacing any previous document
    pub async fn save(&self, root: &Path) -> CtxsyncResult<()> {
        let dir = cache_dir(root);
        let path = cache_path(root);

        fs::create_dir_all(&dir)
            .await
            .map_err(|e| CtxsyncError::store_write(&dir, e))?;

        let content = self.to_json()?;

        let temp_path = dir.join(format!("{}.tmp.{}", CACHE_FILE_NAME, std::process::id()));
        if let Err(e) = fs::write(&temp_path, content).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(CtxsyncError::store_write(&path, e));
        }

        if let Err(e) = fs::rename(&temp_path, &path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(CtxsyncError::store_write(&path, e));
        }

        debug!("Saved {} cache entries to {}", self.len(), path.display());
        Ok(())
    }

    /// Remove the cache directory for `root`
    ///
    /// Returns whether anything was removed.
    pub async fn clear(root: &Path) -> CtxsyncResult<bool> {
        let dir = cache_dir(root);
        match fs::remove_dir_all(&dir).await {
            Ok(()) => {
                debug!("Removed cache directory {}", dir.display());
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CtxsyncError::StoreClear { path: dir, source: e }),
        }
    }

    /// Insert or replace the record for `path`
    pub fn upsert(&mut self, path: PathBuf, record: FileRecord) -> Option<FileRecord> {
        self.entries.insert(path, record)
    }

    pub fn get(&self, path: &Path) -> Option<&FileRecord> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in path order
    pub fn iter(&self) -> btree_map::Iter<'_, PathBuf, FileRecord> {
        self.entries.iter()
    }
}

impl IntoIterator for CacheStore {
    type Item = (PathBuf, FileRecord);
    type IntoIter = btree_map::IntoIter<PathBuf, FileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(PathBuf, FileRecord)> for CacheStore {
    fn from_iter<I: IntoIterator<Item = (PathBuf, FileRecord)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
