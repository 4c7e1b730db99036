//! Drift detection over recorded files
//!
//! Each stored entry is re-checked on every prompt:
//!
//! | On disk | Mtime | Result |
//! |---------|-------|--------|
//! | missing / not a file | - | deleted, pruned |
//! | present | equal | unchanged, record kept, no hashing |
//! | present | differs | rehashed; changed if the digest differs, record refreshed either way |
//! | unreadable | - | record kept, not reported |
//!
//! The mtime check is trusted: a content change that keeps the old mtime
//! goes unnoticed.

use crate::config::Config;
use crate::error::CtxsyncResult;
use crate::hook::outcome::{Outcome, SkipReason};
use crate::hook::payload::{HookInput, HookOutput};
use crate::store::paths::display_relative;
use crate::store::record::modified_secs;
use crate::store::{fingerprint_file, CacheStore, FileRecord};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

const REPORT_HEADER: &str = "The following files have been modified externally:";
const REPORT_TRAILER: &str = "Please check the current state of these files.";

/// Current state of one stored entry
#[derive(Debug, Clone, PartialEq)]
pub enum EntryState {
    /// Mtime matches the record
    Unchanged,
    /// Mtime moved but the content digest did not
    Touched(FileRecord),
    /// Content differs from the record
    Changed(FileRecord),
    /// No longer a regular file
    Deleted,
    /// Could not be inspected this time
    Unreadable,
}

/// Compare one stored record against the file on disk
pub async fn check_entry(path: &Path, record: &FileRecord) -> EntryState {
    let metadata = match fs::metadata(path).await {
        Ok(metadata) if metadata.is_file() => metadata,
        Ok(_) => return EntryState::Deleted,
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
            return EntryState::Deleted
        }
        Err(e) => {
            debug!("Cannot stat {}: {}", path.display(), e);
            return EntryState::Unreadable;
        }
    };

    let mtime = match modified_secs(&metadata) {
        Ok(mtime) => mtime,
        Err(e) => {
            debug!("Cannot read mtime of {}: {}", path.display(), e);
            return EntryState::Unreadable;
        }
    };

    // Exact comparison: the stored value is the same f64 read back
    if mtime == record.mtime {
        return EntryState::Unchanged;
    }

    match fingerprint_file(path).await {
        Ok(fingerprint) => {
            let fresh = FileRecord { fingerprint, mtime };
            if fresh.fingerprint == record.fingerprint {
                EntryState::Touched(fresh)
            } else {
                EntryState::Changed(fresh)
            }
        }
        Err(e) => {
            debug!("Cannot hash {}: {}", path.display(), e);
            EntryState::Unreadable
        }
    }
}

/// Files that drifted since they were recorded
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriftReport {
    pub changed: Vec<PathBuf>,
    pub deleted: Vec<PathBuf>,
}

impl DriftReport {
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.deleted.is_empty()
    }

    /// Human-readable message, paths shown relative to `root` where possible
    pub fn render(&self, root: &Path) -> String {
        let mut lines = vec![REPORT_HEADER.to_string()];

        for path in &self.changed {
            lines.push(format!("- {}", display_relative(path, root)));
        }
        for path in &self.deleted {
            lines.push(format!("- {} (deleted)", display_relative(path, root)));
        }

        lines.push(String::new());
        lines.push(REPORT_TRAILER.to_string());
        lines.join("\n")
    }

    /// Hook output for this report, or `None` when nothing drifted
    pub fn hook_output(&self, root: &Path) -> Option<HookOutput> {
        if self.is_empty() {
            return None;
        }
        Some(HookOutput::prompt_context(self.render(root)))
    }
}

/// Result of checking every entry of a store
#[derive(Debug, Clone, Default)]
pub struct Scan {
    /// Store to persist: deleted entries pruned, moved entries refreshed
    pub store: CacheStore,
    pub report: DriftReport,
    /// Entries kept as-is because they could not be inspected
    pub unreadable: Vec<PathBuf>,
    /// Entries whose content had to be hashed
    pub hashed: usize,
}

/// Check every entry of `store` and build its successor
pub async fn scan(store: CacheStore) -> Scan {
    let mut result = Scan::default();
    let mut next = Vec::with_capacity(store.len());

    for (path, record) in store {
        match check_entry(&path, &record).await {
            EntryState::Unchanged => next.push((path, record)),
            EntryState::Touched(fresh) => {
                result.hashed += 1;
                next.push((path, fresh));
            }
            EntryState::Changed(fresh) => {
                result.hashed += 1;
                result.report.changed.push(path.clone());
                next.push((path, fresh));
            }
            EntryState::Deleted => result.report.deleted.push(path),
            EntryState::Unreadable => {
                result.unreadable.push(path.clone());
                next.push((path, record));
            }
        }
    }

    result.store = next.into_iter().collect();
    result
}

/// Handle a prompt-submit payload
pub async fn handle(input: &HookInput, config: &Config) -> CtxsyncResult<Outcome<DriftReport>> {
    if !config.cache.enabled {
        return Ok(SkipReason::Disabled.into());
    }

    match input.project_root() {
        Ok(root) => detect(&root).await,
        Err(reason) => Ok(reason.into()),
    }
}

/// Run a drift pass over the store for `root` and persist the result
pub async fn detect(root: &Path) -> CtxsyncResult<Outcome<DriftReport>> {
    let store = CacheStore::load(root).await;
    if store.is_empty() {
        return Ok(SkipReason::EmptyStore.into());
    }

    let checked = store.len();
    let scan = scan(store).await;
    scan.store.save(root).await?;

    if !scan.unreadable.is_empty() {
        debug!("Kept {} unreadable entries unchanged", scan.unreadable.len());
    }
    info!(
        "Checked {} files ({} hashed): {} changed, {} deleted",
        checked,
        scan.hashed,
        scan.report.changed.len(),
        scan.report.deleted.len()
    );

    Ok(Outcome::Applied(scan.report))
}
