//! Record a file's observed state after the agent reads or writes it

use crate::config::Config;
use crate::error::CtxsyncResult;
use crate::hook::outcome::{Outcome, SkipReason};
use crate::hook::payload::HookInput;
use crate::store::{paths, CacheStore, FileRecord};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// A record written to the store
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    /// Normalized key the record was stored under
    pub path: PathBuf,
    /// The new record
    pub record: FileRecord,
    /// Record previously stored for the same path, if any
    pub replaced: Option<FileRecord>,
}

/// Handle a tool-use payload
pub async fn handle(input: &HookInput, config: &Config) -> CtxsyncResult<Outcome<Recorded>> {
    if !config.cache.enabled {
        return Ok(SkipReason::Disabled.into());
    }

    let root = match input.project_root() {
        Ok(root) => root,
        Err(reason) => return Ok(reason.into()),
    };
    let target = match input.file_path() {
        Ok(target) => target,
        Err(reason) => return Ok(reason.into()),
    };

    debug!("Recording {} after {}", target.display(), input.tool());
    record_file(&root, target).await
}

/// Fingerprint `target` and upsert it into the store for `root`
///
/// Relative targets resolve against `root`. Only a failed store write is an
/// error; every other problem is a skip.
pub async fn record_file(root: &Path, target: &Path) -> CtxsyncResult<Outcome<Recorded>> {
    let path = paths::normalize(root, target);

    if path.to_str().is_none() {
        return Ok(SkipReason::NonUtf8Path(path).into());
    }

    match fs::metadata(&path).await {
        Ok(metadata) if metadata.is_file() => {}
        _ => return Ok(SkipReason::NotARegularFile(path).into()),
    }

    let record = match FileRecord::observe(&path).await {
        Ok(record) => record,
        Err(e) => {
            debug!("Skipping {}: {}", path.display(), e);
            return Ok(SkipReason::Unreadable(path).into());
        }
    };

    let mut store = CacheStore::load(root).await;
    let replaced = store.upsert(path.clone(), record.clone());
    store.save(root).await?;

    info!("Recorded {} ({})", path.display(), record.fingerprint);
    Ok(Outcome::Applied(Recorded {
        path,
        record,
        replaced,
    }))
}
