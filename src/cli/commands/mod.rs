//! CLI command implementations

pub mod cache;
pub mod config;
pub mod detect;
pub mod hooks;
pub mod lifecycle;
pub mod lint;
pub mod record;

pub use cache::execute as cache;
pub use config::execute as config;
pub use detect::execute as detect;
pub use hooks::execute as hooks;
pub use lifecycle::execute as lifecycle;
pub use lint::execute as lint;
pub use record::execute as record;

use crate::error::{CtxsyncError, CtxsyncResult};
use crate::hook::{HookInput, SkipReason};
use crate::store::paths;
use std::path::PathBuf;
use tracing::debug;

fn log_skip(hook: &str, input: &HookInput, reason: &SkipReason) {
    debug!("{} skipped (tool {}): {}", hook, input.tool(), reason);
}

/// Resolve a `--project` argument, defaulting to the working directory
fn project_root(project: Option<PathBuf>) -> CtxsyncResult<PathBuf> {
    let dir = project.unwrap_or_else(|| PathBuf::from("."));
    paths::absolutize(&dir)
        .map_err(|e| CtxsyncError::io(format!("resolving {}", dir.display()), e))
}
