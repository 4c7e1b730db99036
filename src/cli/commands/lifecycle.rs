//! Lifecycle hook - reset the cache when a session starts fresh or ends

use super::log_skip;
use crate::error::CtxsyncResult;
use crate::hook::{lifecycle, HookInput, LifecycleEffect, Outcome};
use tracing::debug;

/// Execute the lifecycle hook
pub async fn execute(input: &HookInput) -> CtxsyncResult<()> {
    match lifecycle::handle(input).await? {
        Outcome::Applied(LifecycleEffect::Cleared { removed: false }) => {
            debug!("No cache to clear");
        }
        Outcome::Applied(_) => {}
        Outcome::Skipped(reason) => log_skip("lifecycle", input, &reason),
    }

    Ok(())
}
