//! Record hook - remember the state of a file the agent touched

use super::log_skip;
use crate::config::Config;
use crate::error::CtxsyncResult;
use crate::hook::{recorder, HookInput, Outcome};
use tracing::debug;

/// Execute the record hook
pub async fn execute(input: &HookInput, config: &Config) -> CtxsyncResult<()> {
    match recorder::handle(input, config).await? {
        Outcome::Applied(recorded) => {
            if recorded.replaced.is_some() {
                debug!("Updated existing entry for {}", recorded.path.display());
            }
        }
        Outcome::Skipped(reason) => log_skip("record", input, &reason),
    }

    Ok(())
}
