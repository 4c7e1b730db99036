//! Detect hook - warn the agent about files changed behind its back

use super::log_skip;
use crate::config::Config;
use crate::error::CtxsyncResult;
use crate::hook::{detector, HookInput, Outcome};

/// Execute the detect hook
///
/// Writes a hook payload to stdout only when something drifted.
pub async fn execute(input: &HookInput, config: &Config) -> CtxsyncResult<()> {
    let root = match input.project_root() {
        Ok(root) => root,
        Err(reason) => {
            log_skip("detect", input, &reason);
            return Ok(());
        }
    };

    match detector::handle(input, config).await? {
        Outcome::Applied(report) => {
            if let Some(output) = report.hook_output(&root) {
                println!("{}", serde_json::to_string(&output)?);
            }
        }
        Outcome::Skipped(reason) => log_skip("detect", input, &reason),
    }

    Ok(())
}
