//! Lint hook - run the linter on an edited file and relay its output

use super::log_skip;
use crate::config::Config;
use crate::error::CtxsyncResult;
use crate::hook::{lint, HookInput, Outcome};

/// Execute the lint hook
///
/// Linter output goes to stderr, which the orchestrator shows as diagnostics.
/// Check findings are relayed before a format step failure is returned.
pub async fn execute(input: &HookInput, config: &Config) -> CtxsyncResult<()> {
    match lint::handle(input, config).await? {
        Outcome::Applied(mut report) => {
            eprintln!("{}", report.render());
            if let Some(e) = report.take_error() {
                return Err(e);
            }
        }
        Outcome::Skipped(reason) => log_skip("lint", input, &reason),
    }

    Ok(())
}
