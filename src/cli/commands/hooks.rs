//! Hooks command - print the orchestrator hook wiring

use crate::config::Config;
use crate::error::CtxsyncResult;
use serde_json::{json, Value};

/// Tools whose file access is recorded
const RECORD_MATCHER: &str = "Read|Edit|Write|MultiEdit";

/// Tools whose output is linted
const LINT_MATCHER: &str = "Edit|Write|MultiEdit";

/// Execute the hooks command
pub async fn execute(config: &Config) -> CtxsyncResult<()> {
    let binary = std::env::current_exe()
        .map(|exe| exe.display().to_string())
        .unwrap_or_else(|_| "ctxsync".to_string());
    println!("{}", serde_json::to_string_pretty(&hook_settings(&binary, config))?);
    Ok(())
}

fn command(binary: &str, subcommand: &str) -> Value {
    json!({"type": "command", "command": format!("{} {}", binary, subcommand)})
}

/// Hook settings block wiring every hook subcommand to its event
pub fn hook_settings(binary: &str, config: &Config) -> Value {
    let mut post_tool_use = vec![json!({
        "matcher": RECORD_MATCHER,
        "hooks": [command(binary, "record")]
    })];

    if config.lint.enabled {
        let mut lint = command(binary, "lint");
        // Must exceed the check and format timeouts combined
        lint["timeout"] = json!(config.lint.timeout_secs * 2 + 5);
        post_tool_use.push(json!({"matcher": LINT_MATCHER, "hooks": [lint]}));
    }

    json!({
        "hooks": {
            "PostToolUse": post_tool_use,
            "UserPromptSubmit": [{"hooks": [command(binary, "detect")]}],
            "SessionStart": [{"hooks": [command(binary, "lifecycle")]}],
            "SessionEnd": [{"hooks": [command(binary, "lifecycle")]}]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wires_every_event() {
        let settings = hook_settings("ctxsync", &Config::default());
        let hooks = &settings["hooks"];

        assert_eq!(hooks["PostToolUse"][0]["matcher"], RECORD_MATCHER);
        assert_eq!(hooks["PostToolUse"][0]["hooks"][0]["command"], "ctxsync record");
        assert_eq!(hooks["PostToolUse"][1]["hooks"][0]["command"], "ctxsync lint");
        assert_eq!(hooks["PostToolUse"][1]["hooks"][0]["timeout"], 65);
        assert_eq!(hooks["UserPromptSubmit"][0]["hooks"][0]["command"], "ctxsync detect");
        assert_eq!(hooks["SessionStart"][0]["hooks"][0]["command"], "ctxsync lifecycle");
        assert_eq!(hooks["SessionEnd"][0]["hooks"][0]["command"], "ctxsync lifecycle");
    }

    #[test]
    fn omits_lint_when_disabled() {
        let mut config = Config::default();
        config.lint.enabled = false;

        let settings = hook_settings("ctxsync", &config);
        assert_eq!(settings["hooks"]["PostToolUse"].as_array().unwrap().len(), 1);
    }
}
