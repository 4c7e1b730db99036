//! Orchestrator hook payloads
//!
//! Every hook receives one JSON object on stdin. Only the fields ctxsync
//! consumes are modelled; unknown fields are ignored.

use crate::hook::outcome::SkipReason;
use crate::store::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing::debug;

/// Event name the drift report is attached to
pub const PROMPT_SUBMIT_EVENT: &str = "UserPromptSubmit";

/// Hook input as sent by the orchestrator
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HookInput {
    /// Project root the session runs in
    #[serde(default)]
    pub cwd: Option<String>,

    /// Event that triggered the hook (e.g. "SessionStart")
    #[serde(default)]
    pub hook_event_name: Option<String>,

    /// Why a session started ("startup", "clear", "compact", "resume")
    #[serde(default)]
    pub source: Option<String>,

    /// Tool that was used, for tool-use events
    #[serde(default)]
    pub tool_name: Option<String>,

    /// Arguments the tool was called with
    #[serde(default)]
    pub tool_input: Option<ToolInput>,
}

/// Subset of tool arguments ctxsync reads
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolInput {
    #[serde(default)]
    pub file_path: Option<String>,
}

impl HookInput {
    /// Decode a payload
    pub fn parse(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Read and decode the payload from stdin
    pub async fn read_stdin() -> Result<Self, SkipReason> {
        let mut text = String::new();
        if let Err(e) = tokio::io::stdin().read_to_string(&mut text).await {
            debug!("Failed to read hook payload: {}", e);
            return Err(SkipReason::MalformedPayload);
        }

        Self::parse(&text).map_err(|e| {
            debug!("Failed to parse hook payload: {}", e);
            SkipReason::MalformedPayload
        })
    }

    /// Absolute, normalized project root
    pub fn project_root(&self) -> Result<PathBuf, SkipReason> {
        let cwd = self
            .cwd
            .as_deref()
            .filter(|cwd| !cwd.is_empty())
            .ok_or(SkipReason::MissingProjectRoot)?;

        paths::absolutize(Path::new(cwd)).map_err(|_| SkipReason::MissingProjectRoot)
    }

    /// Name of the tool that triggered the hook, or "-" outside tool events
    pub fn tool(&self) -> &str {
        self.tool_name.as_deref().unwrap_or("-")
    }

    /// The tool's target file, as given
    pub fn file_path(&self) -> Result<&Path, SkipReason> {
        self.tool_input
            .as_ref()
            .and_then(|input| input.file_path.as_deref())
            .filter(|path| !path.is_empty())
            .map(Path::new)
            .ok_or(SkipReason::MissingFilePath)
    }
}

/// Hook output written to stdout
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookOutput {
    pub hook_specific_output: HookSpecificOutput,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookSpecificOutput {
    pub hook_event_name: String,
    pub additional_context: String,
}

impl HookOutput {
    /// Extra context injected alongside a submitted prompt
    pub fn prompt_context(context: impl Into<String>) -> Self {
        Self {
            hook_specific_output: HookSpecificOutput {
                hook_event_name: PROMPT_SUBMIT_EVENT.to_string(),
                additional_context: context.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tool_use_payload() {
        let input = HookInput::parse(
            r#"{
                "session_id": "abc",
                "cwd": "/project",
                "hook_event_name": "PostToolUse",
                "tool_name": "Edit",
                "tool_input": {"file_path": "src/a.py", "old_string": "x"}
            }"#,
        )
        .unwrap();

        assert_eq!(input.project_root().unwrap(), PathBuf::from("/project"));
        assert_eq!(input.file_path().unwrap(), Path::new("src/a.py"));
        assert_eq!(input.tool(), "Edit");
    }

    #[test]
    fn missing_fields_are_skip_reasons() {
        let input = HookInput::parse("{}").unwrap();
        assert_eq!(input.project_root(), Err(SkipReason::MissingProjectRoot));
        assert_eq!(input.file_path(), Err(SkipReason::MissingFilePath));
        assert_eq!(input.tool(), "-");
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let input = HookInput::parse(r#"{"cwd": "", "tool_input": {"file_path": ""}}"#).unwrap();
        assert_eq!(input.project_root(), Err(SkipReason::MissingProjectRoot));
        assert_eq!(input.file_path(), Err(SkipReason::MissingFilePath));
    }

    #[test]
    fn null_tool_input_is_missing_path() {
        let input = HookInput::parse(r#"{"cwd": "/p", "tool_input": null}"#).unwrap();
        assert_eq!(input.file_path(), Err(SkipReason::MissingFilePath));
    }

    #[test]
    fn rejects_non_object() {
        assert!(HookInput::parse("not json").is_err());
        assert!(HookInput::parse(r#"{"cwd": 42}"#).is_err());
    }

    #[test]
    fn output_shape() {
        let output = HookOutput::prompt_context("hello");
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "hookSpecificOutput": {
                    "hookEventName": "UserPromptSubmit",
                    "additionalContext": "hello"
                }
            })
        );
    }
}
