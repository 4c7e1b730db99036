//! Configuration schema for ctxsync
//!
//! Configuration is stored at `~/.config/ctxsync/config.toml`, with optional
//! per-project overrides in `.ctxsync.toml`.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// File state cache settings
    pub cache: CacheConfig,

    /// Linter hook settings
    pub lint: LintConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

impl GeneralConfig {
    /// Whether logs should be emitted as JSON lines
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

/// File state cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Record and detect file changes (default: true)
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Linter hook configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Run the linter after edits (default: true)
    pub enabled: bool,

    /// Linter executable
    pub program: String,

    /// File extensions to lint, without the leading dot
    pub extensions: Vec<String>,

    /// Wall-clock limit per linter invocation
    pub timeout_secs: u64,

    /// Pass `--fix` to the check step
    pub fix: bool,

    /// Run the format step after checking
    pub format: bool,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            program: "ruff".to_string(),
            extensions: vec!["py".to_string()],
            timeout_secs: 30,
            fix: true,
            format: true,
        }
    }
}
