//! Error types for ctxsync
//!
//! All modules use `CtxsyncResult<T>` as their return type.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for ctxsync operations
pub type CtxsyncResult<T> = Result<T, CtxsyncError>;

/// All errors that can occur in ctxsync
#[derive(Error, Debug)]
pub enum CtxsyncError {
    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Store errors
    #[error("Failed to write cache store {path}: {source}")]
    StoreWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to clear cache directory {path}: {source}")]
    StoreClear {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Lint errors
    #[error("Linter not found: {program}")]
    LintToolMissing { program: String },

    #[error("Linter timed out after {}s: {program} {step} {file}", .timeout.as_secs())]
    LintTimeout {
        program: String,
        step: String,
        file: PathBuf,
        timeout: Duration,
    },

    #[error("Failed to run linter: {command}")]
    LintSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl CtxsyncError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a store write error
    pub fn store_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StoreWrite {
            path: path.into(),
            source,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::LintToolMissing { .. } => Some("Install it with: pip install ruff"),
            Self::LintTimeout { .. } => Some("Raise lint.timeout_secs in the config"),
            Self::StoreWrite { .. } => {
                Some("Check that the project directory is writable by the hook process")
            }
            _ => None,
        }
    }

    /// Process exit status for this error
    ///
    /// Status 2 tells the orchestrator the linter could not run at all,
    /// as opposed to having reported findings.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::LintToolMissing { .. } | Self::LintTimeout { .. } => 2,
            _ => 1,
        }
    }
}
