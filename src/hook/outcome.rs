//! Result of a hook invocation
//!
//! Hooks are best-effort and silent toward the orchestrator when they have
//! nothing to do. `Outcome` keeps the reason visible to callers and tests.

use std::fmt;
use std::path::PathBuf;

/// What a hook did
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// Nothing was done
    Skipped(SkipReason),
    /// The operation ran and produced `T`
    Applied(T),
}

impl<T> Outcome<T> {
    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            Self::Skipped(_) => None,
        }
    }

    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            Self::Skipped(reason) => Some(reason),
            Self::Applied(_) => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}

impl<T> From<SkipReason> for Outcome<T> {
    fn from(reason: SkipReason) -> Self {
        Self::Skipped(reason)
    }
}

/// Why a hook did nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Stdin was not a JSON object of the expected shape
    MalformedPayload,
    /// No `cwd` in the payload
    MissingProjectRoot,
    /// No `tool_input.file_path` in the payload
    MissingFilePath,
    /// Turned off in configuration
    Disabled,
    /// Target does not exist or is not a regular file
    NotARegularFile(PathBuf),
    /// Target exists but could not be read
    Unreadable(PathBuf),
    /// Target path cannot be stored as a JSON key
    NonUtf8Path(PathBuf),
    /// Target has no configured lint extension
    UnsupportedExtension(PathBuf),
    /// The store has no entries to compare against
    EmptyStore,
    /// Event kind or qualifier this hook does not act on
    UnhandledEvent(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedPayload => write!(f, "malformed hook payload"),
            Self::MissingProjectRoot => write!(f, "payload has no project root"),
            Self::MissingFilePath => write!(f, "payload has no file path"),
            Self::Disabled => write!(f, "disabled by configuration"),
            Self::NotARegularFile(path) => write!(f, "not a regular file: {}", path.display()),
            Self::Unreadable(path) => write!(f, "cannot read {}", path.display()),
            Self::NonUtf8Path(path) => write!(f, "path is not valid UTF-8: {}", path.display()),
            Self::UnsupportedExtension(path) => {
                write!(f, "no lint configured for {}", path.display())
            }
            Self::EmptyStore => write!(f, "cache is empty"),
            Self::UnhandledEvent(event) => write!(f, "unhandled event: {}", event),
        }
    }
}
