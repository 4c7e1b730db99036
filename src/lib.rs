//! ctxsync - File change detection for AI agent sessions
//!
//! Records fingerprints of files an agent touches and warns the agent when
//! those files change or disappear behind its back.

pub mod cli;
pub mod config;
pub mod error;
pub mod hook;
pub mod store;

pub use error::{CtxsyncError, CtxsyncResult};
