//! Orchestrator hook handlers
//!
//! | Hook | Event | Effect |
//! |------|-------|--------|
//! | [`recorder`] | PostToolUse (Read/Edit/Write/MultiEdit) | upsert file record |
//! | [`detector`] | UserPromptSubmit | report and refresh drifted records |
//! | [`lifecycle`] | SessionStart / SessionEnd | clear or keep the cache |
//! | [`lint`] | PostToolUse (Edit/Write/MultiEdit) | run the linter |
//!
//! Handlers return [`Outcome`]; a skip is never an error.

pub mod detector;
pub mod lifecycle;
pub mod lint;
pub mod outcome;
pub mod payload;
pub mod recorder;

pub use detector::DriftReport;
pub use lifecycle::{LifecycleEffect, SessionEvent};
pub use lint::LintReport;
pub use outcome::{Outcome, SkipReason};
pub use payload::{HookInput, HookOutput};
pub use recorder::Recorded;
