//! Cache lifecycle across session boundaries
//!
//! - SessionStart (startup, clear, compact): delete the cache
//! - SessionStart (resume): keep the cache
//! - SessionEnd: delete the cache

use crate::error::CtxsyncResult;
use crate::hook::outcome::{Outcome, SkipReason};
use crate::hook::payload::HookInput;
use crate::store::CacheStore;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// Why a session started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartSource {
    Startup,
    Clear,
    Compact,
    Resume,
}

impl FromStr for StartSource {
    type Err = SkipReason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "startup" => Ok(Self::Startup),
            "clear" => Ok(Self::Clear),
            "compact" => Ok(Self::Compact),
            "resume" => Ok(Self::Resume),
            other => Err(SkipReason::UnhandledEvent(format!("SessionStart/{}", other))),
        }
    }
}

impl fmt::Display for StartSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Startup => "startup",
            Self::Clear => "clear",
            Self::Compact => "compact",
            Self::Resume => "resume",
        };
        write!(f, "{}", name)
    }
}

/// Session boundary event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Start(StartSource),
    End,
}

impl SessionEvent {
    /// Interpret the event fields of a payload
    pub fn from_fields(event: Option<&str>, source: Option<&str>) -> Result<Self, SkipReason> {
        match event {
            Some("SessionStart") => source
                .unwrap_or_default()
                .parse()
                .map(Self::Start),
            Some("SessionEnd") => Ok(Self::End),
            Some(other) => Err(SkipReason::UnhandledEvent(other.to_string())),
            None => Err(SkipReason::UnhandledEvent(String::new())),
        }
    }

    /// What to do with the cache for this event
    pub fn action(self) -> LifecycleAction {
        match self {
            Self::Start(StartSource::Resume) => LifecycleAction::Preserve,
            Self::Start(_) | Self::End => LifecycleAction::Clear,
        }
    }
}

impl fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start(source) => write!(f, "SessionStart/{}", source),
            Self::End => write!(f, "SessionEnd"),
        }
    }
}

/// Decision for the cache at a session boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    Clear,
    Preserve,
}

/// What the lifecycle hook did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEffect {
    /// Cache directory deleted; `removed` is false if there was none
    Cleared { removed: bool },
    /// Cache left as is
    Preserved,
}

/// Handle a session boundary payload
pub async fn handle(input: &HookInput) -> CtxsyncResult<Outcome<LifecycleEffect>> {
    let root = match input.project_root() {
        Ok(root) => root,
        Err(reason) => return Ok(reason.into()),
    };

    let event =
        match SessionEvent::from_fields(input.hook_event_name.as_deref(), input.source.as_deref()) {
            Ok(event) => event,
            Err(reason) => return Ok(reason.into()),
        };

    apply(&root, event).await.map(Outcome::Applied)
}

/// Apply the decision for `event` to the cache under `root`
pub async fn apply(root: &Path, event: SessionEvent) -> CtxsyncResult<LifecycleEffect> {
    match event.action() {
        LifecycleAction::Preserve => {
            info!("{}: keeping file cache", event);
            Ok(LifecycleEffect::Preserved)
        }
        LifecycleAction::Clear => {
            let removed = CacheStore::clear(root).await?;
            info!("{}: cleared file cache", event);
            Ok(LifecycleEffect::Cleared { removed })
        }
    }
}
