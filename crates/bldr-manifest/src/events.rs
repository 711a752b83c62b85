//! Package lifecycle events and their routing to the synchronizer
//!
//! The package manager emits one event per lifecycle transition. Each
//! subscribed kind maps to exactly one handler in an explicit table, built
//! once at startup.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

use crate::errors::ManifestError;
use crate::package::PackageRef;
use crate::sync::{ManifestSynchronizer, SyncOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    #[serde(alias = "pre-package-install")]
    PreInstall,
    #[serde(alias = "pre-package-update")]
    PreUpdate,
    #[serde(alias = "post-package-install")]
    PostInstall,
    #[serde(alias = "post-package-update")]
    PostUpdate,
    #[serde(alias = "post-package-uninstall")]
    PostUninstall,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::PreInstall,
        EventKind::PreUpdate,
        EventKind::PostInstall,
        EventKind::PostUpdate,
        EventKind::PostUninstall,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::PreInstall => "pre-install",
            EventKind::PreUpdate => "pre-update",
            EventKind::PostInstall => "post-install",
            EventKind::PostUpdate => "post-update",
            EventKind::PostUninstall => "post-uninstall",
        }
    }

    /// Whether handling this event adds a block rather than removing one
    pub fn is_registration(&self) -> bool {
        matches!(self, EventKind::PostInstall | EventKind::PostUpdate)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown lifecycle event: {0}")]
pub struct UnknownEventKind(pub String);

impl FromStr for EventKind {
    type Err = UnknownEventKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replacen("-package-", "-", 1);
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| UnknownEventKind(s.to_string()))
    }
}

/// A single lifecycle notification.
///
/// For update events `initial` is the package being replaced and `target` the
/// one replacing it; `package` is used when either is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleEvent {
    pub kind: EventKind,
    pub package: PackageRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<PackageRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<PackageRef>,
}

impl LifecycleEvent {
    pub fn new(kind: EventKind, package: PackageRef) -> Self {
        Self {
            kind,
            package,
            initial: None,
            target: None,
        }
    }

    pub fn update(kind: EventKind, initial: PackageRef, target: PackageRef) -> Self {
        Self {
            kind,
            package: target.clone(),
            initial: Some(initial),
            target: Some(target),
        }
    }

    pub fn initial_package(&self) -> &PackageRef {
        self.initial.as_ref().unwrap_or(&self.package)
    }

    pub fn target_package(&self) -> &PackageRef {
        self.target.as_ref().unwrap_or(&self.package)
    }
}

pub type Handler =
    fn(&ManifestSynchronizer, &LifecycleEvent) -> Result<SyncOutcome, ManifestError>;

fn on_pre_install(
    sync: &ManifestSynchronizer,
    event: &LifecycleEvent,
) -> Result<SyncOutcome, ManifestError> {
    sync.unregister(&event.package)
}

fn on_pre_update(
    sync: &ManifestSynchronizer,
    event: &LifecycleEvent,
) -> Result<SyncOutcome, ManifestError> {
    sync.unregister(event.initial_package())
}

fn on_post_install(
    sync: &ManifestSynchronizer,
    event: &LifecycleEvent,
) -> Result<SyncOutcome, ManifestError> {
    sync.register(&event.package)
}

fn on_post_update(
    sync: &ManifestSynchronizer,
    event: &LifecycleEvent,
) -> Result<SyncOutcome, ManifestError> {
    sync.register(event.target_package())
}

fn on_post_uninstall(
    sync: &ManifestSynchronizer,
    event: &LifecycleEvent,
) -> Result<SyncOutcome, ManifestError> {
    sync.unregister(&event.package)
}

/// Event kinds the hook subscribes to, with their handlers
pub fn subscribed_events() -> [(EventKind, Handler); 5] {
    [
        (EventKind::PreInstall, on_pre_install as Handler),
        (EventKind::PreUpdate, on_pre_update as Handler),
        (EventKind::PostInstall, on_post_install as Handler),
        (EventKind::PostUpdate, on_post_update as Handler),
        (EventKind::PostUninstall, on_post_uninstall as Handler),
    ]
}

pub struct EventRouter {
    handlers: AHashMap<EventKind, Handler>,
}

impl EventRouter {
    /// Router with every subscribed event bound
    pub fn new() -> Self {
        Self {
            handlers: subscribed_events().into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        Self {
            handlers: AHashMap::new(),
        }
    }

    /// Bind `handler` to `kind`, replacing any previous binding
    pub fn subscribe(&mut self, kind: EventKind, handler: Handler) {
        self.handlers.insert(kind, handler);
    }

    pub fn handler(&self, kind: EventKind) -> Option<Handler> {
        self.handlers.get(&kind).copied()
    }

    pub fn is_subscribed(&self, kind: EventKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Route `event` to its handler. `Ok(None)` means nothing is bound to the
    /// event's kind.
    pub fn dispatch(
        &self,
        sync: &ManifestSynchronizer,
        event: &LifecycleEvent,
    ) -> Result<Option<SyncOutcome>, ManifestError> {
        let Some(handler) = self.handler(event.kind) else {
            debug!("No handler bound for {}", event.kind);
            return Ok(None);
        };
        debug!("Dispatching {} for {}", event.kind, event.package.name);
        handler(sync, event).map(Some)
    }
}

impl Default for EventRouter {
    fn default() -> Self {
        Self::new()
    }
}
