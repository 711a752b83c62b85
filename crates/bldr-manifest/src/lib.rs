//! Bldr block manifest management
//!
//! This crate keeps the block manifest (a YAML list of block class names the
//! host application auto-loads) in sync with the packages that are installed.
//! Package lifecycle events are routed through [`EventRouter`] to a
//! [`ManifestSynchronizer`], which registers or unregisters the class a
//! package advertises under its `block-class` extra metadata.

#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod errors;
pub mod events;
pub mod manifest;
pub mod package;
pub mod sync;

pub use errors::ManifestError;
pub use events::{
    subscribed_events, EventKind, EventRouter, Handler, LifecycleEvent, UnknownEventKind,
};
pub use manifest::BlockManifest;
pub use package::{PackageRef, BLOCK_CLASS_KEY};
pub use sync::{ManifestSynchronizer, SkipReason, SyncOutcome};
