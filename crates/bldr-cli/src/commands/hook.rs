//! Package manager hook: route one lifecycle event to the synchronizer

use crate::commands::report_outcome;
use crate::context::HookContext;
use crate::errors::CliError;
use crate::GlobalOpts;
use bldr_logger as logger;
use bldr_manifest::{EventRouter, LifecycleEvent};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

/// Read a lifecycle event as JSON from `source`, or stdin when `source` is
/// absent or `-`
pub fn read_event(source: Option<&Path>) -> Result<LifecycleEvent, CliError> {
    match source {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path)?;
            Ok(serde_json::from_reader(BufReader::new(file))?)
        }
        _ => Ok(serde_json::from_reader(io::stdin().lock())?),
    }
}

pub fn handle_hook(file: Option<PathBuf>, opts: &GlobalOpts) -> Result<(), CliError> {
    let event = read_event(file.as_deref())?;
    let ctx = HookContext::load(opts)?;
    let router = EventRouter::new();

    logger::debug(&format!(
        "Handling {} for {} (manifest: {})",
        event.kind,
        event.package.name,
        ctx.synchronizer.manifest_path().display()
    ));

    match router.dispatch(&ctx.synchronizer, &event)? {
        Some(outcome) => report_outcome(&outcome, event.kind.is_registration()),
        None => logger::info(&format!("Event {} is not handled", event.kind)),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bldr_manifest::EventKind;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_event_from_file() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let path = temp_dir.path().join("event.json");
        let json = r#"{
            "kind": "pre-update",
            "package": {"name": "acme/lint"},
            "initial": {"name": "acme/lint", "extra": {"block-class": "Acme\\Lint\\V1"}},
            "target": {"name": "acme/lint", "extra": {"block-class": "Acme\\Lint\\V2"}}
        }"#;
        assert!(fs::write(&path, json).is_ok());

        let event = read_event(Some(&path));
        assert!(event.is_ok_and(|e| e.kind == EventKind::PreUpdate
            && e.initial_package().block_class() == Some("Acme\\Lint\\V1")
            && e.target_package().block_class() == Some("Acme\\Lint\\V2")));
    }

    #[test]
    fn test_read_event_rejects_unknown_kind() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let path = temp_dir.path().join("event.json");
        let json = r#"{"kind": "post-autoload-dump", "package": {"name": "acme/lint"}}"#;
        assert!(fs::write(&path, json).is_ok());

        assert!(matches!(read_event(Some(&path)), Err(CliError::Event(_))));
    }
}
