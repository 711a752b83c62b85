use bldr_logger as logger;
use bldr_manifest::SyncOutcome;

pub mod blocks;
pub mod config;
pub mod hook;

/// Tell the user what a register/unregister call did.
///
/// A failed write is only a warning: the surrounding package operation must
/// not be aborted because the manifest could not be updated.
pub fn report_outcome(outcome: &SyncOutcome, registering: bool) {
    let verb = if registering { "register" } else { "unregister" };
    match outcome {
        SyncOutcome::Written { entry, bytes } => {
            logger::debug(&format!("Wrote {} bytes", bytes));
            logger::success(&format!("{}ed block {}", capitalize(verb), entry));
        }
        SyncOutcome::Skipped(reason) => {
            logger::info(&format!("Block manifest unchanged: {}", reason));
        }
        SyncOutcome::WriteFailed { entry, error } => {
            logger::warn(&format!("Could not {} block {}: {}", verb, entry, error));
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
