//! Manifest synchronization
//!
//! Keeps the on-disk block manifest consistent with the set of installed
//! packages. Every call is a full read-modify-write of the manifest file; the
//! caller is expected to serialize calls for a given manifest path.

use bldr_config::LoaderConfig;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::errors::ManifestError;
use crate::manifest::BlockManifest;
use crate::package::PackageRef;

// =============================================================================
// SYNC OUTCOME
// =============================================================================

/// Why a register/unregister call left the manifest untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The package declares no block class
    NoBlockClass,
    /// Register found the entry already listed
    AlreadyRegistered,
    /// Unregister found no such entry
    NotRegistered,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoBlockClass => write!(f, "no block class declared"),
            SkipReason::AlreadyRegistered => write!(f, "already registered"),
            SkipReason::NotRegistered => write!(f, "not registered"),
        }
    }
}

/// Result of a register/unregister call that got past parsing the manifest
#[derive(Debug)]
pub enum SyncOutcome {
    Skipped(SkipReason),
    Written { entry: String, bytes: usize },
    WriteFailed { entry: String, error: ManifestError },
}

impl SyncOutcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, SyncOutcome::Written { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, SyncOutcome::WriteFailed { .. })
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            SyncOutcome::Skipped(reason) => Some(*reason),
            _ => None,
        }
    }
}

// =============================================================================
// SYNCHRONIZER
// =============================================================================

#[derive(Debug, Clone)]
pub struct ManifestSynchronizer {
    config: LoaderConfig,
}

impl ManifestSynchronizer {
    /// Build a synchronizer for the manifest named by `config`.
    ///
    /// Creates an empty manifest file if none exists. A failure to do so is
    /// only logged; it resurfaces on the first read or write.
    pub fn new(config: LoaderConfig) -> Self {
        let path = config.manifest_path();
        match BlockManifest::ensure_exists(path) {
            Ok(true) => debug!("Created empty block manifest at {}", path.display()),
            Ok(false) => {}
            Err(e) => warn!(
                "Could not create block manifest at {}: {}",
                path.display(),
                e
            ),
        }
        Self { config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn manifest_path(&self) -> &Path {
        self.config.manifest_path()
    }

    pub fn load_manifest(&self) -> Result<BlockManifest, ManifestError> {
        BlockManifest::load_from_path(self.manifest_path())
    }

    /// Add the package's block class to the manifest
    pub fn register(&self, package: &PackageRef) -> Result<SyncOutcome, ManifestError> {
        match package.block_class() {
            Some(class) => self.register_class(class),
            None => {
                debug!("Package {} has no block class, skipping register", package.name);
                Ok(SyncOutcome::Skipped(SkipReason::NoBlockClass))
            }
        }
    }

    /// Remove the package's block class from the manifest
    pub fn unregister(&self, package: &PackageRef) -> Result<SyncOutcome, ManifestError> {
        match package.block_class() {
            Some(class) => self.unregister_class(class),
            None => {
                debug!("Package {} has no block class, skipping unregister", package.name);
                Ok(SyncOutcome::Skipped(SkipReason::NoBlockClass))
            }
        }
    }

    pub fn register_class(&self, class: &str) -> Result<SyncOutcome, ManifestError> {
        let mut manifest = self.load_manifest()?;

        if !manifest.insert(class) {
            debug!("Block {} already registered", class);
            return Ok(SyncOutcome::Skipped(SkipReason::AlreadyRegistered));
        }

        info!("Registering block {}", class);
        Ok(self.persist(&manifest, class))
    }

    pub fn unregister_class(&self, class: &str) -> Result<SyncOutcome, ManifestError> {
        let mut manifest = self.load_manifest()?;

        let removed = manifest.remove(class);
        if removed == 0 {
            debug!("Block {} not registered", class);
            return Ok(SyncOutcome::Skipped(SkipReason::NotRegistered));
        }
        if removed > 1 {
            warn!(
                "Block {} was listed {} times in {}; removed all occurrences",
                class,
                removed,
                self.manifest_path().display()
            );
        }

        info!("Unregistering block {}", class);
        Ok(self.persist(&manifest, class))
    }

    fn persist(&self, manifest: &BlockManifest, class: &str) -> SyncOutcome {
        match manifest.save_to_path(self.manifest_path()) {
            Ok(bytes) => {
                debug!(
                    "Wrote {} bytes to {} ({} blocks)",
                    bytes,
                    self.manifest_path().display(),
                    manifest.len()
                );
                SyncOutcome::Written {
                    entry: class.to_string(),
                    bytes,
                }
            }
            Err(error) => {
                debug!("Write failed: {}", error);
                SyncOutcome::WriteFailed {
                    entry: class.to_string(),
                    error,
                }
            }
        }
    }
}
