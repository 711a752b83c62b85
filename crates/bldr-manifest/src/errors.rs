use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during block manifest operations
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read block manifest {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed block manifest {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to serialize block manifest: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("Failed to write block manifest {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
