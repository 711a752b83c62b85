//! Block manifest model and persistence
//!
//! The manifest is a YAML sequence of fully-qualified block class names.
//! Entry order is registration order.

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::ManifestError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockManifest {
    entries: Vec<String>,
}

impl BlockManifest {
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    /// Create an empty manifest file at `path` if nothing exists there yet.
    ///
    /// Returns `true` when the file was created. Existing content is never
    /// touched.
    pub fn ensure_exists(path: &Path) -> io::Result<bool> {
        if path.try_exists()? {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        OpenOptions::new().create(true).append(true).open(path)?;
        Ok(true)
    }

    /// Load manifest from a specific path.
    ///
    /// A missing, empty or `null` document yields an empty manifest. Any other
    /// read failure is a `Read` error, and anything that is not a YAML
    /// sequence of strings is a parse error.
    pub fn load_from_path(path: &Path) -> Result<Self, ManifestError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Block manifest {} not found, treating as empty", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ManifestError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Self::from_yaml_str(&content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let entries: Option<Vec<String>> = serde_yaml::from_str(content)?;
        Ok(Self::new(entries.unwrap_or_default()))
    }

    pub fn to_yaml_string(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.entries)
    }

    /// Save manifest to a specific path with atomic write, returning the
    /// number of bytes written.
    ///
    /// A symlinked manifest is written through: the link stays in place and
    /// its target receives the new content.
    pub fn save_to_path(&self, path: &Path) -> Result<usize, ManifestError> {
        let content = self.to_yaml_string()?;
        let write_err = |source| ManifestError::Write {
            path: path.to_path_buf(),
            source,
        };

        let target = resolve_write_target(path).map_err(write_err)?;
        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        // Atomic write: write to temp file then rename
        let temp_path = temp_path_for(&target);
        let written = write_file(&temp_path, content.as_bytes())
            .and_then(|()| fs::rename(&temp_path, &target));

        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(write_err(e));
        }

        Ok(content.len())
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, class: &str) -> bool {
        self.entries.iter().any(|e| e == class)
    }

    pub fn occurrences(&self, class: &str) -> usize {
        self.entries.iter().filter(|e| *e == class).count()
    }

    /// Append `class` unless it is already listed. Returns `true` if added.
    pub fn insert(&mut self, class: &str) -> bool {
        if self.contains(class) {
            return false;
        }
        self.entries.push(class.to_string());
        true
    }

    /// Remove every exact occurrence of `class`, keeping survivors in order.
    /// Returns how many entries were removed.
    pub fn remove(&mut self, class: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e != class);
        before - self.entries.len()
    }
}

/// The file a save should replace: the link target when `path` is a symlink,
/// `path` itself otherwise
fn resolve_write_target(path: &Path) -> io::Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => fs::canonicalize(path),
        Ok(_) => Ok(path.to_path_buf()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(path.to_path_buf()),
        Err(e) => Err(e),
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.flush()
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
