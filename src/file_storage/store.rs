//! # Store Directory
//!
//! The store is one flat directory. Finished uploads live directly inside it;
//! in-flight uploads are staged in a hidden subdirectory on the same
//! filesystem so they can be renamed into place atomically.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{StorageError, StorageResult};

/// Name of the staging subdirectory inside the store
pub const STAGING_DIR_NAME: &str = ".staging";

/// Store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding uploaded files
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
        }
    }
}

/// Handle on the store directory.
///
/// Cheap to clone; holds only the path. Nothing is created until
/// [`Store::ensure_ready`] is called.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Create a store handle rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a store handle from configuration
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.upload_dir.clone())
    }

    /// Store directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Staging directory for in-flight writes
    pub fn staging_dir(&self) -> PathBuf {
        self.root.join(STAGING_DIR_NAME)
    }

    /// Path of a stored file. `name` must already be validated as a single
    /// path component.
    pub(crate) fn entry_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Create the store and staging directories if absent. Idempotent.
    ///
    /// Only the write path calls this; listing and retrieval never create
    /// directories.
    pub fn ensure_ready(&self) -> StorageResult<()> {
        fs::create_dir_all(self.staging_dir()).map_err(|e| {
            StorageError::StorageWriteFailed(format!(
                "cannot create store directory {}: {}",
                self.root.display(),
                e
            ))
        })
    }
}
