//! # Retriever
//!
//! Resolves a client-supplied name to a file directly inside the store.
//!
//! The name is attacker-controlled. It must be a single, plain path
//! component, and the candidate is inspected without following symlinks,
//! so nothing outside the store directory can be reached.

use std::fs;
use std::io::ErrorKind;

use super::errors::{StorageError, StorageResult};
use super::file::{RetrievedFile, PDF_MEDIA_TYPE};
use super::store::Store;

/// Cache lifetime granted to served files, in seconds
pub const CACHE_MAX_AGE_SECS: u32 = 3600;

/// Reads stored files back by name
#[derive(Debug, Clone)]
pub struct Retriever {
    store: Store,
}

impl Retriever {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Fetch the bytes of a stored file
    pub fn fetch(&self, name: &str) -> StorageResult<RetrievedFile> {
        validate_name(name)?;

        let path = self.store.entry_path(name);
        let metadata = match fs::symlink_metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StorageError::NotFound(name.to_string()))
            }
            Err(e) => return Err(StorageError::RetrievalFailed(format!("{}: {}", name, e))),
        };
        if !metadata.is_file() {
            return Err(StorageError::NotFound(name.to_string()));
        }

        let data = fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::NotFound(name.to_string()),
            _ => StorageError::RetrievalFailed(format!("{}: {}", name, e)),
        })?;

        Ok(RetrievedFile {
            name: name.to_string(),
            data,
            media_type: PDF_MEDIA_TYPE,
            cache_max_age_secs: CACHE_MAX_AGE_SECS,
        })
    }
}

/// Reject anything that is not a plain single path component
fn validate_name(name: &str) -> StorageResult<()> {
    let rejected = name.is_empty()
        || name == "."
        || name.contains("..")
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0');

    if rejected {
        tracing::warn!(name = %name, "rejected unsafe filename");
        return Err(StorageError::InvalidName(name.to_string()));
    }
    Ok(())
}
