//! # Ingestor
//!
//! Validates an upload, derives its stored name and writes it into the store.
//!
//! Validation runs before any disk access, in a fixed order, and stops at the
//! first failure. The write itself goes through the staging directory and is
//! renamed into place, so a listing or fetch never observes a partial file.
//!
//! Two uploads with the same sanitized name in the same millisecond resolve
//! to the same stored name; the later rename wins.

use std::io::Write;

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

use super::errors::{StorageError, StorageResult};
use super::file::{created_at, StoredFile, PDF_MEDIA_TYPE};
use super::naming;
use super::store::Store;

/// Fixed upload ceiling: 50 MiB
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// An incoming upload, as declared by the client
#[derive(Debug, Clone, Copy)]
pub struct UploadRequest<'a> {
    /// `None` when the request carried no file at all
    pub payload: Option<&'a [u8]>,
    pub declared_media_type: &'a str,
    pub declared_name: &'a str,
    pub declared_size: u64,
}

impl<'a> UploadRequest<'a> {
    /// Build a request whose declared size is the payload length
    pub fn new(payload: &'a [u8], declared_media_type: &'a str, declared_name: &'a str) -> Self {
        Self {
            payload: Some(payload),
            declared_media_type,
            declared_name,
            declared_size: payload.len() as u64,
        }
    }
}

/// Writes validated uploads into the store
#[derive(Debug, Clone)]
pub struct Ingestor {
    store: Store,
}

impl Ingestor {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Store an upload using the current time for its name
    pub fn store(&self, request: UploadRequest<'_>) -> StorageResult<StoredFile> {
        self.store_at(request, Utc::now())
    }

    /// Store an upload, naming it after `now`
    pub fn store_at(
        &self,
        request: UploadRequest<'_>,
        now: DateTime<Utc>,
    ) -> StorageResult<StoredFile> {
        let payload = Self::validate(&request)?;

        let stored_name = naming::stored_name(now.timestamp_millis(), request.declared_name);
        let created_at = self.write_atomically(&stored_name, payload)?;

        tracing::info!(
            stored_name = %stored_name,
            original_name = %request.declared_name,
            size = payload.len(),
            "stored upload"
        );

        Ok(StoredFile {
            stored_name,
            original_name: Some(request.declared_name.to_string()),
            size_bytes: payload.len() as u64,
            created_at,
        })
    }

    fn validate<'a>(request: &UploadRequest<'a>) -> StorageResult<&'a [u8]> {
        let payload = request.payload.ok_or(StorageError::MissingFile)?;

        if request.declared_media_type != PDF_MEDIA_TYPE {
            return Err(StorageError::UnsupportedMediaType(
                request.declared_media_type.to_string(),
            ));
        }

        if request.declared_size > MAX_UPLOAD_BYTES {
            return Err(StorageError::PayloadTooLarge(
                request.declared_size,
                MAX_UPLOAD_BYTES,
            ));
        }

        Ok(payload)
    }

    /// Write `data` under `stored_name` and return the file's creation time
    fn write_atomically(&self, stored_name: &str, data: &[u8]) -> StorageResult<DateTime<Utc>> {
        self.store.ensure_ready()?;

        let write_failed =
            |e: std::io::Error| StorageError::StorageWriteFailed(format!("{}: {}", stored_name, e));

        // Dropping the temp file on any early return removes it.
        let mut staged = NamedTempFile::new_in(self.store.staging_dir()).map_err(write_failed)?;
        staged.write_all(data).map_err(write_failed)?;
        staged.as_file().sync_all().map_err(write_failed)?;

        let persisted = staged
            .persist(self.store.entry_path(stored_name))
            .map_err(|e| write_failed(e.error))?;

        let metadata = persisted.metadata().map_err(write_failed)?;
        created_at(&metadata).map_err(write_failed)
    }
}
