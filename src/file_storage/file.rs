//! # Stored Files

use std::fs::Metadata;
use std::io;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// The only media type the store accepts and serves
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Filename suffix used to recognise stored PDFs in a listing
pub const PDF_SUFFIX: &str = ".pdf";

/// A file persisted in the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredFile {
    /// Collision-resistant, sanitized name the file is addressed by
    pub stored_name: String,
    /// Client-supplied name. Only known at upload time; listings derive
    /// everything from the directory and leave this empty.
    pub original_name: Option<String>,
    pub size_bytes: u64,
    /// Birth time of the file on disk (modification time where the
    /// filesystem has none). Listings and upload results read it the same way.
    pub created_at: DateTime<Utc>,
}

/// Creation time of a stored file as reported by the filesystem
pub(crate) fn created_at(metadata: &Metadata) -> io::Result<DateTime<Utc>> {
    let time = metadata.created().or_else(|_| metadata.modified())?;
    Ok(DateTime::<Utc>::from(time))
}

/// Bytes read back from the store, with the metadata needed to serve them
#[derive(Debug, Clone)]
pub struct RetrievedFile {
    pub name: String,
    pub data: Vec<u8>,
    pub media_type: &'static str,
    /// How long a client may reuse the bytes; stored files never change
    pub cache_max_age_secs: u32,
}
