//! # File Storage Errors

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Coarse error classes used to decide how a failure is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Bad input from the caller (4xx, never retried)
    ClientInput,
    /// Addressed file does not exist (404, terminal)
    NotFound,
    /// Filesystem failure (5xx, detail goes to the log only)
    Storage,
}

/// File storage errors
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    // Validation errors
    #[error("No file provided")]
    MissingFile,

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("File too large: {0} bytes (max: {1})")]
    PayloadTooLarge(u64, u64),

    #[error("Invalid filename: {0}")]
    InvalidName(String),

    #[error("Malformed upload: {0}")]
    MalformedUpload(String),

    // Lookup errors
    #[error("File not found: {0}")]
    NotFound(String),

    // I/O errors
    #[error("Storage write failed: {0}")]
    StorageWriteFailed(String),

    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Retrieval failed: {0}")]
    RetrievalFailed(String),
}

impl StorageError {
    /// Error class of this failure
    pub fn class(&self) -> ErrorClass {
        match self {
            StorageError::MissingFile
            | StorageError::UnsupportedMediaType(_)
            | StorageError::PayloadTooLarge(_, _)
            | StorageError::InvalidName(_)
            | StorageError::MalformedUpload(_) => ErrorClass::ClientInput,
            StorageError::NotFound(_) => ErrorClass::NotFound,
            StorageError::StorageWriteFailed(_)
            | StorageError::CatalogUnavailable(_)
            | StorageError::RetrievalFailed(_) => ErrorClass::Storage,
        }
    }

    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self.class() {
            ErrorClass::ClientInput => 400,
            ErrorClass::NotFound => 404,
            ErrorClass::Storage => 500,
        }
    }

    /// Message safe to show to a client.
    ///
    /// Storage failures collapse to a generic message; the detailed cause is
    /// only available through `Display` and belongs in the operational log.
    pub fn client_message(&self) -> &'static str {
        match self {
            StorageError::MissingFile => "No file provided",
            StorageError::UnsupportedMediaType(_) => "Only PDF files are allowed",
            StorageError::PayloadTooLarge(_, _) => "File size exceeds 50MB limit",
            StorageError::InvalidName(_) => "Invalid filename",
            StorageError::MalformedUpload(_) => "Malformed upload request",
            StorageError::NotFound(_) => "File not found",
            StorageError::StorageWriteFailed(_) => "Failed to upload file",
            StorageError::CatalogUnavailable(_) => "Failed to list uploaded PDFs",
            StorageError::RetrievalFailed(_) => "Failed to serve file",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(StorageError::MissingFile.status_code(), 400);
        assert_eq!(StorageError::PayloadTooLarge(100, 50).status_code(), 400);
        assert_eq!(StorageError::InvalidName("..".into()).status_code(), 400);
        assert_eq!(StorageError::NotFound("x.pdf".into()).status_code(), 404);
        assert_eq!(StorageError::CatalogUnavailable("eacces".into()).status_code(), 500);
    }

    #[test]
    fn test_storage_errors_hide_detail() {
        let err = StorageError::StorageWriteFailed("No space left on device".into());
        assert_eq!(err.client_message(), "Failed to upload file");
        assert!(err.to_string().contains("No space left on device"));
    }
}
