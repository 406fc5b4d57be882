//! # PDF Shelf File Storage Module
//!
//! Upload storage over a single flat directory: the ingestor writes, the
//! catalog lists and the retriever reads back. All three share nothing but
//! the directory itself.

pub mod errors;
pub mod file;
pub mod store;
pub mod naming;
pub mod ingestor;
pub mod catalog;
pub mod retriever;

pub use errors::{ErrorClass, StorageError, StorageResult};
pub use file::{RetrievedFile, StoredFile, PDF_MEDIA_TYPE};
pub use store::{Store, StoreConfig};
pub use ingestor::{Ingestor, UploadRequest, MAX_UPLOAD_BYTES};
pub use catalog::Catalog;
pub use retriever::{Retriever, CACHE_MAX_AGE_SECS};
