//! Upload HTTP Routes
//!
//! Endpoints for uploading, listing and serving stored PDFs.
//!
//! - `POST /upload` - multipart upload, field `file`
//! - `GET /uploaded-pdfs` - listing, newest first
//! - `GET /uploaded-pdfs/:filename` - raw bytes of one stored file

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        multipart::{MultipartError, MultipartRejection}, DefaultBodyLimit, Multipart,
        Path, State,
    },
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::{get, post},
    Json, Router,
};
use chrono::SecondsFormat;
use serde::Serialize;

use crate::file_storage::{
    Catalog, ErrorClass, Ingestor, RetrievedFile, Retriever, Store, StorageError,
    StorageResult, StoredFile, UploadRequest, MAX_UPLOAD_BYTES, PDF_MEDIA_TYPE,
};

/// Request body ceiling: the upload limit plus room for multipart framing
pub const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES as usize + 1024 * 1024;

/// Multipart field carrying the file
const FILE_FIELD: &str = "file";

// ==================
// Shared State
// ==================

/// Upload state shared across handlers
#[derive(Debug, Clone)]
pub struct UploadState {
    pub ingestor: Ingestor,
    pub catalog: Catalog,
    pub retriever: Retriever,
}

impl UploadState {
    pub fn new(store: Store) -> Self {
        Self {
            ingestor: Ingestor::new(store.clone()),
            catalog: Catalog::new(store.clone()),
            retriever: Retriever::new(store),
        }
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub filename: String,
    pub original_name: String,
    pub size: u64,
}

impl From<StoredFile> for UploadResponse {
    fn from(file: StoredFile) -> Self {
        Self {
            success: true,
            filename: file.stored_name,
            original_name: file.original_name.unwrap_or_default(),
            size: file.size_bytes,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub filename: String,
    pub size: u64,
    pub uploaded_at: String,
}

impl From<&StoredFile> for FileEntry {
    fn from(file: &StoredFile) -> Self {
        Self {
            filename: file.stored_name.clone(),
            size: file.size_bytes,
            uploaded_at: file.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FilesListResponse {
    pub files: Vec<FileEntry>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

type JsonError = (StatusCode, Json<ErrorResponse>);

// ==================
// Upload Routes
// ==================

/// Create upload routes
pub fn upload_routes(state: Arc<UploadState>) -> Router {
    Router::new()
        .route("/upload", post(upload_file_handler))
        .route("/uploaded-pdfs", get(list_files_handler))
        .route("/uploaded-pdfs/:filename", get(fetch_file_handler))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

fn status_of(err: &StorageError) -> StatusCode {
    StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Log a failure at the level its class deserves
fn log_failure(operation: &str, err: &StorageError) {
    match err.class() {
        ErrorClass::Storage => tracing::error!(operation, error = %err, "storage failure"),
        ErrorClass::ClientInput => tracing::warn!(operation, error = %err, "rejected request"),
        ErrorClass::NotFound => tracing::debug!(operation, error = %err, "not found"),
    }
}

fn json_error(operation: &str, err: StorageError) -> JsonError {
    log_failure(operation, &err);
    let status = status_of(&err);
    (
        status,
        Json(ErrorResponse {
            error: err.client_message().to_string(),
            code: status.as_u16(),
        }),
    )
}

fn text_error(operation: &str, err: StorageError) -> (StatusCode, String) {
    log_failure(operation, &err);
    (status_of(&err), err.client_message().to_string())
}

/// Translate a multipart decoding failure into the storage taxonomy
fn from_multipart(e: MultipartError) -> StorageError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        StorageError::PayloadTooLarge(UPLOAD_BODY_LIMIT as u64, MAX_UPLOAD_BYTES)
    } else {
        StorageError::MalformedUpload(e.body_text())
    }
}

/// Run filesystem work off the async executor
async fn run_blocking<T, F>(work: F, on_abort: fn(String) -> StorageError) -> StorageResult<T>
where
    F: FnOnce() -> StorageResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| on_abort(e.to_string()))?
}

/// The `file` field as received
struct ReceivedFile {
    name: String,
    media_type: String,
    data: Bytes,
}

async fn read_file_field(multipart: &mut Multipart) -> StorageResult<Option<ReceivedFile>> {
    while let Some(field) = multipart.next_field().await.map_err(from_multipart)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let name = field.file_name().unwrap_or_default().to_string();
        let media_type = field.content_type().unwrap_or_default().to_string();
        // A non-PDF declaration outranks a body cut short by the transport limit.
        let data = field.bytes().await.map_err(|e| {
            if media_type != PDF_MEDIA_TYPE {
                StorageError::UnsupportedMediaType(media_type.clone())
            } else {
                from_multipart(e)
            }
        })?;

        return Ok(Some(ReceivedFile {
            name,
            media_type,
            data,
        }));
    }
    Ok(None)
}

// ==================
// Handlers
// ==================

async fn upload_file_handler(
    State(state): State<Arc<UploadState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, JsonError> {
    let mut multipart = multipart
        .map_err(|e| json_error("upload", StorageError::MalformedUpload(e.body_text())))?;
    let received = read_file_field(&mut multipart)
        .await
        .map_err(|e| json_error("upload", e))?;

    let ingestor = state.ingestor.clone();
    let stored = run_blocking(
        move || {
            let request = match &received {
                Some(file) => UploadRequest::new(&file.data, &file.media_type, &file.name),
                None => UploadRequest {
                    payload: None,
                    declared_media_type: "",
                    declared_name: "",
                    declared_size: 0,
                },
            };
            ingestor.store(request)
        },
        StorageError::StorageWriteFailed,
    )
    .await
    .map_err(|e| json_error("upload", e))?;

    Ok(Json(UploadResponse::from(stored)))
}

async fn list_files_handler(
    State(state): State<Arc<UploadState>>,
) -> Result<Json<FilesListResponse>, JsonError> {
    let catalog = state.catalog.clone();
    let files = run_blocking(move || catalog.list(), StorageError::CatalogUnavailable)
        .await
        .map_err(|e| json_error("list", e))?;

    Ok(Json(FilesListResponse {
        files: files.iter().map(FileEntry::from).collect(),
    }))
}

async fn fetch_file_handler(
    State(state): State<Arc<UploadState>>,
    Path(filename): Path<String>,
) -> Result<(StatusCode, HeaderMap, Bytes), (StatusCode, String)> {
    let retriever = state.retriever.clone();
    let file = run_blocking(
        move || retriever.fetch(&filename),
        StorageError::RetrievalFailed,
    )
    .await
    .map_err(|e| text_error("fetch", e))?;

    let headers = response_headers(&file);
    Ok((StatusCode::OK, headers, Bytes::from(file.data)))
}

fn response_headers(file: &RetrievedFile) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(file.media_type),
    );
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(file.data.len()));

    // Stored names are sanitized; anything else placed in the store falls
    // back to a bare disposition.
    let disposition = if file.name.contains('"') {
        None
    } else {
        HeaderValue::from_str(&format!("inline; filename=\"{}\"", file.name)).ok()
    };
    headers.insert(
        header::CONTENT_DISPOSITION,
        disposition.unwrap_or_else(|| HeaderValue::from_static("inline")),
    );

    if let Ok(cache) = HeaderValue::from_str(&format!(
        "public, max-age={}",
        file.cache_max_age_secs
    )) {
        headers.insert(header::CACHE_CONTROL, cache);
    }
    headers
}
