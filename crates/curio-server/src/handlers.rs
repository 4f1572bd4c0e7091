//! HTTP request handlers for the server.
//!
//! Parsing by URL, RFP upload and listing, clause listing, and serving
//! uploaded files back.

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use curio_domain::{
    Clause, ClauseStore, DocumentStorage, NewRfp, RecordId, Rfp, RfpStatus, RfpStore, StoredClause,
};
use curio_extractor::{ExtractionResult, Extractor, ExtractorError};
use curio_store::{sanitize_file_name, FileStorage, SqliteStore, StoreError, UPLOAD_URL_PREFIX};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Clause extraction pipeline and fetcher
    pub extractor: Extractor,
    /// RFP and clause persistence
    pub store: Arc<Mutex<SqliteStore>>,
    /// Uploaded document storage
    pub storage: Arc<FileStorage>,
}

impl AppState {
    fn store(&self) -> Result<MutexGuard<'_, SqliteStore>, AppError> {
        self.store
            .lock()
            .map_err(|_| AppError::Internal("Store lock poisoned".to_string()))
    }
}

/// Parse request: a document reachable by URL
#[derive(Debug, Serialize, Deserialize)]
pub struct ParseRfpRequest {
    /// Upload URL (`/files/uploads/...`) or remote http(s) URL
    pub file_url: String,
    /// File name; its extension decides the format
    pub file_name: String,
}

/// Parse response
#[derive(Debug, Serialize, Deserialize)]
pub struct ParseRfpResponse {
    /// Always true; failures are reported as errors
    pub success: bool,
    /// Extracted clauses in document order
    pub clauses: Vec<Clause>,
    /// Page count, when the format has one
    pub total_pages: Option<usize>,
}

/// Query parameters of an RFP upload
#[derive(Debug, Deserialize)]
pub struct UploadParams {
    /// Original file name
    pub file_name: String,
    /// Display title; defaults to the file name
    #[serde(default)]
    pub title: String,
    /// Issuing organization
    #[serde(default)]
    pub organization: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
}

/// Query parameters of the clause listing
#[derive(Debug, Deserialize)]
pub struct ClauseQuery {
    /// Restrict to one RFP
    pub rfp_id: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Server version
    pub version: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Extraction failed
    Extraction(ExtractorError),
    /// Persistence or file storage failed
    Store(StoreError),
    /// Unknown record
    NotFound(String),
    /// Malformed request
    BadRequest(String),
    /// Internal server error
    Internal(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Extraction(e) => write!(f, "{}", e),
            AppError::Store(e) => write!(f, "{}", e),
            AppError::NotFound(msg) | AppError::BadRequest(msg) | AppError::Internal(msg) => {
                f.write_str(msg)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Extraction(e) => {
                let status = match e {
                    ExtractorError::UnsupportedFormat(_) => StatusCode::BAD_REQUEST,
                    ExtractorError::Fetch { .. } => StatusCode::BAD_GATEWAY,
                    ExtractorError::DocumentTooLarge(..) => StatusCode::PAYLOAD_TOO_LARGE,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, e.to_string())
            }
            AppError::Store(e) => {
                let status = match e {
                    StoreError::NotFound(_) => StatusCode::NOT_FOUND,
                    StoreError::InvalidData(_) => StatusCode::BAD_REQUEST,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, e.to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<ExtractorError> for AppError {
    fn from(e: ExtractorError) -> Self {
        AppError::Extraction(e)
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store(e)
    }
}

/// GET /health - Liveness check
async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// POST /api/rfp/parse - Extract clauses from an uploaded or remote document
///
/// Upload URLs are read from local storage; anything else is fetched.
async fn parse_rfp(
    State(state): State<AppState>,
    Json(request): Json<ParseRfpRequest>,
) -> Result<Json<ParseRfpResponse>, AppError> {
    let local = state.storage.read_url(&request.file_url)?;
    let result = match local {
        Some(payload) => {
            state
                .extractor
                .extract_offloaded(payload, &request.file_name)
                .await?
        }
        None => {
            state
                .extractor
                .extract_from_url(&request.file_url, &request.file_name)
                .await?
        }
    };

    Ok(Json(ParseRfpResponse {
        success: true,
        clauses: result.clauses,
        total_pages: result.total_pages,
    }))
}

/// POST /api/rfps - Upload a document, register it and extract its clauses
///
/// The request body is the raw file. When extraction or clause persistence
/// fails the RFP is kept with status `error`.
async fn create_rfp(
    State(state): State<AppState>,
    Query(params): Query<UploadParams>,
    body: Bytes,
) -> Result<Json<Rfp>, AppError> {
    if params.file_name.trim().is_empty() {
        return Err(AppError::BadRequest("file_name is required".to_string()));
    }
    let file_name = sanitize_file_name(&params.file_name)?.to_string();

    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let saved = state
        .storage
        .save_upload(&body, &format!("{}-{}", millis, file_name))?;

    let rfp = state.store()?.create_rfp(NewRfp {
        title: params.title,
        organization: params.organization,
        description: params.description,
        file_url: saved.url,
        file_name,
    })?;
    info!("Registered RFP {} ('{}')", rfp.id, rfp.file_name);

    let outcome = match state
        .extractor
        .extract_offloaded(body.to_vec(), &rfp.file_name)
        .await
    {
        Ok(result) => save_extraction(&state, rfp.id, result),
        Err(e) => Err(AppError::Extraction(e)),
    };

    match outcome {
        Ok(updated) => Ok(Json(updated)),
        Err(e) => {
            warn!("Parsing RFP {} failed: {}", rfp.id, e);
            state
                .store()?
                .update_rfp_status(rfp.id, RfpStatus::Error, None)?;
            Err(AppError::Internal(e.to_string()))
        }
    }
}

fn save_extraction(
    state: &AppState,
    rfp_id: RecordId,
    result: ExtractionResult,
) -> Result<Rfp, AppError> {
    let mut store = state.store()?;
    let stored = store.save_clauses(rfp_id, &result.clauses)?;
    store
        .update_rfp_status(rfp_id, RfpStatus::Parsed, Some(stored.len()))?
        .ok_or_else(|| AppError::NotFound(format!("RFP not found: {}", rfp_id)))
}

/// GET /api/rfps - All RFPs, newest first
async fn list_rfps(State(state): State<AppState>) -> Result<Json<Vec<Rfp>>, AppError> {
    Ok(Json(state.store()?.list_rfps()?))
}

/// GET /api/rfps/:id - One RFP
async fn get_rfp(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Rfp>, AppError> {
    let id = parse_id(&id)?;
    state
        .store()?
        .get_rfp(id)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("RFP not found".to_string()))
}

/// GET /api/clauses - Stored clauses, optionally for one RFP
async fn list_clauses(
    State(state): State<AppState>,
    Query(query): Query<ClauseQuery>,
) -> Result<Json<Vec<StoredClause>>, AppError> {
    let store = state.store()?;
    let clauses = match query.rfp_id {
        Some(id) => store.clauses_for_rfp(parse_id(&id)?)?,
        None => store.all_clauses()?,
    };
    Ok(Json(clauses))
}

/// GET /files/uploads/:name - Raw bytes of an uploaded document
async fn download_upload(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    let url = format!("{}{}", UPLOAD_URL_PREFIX, name);
    let content = state
        .storage
        .read_url(&url)?
        .ok_or_else(|| AppError::NotFound(url))?;
    Ok(([(header::CONTENT_TYPE, "application/octet-stream")], content).into_response())
}

fn parse_id(id: &str) -> Result<RecordId, AppError> {
    id.parse()
        .map_err(|e: String| AppError::BadRequest(format!("Invalid id '{}': {}", id, e)))
}

/// Create the axum router with all routes
///
/// Request bodies may be as large as the extractor's document limit.
pub fn create_router(state: AppState) -> AxumRouter {
    let body_limit = state.extractor.config().max_document_bytes;

    AxumRouter::new()
        .route("/health", get(health_check))
        .route("/api/rfp/parse", post(parse_rfp))
        .route("/api/rfps", get(list_rfps).post(create_rfp))
        .route("/api/rfps/:id", get(get_rfp))
        .route("/api/clauses", get(list_clauses))
        .route("/files/uploads/:name", get(download_upload))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
