//! Session endpoints: create, upload, generate, add more, download, reset.
//!
//! Every action locks its session for the whole request, so a session sees
//! one action at a time.

use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use pdfquiz_core::quiz::{validate_quiz_count, DEFAULT_QUIZ_COUNT};
use pdfquiz_core::{Difficulty, SessionView};

use super::{api_error, find_session, flow_error, require_generator, ApiError, ErrorResponse};
use crate::flow::{self, FlowError, UploadOutcome};
use crate::state::AppState;

// ── Request/Response types ────────────────────────

#[derive(Deserialize, utoipa::ToSchema)]
pub struct GenerateRequest {
    #[serde(default = "default_count")]
    pub count: u32,
    /// `Easy`, `Normal` or `Advanced`. Other labels are passed through without guidance.
    #[serde(default)]
    #[schema(value_type = String)]
    pub difficulty: Difficulty,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct AddMoreRequest {
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 {
    DEFAULT_QUIZ_COUNT
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SessionResponse {
    #[schema(value_type = Object)]
    pub session: SessionView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl SessionResponse {
    fn new(session: SessionView) -> Self {
        Self {
            session,
            notice: None,
        }
    }
}

fn check_count(count: u32) -> Result<u32, ApiError> {
    validate_quiz_count(count).map_err(|e| flow_error(FlowError::Session(e)))
}

// ── Handlers ──────────────────────────────────────

/// Start a new empty session
#[utoipa::path(
    post,
    path = "/api/sessions",
    tag = "Sessions",
    responses((status = 201, description = "Session created", body = SessionResponse))
)]
pub async fn create_session(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<SessionResponse>) {
    let (id, session) = state.sessions.create().await;
    info!("Session {} created", id);
    let view = session.lock().await.view();
    (StatusCode::CREATED, Json(SessionResponse::new(view)))
}

/// Current state of a session
#[utoipa::path(
    get,
    path = "/api/sessions/{id}",
    tag = "Sessions",
    params(("id" = String, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session state", body = SessionResponse),
        (status = 404, description = "Unknown session", body = ErrorResponse)
    )
)]
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = find_session(&state, id).await?;
    let view = session.lock().await.view();
    Ok(Json(SessionResponse::new(view)))
}

/// Upload a document, extract its text and summarize it
///
/// Runs once per session. A second upload before reset is acknowledged
/// without re-processing.
#[utoipa::path(
    post,
    path = "/api/sessions/{id}/upload",
    tag = "Sessions",
    params(("id" = String, Path, description = "Session ID")),
    request_body(content = Vec<u8>, content_type = "multipart/form-data", description = "PDF or plain-text file in a `file` field"),
    responses(
        (status = 200, description = "Document processed", body = SessionResponse),
        (status = 400, description = "Missing file or extraction failed", body = ErrorResponse),
        (status = 404, description = "Unknown session", body = ErrorResponse),
        (status = 502, description = "Model service failure", body = ErrorResponse),
        (status = 503, description = "Generation not configured", body = ErrorResponse)
    )
)]
pub async fn upload(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = find_session(&state, id).await?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("Multipart error: {e}")))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field.bytes().await.map_err(|e| {
            api_error(StatusCode::BAD_REQUEST, format!("Failed to read file: {e}"))
        })?;
        upload = Some((file_name, bytes));
        break;
    }
    let (file_name, bytes) =
        upload.ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "No file provided"))?;

    info!("Session {} upload '{}' ({} bytes)", id, file_name, bytes.len());

    let mut session = session.lock().await;
    let outcome = flow::upload(&mut session, state.generator.as_ref(), &file_name, &bytes)
        .await
        .map_err(flow_error)?;

    let notice = match outcome {
        UploadOutcome::Processed { .. } => None,
        UploadOutcome::AlreadyProcessed => Some(format!(
            "'{}' is already processed. Reset the session to upload another document.",
            session.file_name().unwrap_or("The current document")
        )),
    };
    Ok(Json(SessionResponse {
        session: session.view(),
        notice,
    }))
}

/// Generate a new quiz set, replacing the current one
#[utoipa::path(
    post,
    path = "/api/sessions/{id}/quizzes",
    tag = "Quizzes",
    params(("id" = String, Path, description = "Session ID")),
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Quiz set replaced", body = SessionResponse),
        (status = 400, description = "Unsupported quiz count", body = ErrorResponse),
        (status = 404, description = "Unknown session", body = ErrorResponse),
        (status = 409, description = "No document uploaded yet", body = ErrorResponse),
        (status = 502, description = "Model service failure", body = ErrorResponse),
        (status = 503, description = "Generation not configured", body = ErrorResponse)
    )
)]
pub async fn generate_quizzes(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = find_session(&state, id).await?;
    let count = check_count(req.count)?;
    let generator = require_generator(&state)?;

    let mut session = session.lock().await;
    flow::generate_quizzes(&mut session, generator, count, req.difficulty)
        .await
        .map_err(flow_error)?;
    Ok(Json(SessionResponse::new(session.view())))
}

/// Generate another batch with the last difficulty and append it
#[utoipa::path(
    post,
    path = "/api/sessions/{id}/quizzes/more",
    tag = "Quizzes",
    params(("id" = String, Path, description = "Session ID")),
    request_body = AddMoreRequest,
    responses(
        (status = 200, description = "Batch appended", body = SessionResponse),
        (status = 400, description = "Unsupported quiz count", body = ErrorResponse),
        (status = 404, description = "Unknown session", body = ErrorResponse),
        (status = 409, description = "No quiz set to extend", body = ErrorResponse),
        (status = 502, description = "Model service failure", body = ErrorResponse),
        (status = 503, description = "Generation not configured", body = ErrorResponse)
    )
)]
pub async fn add_more_quizzes(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<AddMoreRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = find_session(&state, id).await?;
    let count = check_count(req.count)?;
    let generator = require_generator(&state)?;

    let mut session = session.lock().await;
    flow::add_more_quizzes(&mut session, generator, count)
        .await
        .map_err(flow_error)?;
    Ok(Json(SessionResponse::new(session.view())))
}

/// Download the quiz set as a text file
#[utoipa::path(
    get,
    path = "/api/sessions/{id}/quizzes/download",
    tag = "Quizzes",
    params(("id" = String, Path, description = "Session ID")),
    responses(
        (status = 200, description = "generated_quizzes.txt", body = String, content_type = "text/plain"),
        (status = 404, description = "Unknown session", body = ErrorResponse)
    )
)]
pub async fn download_quizzes(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let session = find_session(&state, id).await?;
    let export = flow::download(&*session.lock().await);

    let headers = [
        (header::CONTENT_TYPE, format!("{}; charset=utf-8", export.mime)),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export.file_name),
        ),
    ];
    Ok((headers, export.body))
}

/// Clear the document, summary and quizzes
#[utoipa::path(
    post,
    path = "/api/sessions/{id}/reset",
    tag = "Sessions",
    params(("id" = String, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session cleared", body = SessionResponse),
        (status = 404, description = "Unknown session", body = ErrorResponse)
    )
)]
pub async fn reset_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    flow::reset(&mut session);
    Ok(Json(SessionResponse::new(session.view())))
}
