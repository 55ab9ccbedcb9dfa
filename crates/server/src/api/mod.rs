//! HTTP endpoint modules.
//!
//! Shared error response type and helpers live here in mod.rs.

pub mod doc;
pub mod health;
pub mod page;
pub mod sessions;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use pdfquiz_core::SessionError;
use pdfquiz_llm::{LlmError, QuizGenerator};

use crate::flow::FlowError;
use crate::state::{AppState, SharedSession};

// ── Shared types ─────────────────────────────────────────────────

#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Status code for a failed session action.
pub(crate) fn flow_error(err: FlowError) -> ApiError {
    let status = match &err {
        FlowError::Extraction(_) => StatusCode::BAD_REQUEST,
        FlowError::Generation(LlmError::NotConfigured(_)) => StatusCode::SERVICE_UNAVAILABLE,
        FlowError::Generation(_) => StatusCode::BAD_GATEWAY,
        FlowError::Session(SessionError::UnsupportedQuizCount(_)) => StatusCode::BAD_REQUEST,
        FlowError::Session(_) => StatusCode::CONFLICT,
    };
    api_error(status, err.to_string())
}

// ── Guards ───────────────────────────────────────────────────────

pub(crate) async fn find_session(state: &AppState, id: Uuid) -> Result<SharedSession, ApiError> {
    state
        .sessions
        .get(&id)
        .await
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("Session not found: {id}")))
}

/// Return 503 when no generation provider is configured.
pub(crate) fn require_generator(state: &Arc<AppState>) -> Result<&QuizGenerator, ApiError> {
    state.generator.as_ref().ok_or_else(|| {
        api_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "Quiz generation is not configured. Set GEMINI_API_KEY and restart the server.",
        )
    })
}
