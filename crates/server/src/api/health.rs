//! Health and option endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use pdfquiz_core::quiz::{DEFAULT_QUIZ_COUNT, EXPORT_FILE_NAME, QUIZ_COUNT_CHOICES};
use pdfquiz_core::Difficulty;

use crate::state::AppState;

#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub generation_configured: bool,
    pub sessions: usize,
    #[schema(value_type = Object)]
    pub config: serde_json::Value,
}

/// Server liveness and configuration
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Server is up", body = HealthResponse))
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        generation_configured: state.generator.is_some(),
        sessions: state.sessions.len().await,
        config: state.config.redacted_summary(),
    })
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct OptionsResponse {
    pub counts: Vec<u32>,
    pub default_count: u32,
    pub difficulties: Vec<String>,
    pub default_difficulty: String,
    pub export_file_name: String,
}

/// Choices offered by the quiz tab
#[utoipa::path(
    get,
    path = "/api/options",
    tag = "Health",
    responses((status = 200, description = "Quiz count and difficulty choices", body = OptionsResponse))
)]
pub async fn options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        counts: QUIZ_COUNT_CHOICES.to_vec(),
        default_count: DEFAULT_QUIZ_COUNT,
        difficulties: Difficulty::SUPPORTED
            .iter()
            .map(|d| d.label().to_string())
            .collect(),
        default_difficulty: Difficulty::default().label().to_string(),
        export_file_name: EXPORT_FILE_NAME.to_string(),
    })
}
