//! HTTP router construction.
//!
//! Assembles the page, API routes, middleware, and OpenAPI docs into a single `Router`.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::api;
use crate::state::AppState;

/// Build the complete application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let upload_limit = state.config.server.upload_max_bytes;
    let cors = cors_layer(&state.config.server.cors_origin);

    Router::new()
        .route("/", get(api::page::index))
        .route("/health", get(api::health::health))
        .route("/api/options", get(api::health::options))
        .route("/api/sessions", post(api::sessions::create_session))
        .route("/api/sessions/{id}", get(api::sessions::get_session))
        .route(
            "/api/sessions/{id}/upload",
            post(api::sessions::upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/api/sessions/{id}/quizzes",
            post(api::sessions::generate_quizzes),
        )
        // /more and /download are fixed segments under the same prefix
        .route(
            "/api/sessions/{id}/quizzes/more",
            post(api::sessions::add_more_quizzes),
        )
        .route(
            "/api/sessions/{id}/quizzes/download",
            get(api::sessions::download_quizzes),
        )
        .route("/api/sessions/{id}/reset", post(api::sessions::reset_session))
        .layer(cors)
        .with_state(state)
        .merge(Scalar::with_url("/docs", api::doc::ApiDoc::openapi()))
}

fn cors_layer(origin: &str) -> CorsLayer {
    if origin == "*" {
        return CorsLayer::permissive();
    }
    match origin.parse::<HeaderValue>() {
        Ok(value) => CorsLayer::new()
            .allow_origin(value)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(e) => {
            tracing::warn!("Invalid CORS_ORIGIN '{}': {} — allowing any origin", origin, e);
            CorsLayer::permissive()
        }
    }
}
