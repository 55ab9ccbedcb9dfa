//! OpenAPI documentation, served via Scalar UI at `/docs`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "pdfquiz API",
        version = "0.1.0",
        description = "Upload a document, read its AI summary, and generate multiple-choice quizzes.",
    ),
    tags(
        (name = "Health", description = "Server readiness and quiz options"),
        (name = "Sessions", description = "Session lifecycle and document upload"),
        (name = "Quizzes", description = "Quiz generation, appending and export"),
    ),
    paths(
        crate::api::health::health,
        crate::api::health::options,
        crate::api::sessions::create_session,
        crate::api::sessions::get_session,
        crate::api::sessions::upload,
        crate::api::sessions::generate_quizzes,
        crate::api::sessions::add_more_quizzes,
        crate::api::sessions::download_quizzes,
        crate::api::sessions::reset_session,
    ),
    components(schemas(
        crate::api::ErrorResponse,
        crate::api::health::HealthResponse,
        crate::api::health::OptionsResponse,
        crate::api::sessions::GenerateRequest,
        crate::api::sessions::AddMoreRequest,
        crate::api::sessions::SessionResponse,
    ))
)]
pub struct ApiDoc;
