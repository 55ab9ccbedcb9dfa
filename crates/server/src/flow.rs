//! Session flow: the five user actions applied to one session.
//!
//! Each action either succeeds and updates the session, or fails, leaves the
//! quiz state untouched and records the error message on the session so the
//! page can show it.

use tracing::info;

use pdfquiz_core::{Difficulty, QuizExport, Session, SessionError};
use pdfquiz_ingest::ExtractionError;
use pdfquiz_llm::{LlmError, QuizGenerator};

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("Text extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("Generation failed: {0}")]
    Generation(#[from] LlmError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    Processed { pages: usize, chars: usize },
    /// The session already holds a processed document; nothing was re-run.
    AlreadyProcessed,
}

fn record_failure(session: &mut Session, err: FlowError) -> FlowError {
    tracing::warn!("Session {} action failed: {}", session.id, err);
    session.record_error(err.to_string());
    err
}

/// Extract text from the upload and summarize it, once per session.
///
/// The generator is only needed when the session has not been processed yet.
pub async fn upload(
    session: &mut Session,
    generator: Option<&QuizGenerator>,
    file_name: &str,
    bytes: &[u8],
) -> Result<UploadOutcome, FlowError> {
    if !session.needs_processing() {
        info!(
            "Session {} already processed '{}' — skipping '{}'",
            session.id,
            session.file_name().unwrap_or("?"),
            file_name
        );
        return Ok(UploadOutcome::AlreadyProcessed);
    }

    let Some(generator) = generator else {
        let err = LlmError::NotConfigured("GEMINI_API_KEY not set".into());
        return Err(record_failure(session, err.into()));
    };

    let doc = match pdfquiz_ingest::extract_text(bytes, file_name) {
        Ok(doc) => doc,
        Err(e) => return Err(record_failure(session, e.into())),
    };
    let text = doc.full_text();
    info!(
        "Extracted '{}': {} pages, {} chars",
        file_name,
        doc.page_count(),
        text.len()
    );

    let summary = match generator.summarize(&text).await {
        Ok(summary) => summary,
        Err(e) => return Err(record_failure(session, e.into())),
    };

    let outcome = UploadOutcome::Processed {
        pages: doc.page_count(),
        chars: text.chars().count(),
    };
    session.record_upload(file_name, text, summary);
    Ok(outcome)
}

/// Generate a fresh quiz set, replacing any existing one.
pub async fn generate_quizzes(
    session: &mut Session,
    generator: &QuizGenerator,
    count: u32,
    difficulty: Difficulty,
) -> Result<(), FlowError> {
    let text = match session.require_document() {
        Ok(text) => text.to_string(),
        Err(e) => return Err(record_failure(session, e.into())),
    };

    match generator.generate_quizzes(&text, count, &difficulty).await {
        Ok(generated) => {
            session.replace_quizzes(generated, difficulty);
            Ok(())
        }
        Err(e) => Err(record_failure(session, e.into())),
    }
}

/// Generate another batch with the last-used difficulty and append it.
pub async fn add_more_quizzes(
    session: &mut Session,
    generator: &QuizGenerator,
    count: u32,
) -> Result<Difficulty, FlowError> {
    let prepared = session
        .require_document()
        .map(str::to_string)
        .and_then(|text| session.add_more_difficulty().map(|d| (text, d)));
    let (text, difficulty) = match prepared {
        Ok(v) => v,
        Err(e) => return Err(record_failure(session, e.into())),
    };

    let generated = match generator.generate_quizzes(&text, count, &difficulty).await {
        Ok(generated) => generated,
        Err(e) => return Err(record_failure(session, e.into())),
    };

    if let Err(e) = session.append_quizzes(&generated) {
        return Err(record_failure(session, e.into()));
    }
    Ok(difficulty)
}

pub fn download(session: &Session) -> QuizExport {
    session.export()
}

pub fn reset(session: &mut Session) {
    info!("Session {} reset", session.id);
    session.reset();
}
