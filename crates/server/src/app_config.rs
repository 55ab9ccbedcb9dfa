//! Application configuration builders.
//!
//! Constructs the generation client and shared state from `Config`.

use std::sync::Arc;

use tracing::{info, warn};

use pdfquiz_llm::QuizGenerator;

use crate::state::{AppState, SessionStore};

/// Load configuration from `.env` and environment variables.
pub fn load_config() -> pdfquiz_core::Config {
    pdfquiz_core::config::load_dotenv();
    pdfquiz_core::Config::from_env()
}

/// Build the quiz generator, or `None` if the provider is not configured.
pub fn build_generator(config: &pdfquiz_core::Config) -> Option<QuizGenerator> {
    match QuizGenerator::from_config(&config.llm) {
        Ok(generator) => {
            info!(
                "Quiz generator ready (provider: {}, model: {})",
                config.llm.provider,
                generator.model()
            );
            Some(generator)
        }
        Err(e) => {
            warn!("Quiz generator not available: {} — upload and quiz generation will be disabled", e);
            None
        }
    }
}

pub fn build_app_state(config: pdfquiz_core::Config) -> Arc<AppState> {
    let generator = build_generator(&config);
    Arc::new(AppState {
        config,
        generator,
        sessions: SessionStore::new(),
    })
}
