use tracing::info;

use pdfquiz_core::Difficulty;

use crate::prompt::{build_quiz_prompt, build_summary_prompt};
use crate::provider::{GenerationOptions, LlmError, LlmProvider, Message};

/// Issues summary and quiz requests against one provider.
///
/// Each call sends exactly one user message and returns the model text as-is.
/// There are no retries.
pub struct QuizGenerator {
    provider: Box<dyn LlmProvider>,
    options: GenerationOptions,
}

impl QuizGenerator {
    pub fn new(provider: Box<dyn LlmProvider>, options: GenerationOptions) -> Self {
        Self { provider, options }
    }

    /// Build from config, creating the appropriate provider.
    pub fn from_config(llm_config: &pdfquiz_core::config::LlmConfig) -> Result<Self, LlmError> {
        let provider = crate::providers::create_provider(llm_config)?;
        Ok(Self::new(
            provider,
            GenerationOptions {
                temperature: llm_config.temperature,
                max_tokens: llm_config.max_tokens,
            },
        ))
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    pub async fn summarize(&self, text: &str) -> Result<String, LlmError> {
        info!("Summarizing {} chars with {}", text.len(), self.model());
        self.generate(build_summary_prompt(text)).await
    }

    pub async fn generate_quizzes(
        &self,
        text: &str,
        count: u32,
        difficulty: &Difficulty,
    ) -> Result<String, LlmError> {
        if !difficulty.is_supported() {
            tracing::warn!("Unrecognized difficulty '{}' — no guidance clause", difficulty);
        }
        info!("Generating {} '{}' quizzes with {}", count, difficulty, self.model());
        self.generate(build_quiz_prompt(text, count, difficulty)).await
    }

    async fn generate(&self, prompt: String) -> Result<String, LlmError> {
        self.provider
            .complete(vec![Message::user(prompt)], &self.options)
            .await
    }
}
