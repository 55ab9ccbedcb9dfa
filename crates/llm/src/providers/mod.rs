pub mod gemini;

use pdfquiz_core::config::LlmConfig;

use crate::provider::{LlmError, LlmProvider};

/// Create the LLM provider named in config.
pub fn create_provider(llm_config: &LlmConfig) -> Result<Box<dyn LlmProvider>, LlmError> {
    match llm_config.provider.as_str() {
        "gemini" | "google" => {
            let api_key = llm_config
                .gemini_api_key
                .as_ref()
                .ok_or_else(|| LlmError::NotConfigured("GEMINI_API_KEY not set".into()))?;
            Ok(Box::new(gemini::GeminiProvider::new(
                api_key.clone(),
                llm_config.gemini_model.clone(),
                llm_config.gemini_base_url.clone(),
            )))
        }
        other => Err(LlmError::NotConfigured(format!(
            "unknown LLM provider: '{}'",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_not_configured() {
        let err = create_provider(&LlmConfig::default()).err().unwrap();
        assert!(matches!(err, LlmError::NotConfigured(ref m) if m.contains("GEMINI_API_KEY")));
    }

    #[test]
    fn test_unknown_provider() {
        let cfg = LlmConfig {
            provider: "claude".into(),
            ..LlmConfig::default()
        };
        let err = create_provider(&cfg).err().unwrap();
        assert!(err.to_string().contains("claude"));
    }

    #[test]
    fn test_gemini_with_key() {
        let cfg = LlmConfig {
            gemini_api_key: Some("test-key".into()),
            ..LlmConfig::default()
        };
        let provider = create_provider(&cfg).unwrap();
        assert_eq!(provider.model(), pdfquiz_core::config::DEFAULT_GEMINI_MODEL);
    }
}
