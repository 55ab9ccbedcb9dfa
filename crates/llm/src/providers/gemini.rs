use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::provider::{GenerationOptions, LlmError, LlmProvider, Message, Role};

pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build the request body for the Gemini generateContent API.
    fn build_request_body(messages: &[Message], options: &GenerationOptions) -> serde_json::Value {
        // Gemini takes the system prompt in a separate system_instruction field
        let system_msg = messages
            .iter()
            .find(|m| matches!(m.role, Role::System))
            .map(|m| m.content.clone());

        let contents: Vec<serde_json::Value> = messages
            .iter()
            .filter(|m| !matches!(m.role, Role::System))
            .map(|m| {
                json!({
                    "role": match m.role {
                        Role::Assistant => "model",
                        _ => "user",
                    },
                    "parts": [{ "text": m.content }],
                })
            })
            .collect();

        let mut body = json!({ "contents": contents });

        let mut generation_config = serde_json::Map::new();
        if let Some(temperature) = options.temperature {
            generation_config.insert("temperature".into(), json!(temperature));
        }
        if let Some(max_tokens) = options.max_tokens {
            generation_config.insert("maxOutputTokens".into(), json!(max_tokens));
        }
        if !generation_config.is_empty() {
            body["generationConfig"] = serde_json::Value::Object(generation_config);
        }

        if let Some(system) = system_msg {
            body["system_instruction"] = json!({
                "parts": [{ "text": system }],
            });
        }

        body
    }

    /// Pull the candidate text out of a generateContent response.
    fn parse_response(resp: &serde_json::Value) -> Result<String, LlmError> {
        if let Some(reason) = resp["promptFeedback"]["blockReason"].as_str() {
            return Err(LlmError::ParseError(format!("prompt blocked: {reason}")));
        }

        let parts = resp["candidates"][0]["content"]["parts"]
            .as_array()
            .ok_or_else(|| {
                let finish = resp["candidates"][0]["finishReason"]
                    .as_str()
                    .unwrap_or("unknown");
                LlmError::ParseError(format!(
                    "missing candidates[0].content.parts (finishReason: {finish})"
                ))
            })?;

        let text: String = parts
            .iter()
            .filter(|p| !p["thought"].as_bool().unwrap_or(false))
            .filter_map(|p| p["text"].as_str())
            .collect();

        if text.is_empty() {
            return Err(LlmError::ParseError("response contained no text".into()));
        }

        Ok(text)
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn complete(
        &self,
        messages: Vec<Message>,
        options: &GenerationOptions,
    ) -> Result<String, LlmError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model,
        );

        let body = Self::build_request_body(&messages, options);

        debug!("Gemini request to model={}", self.model);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            // The URL carries the API key; keep it out of error messages.
            .map_err(|e| LlmError::HttpError(e.without_url()))?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError { status, body });
        }

        let resp: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LlmError::HttpError(e.without_url()))?;
        let content = Self::parse_response(&resp)?;

        debug!("Gemini response: {} chars", content.len());

        Ok(content)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{Message, Role};

    #[test]
    fn test_request_body_structure() {
        let messages = vec![
            Message { role: Role::System, content: "You are helpful.".into() },
            Message { role: Role::User, content: "Hello".into() },
            Message { role: Role::Assistant, content: "Hi there!".into() },
            Message { role: Role::User, content: "How are you?".into() },
        ];
        let options = GenerationOptions {
            temperature: Some(0.1),
            max_tokens: Some(4096),
        };

        let body = GeminiProvider::build_request_body(&messages, &options);

        // System instruction is separate
        assert_eq!(
            body["system_instruction"]["parts"][0]["text"].as_str().unwrap(),
            "You are helpful.",
        );

        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[1]["parts"][0]["text"], "Hi there!");
        assert_eq!(contents[2]["parts"][0]["text"], "How are you?");

        let temp = body["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temp - 0.1).abs() < 1e-6, "temperature should be ~0.1, got {temp}");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 4096);
    }

    #[test]
    fn test_request_body_uses_service_defaults() {
        let messages = vec![Message::user("Summarize this")];

        let body = GeminiProvider::build_request_body(&messages, &GenerationOptions::default());

        assert!(body.get("system_instruction").is_none());
        assert!(body.get("generationConfig").is_none());
        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0]["parts"][0]["text"], "Summarize this");
    }

    #[test]
    fn test_parse_response_passthrough() {
        let resp = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "**Quiz 1**: Q?\n" }, { "text": "A) x" }] },
                "finishReason": "STOP"
            }]
        });
        assert_eq!(
            GeminiProvider::parse_response(&resp).unwrap(),
            "**Quiz 1**: Q?\nA) x"
        );
    }

    #[test]
    fn test_parse_response_skips_thoughts() {
        let resp = json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "thinking...", "thought": true },
                    { "text": "answer" }
                ] }
            }]
        });
        assert_eq!(GeminiProvider::parse_response(&resp).unwrap(), "answer");
    }

    #[test]
    fn test_parse_response_blocked_prompt() {
        let resp = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        let err = GeminiProvider::parse_response(&resp).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn test_parse_response_missing_parts() {
        let resp = json!({ "candidates": [{ "finishReason": "MAX_TOKENS" }] });
        let err = GeminiProvider::parse_response(&resp).unwrap_err();
        assert!(matches!(err, LlmError::ParseError(ref m) if m.contains("MAX_TOKENS")));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let p = GeminiProvider::new("k".into(), "m".into(), "http://localhost:8080/".into());
        assert_eq!(p.base_url, "http://localhost:8080");
        assert_eq!(p.model(), "m");
    }
}
