//! Scripted LLM provider for flow and router tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use pdfquiz_llm::{GenerationOptions, LlmError, LlmProvider, Message, QuizGenerator};

enum Scripted {
    Text(String),
    ApiError(u16, String),
}

#[derive(Default)]
struct Script {
    responses: VecDeque<Scripted>,
    prompts: Vec<String>,
}

/// Returns queued responses in order and records every prompt it receives.
#[derive(Clone, Default)]
pub struct ScriptedProvider {
    script: Arc<Mutex<Script>>,
}

impl ScriptedProvider {
    pub fn push_ok(&self, text: &str) {
        self.script
            .lock()
            .unwrap()
            .responses
            .push_back(Scripted::Text(text.to_string()));
    }

    pub fn push_api_error(&self, status: u16, body: &str) {
        self.script
            .lock()
            .unwrap()
            .responses
            .push_back(Scripted::ApiError(status, body.to_string()));
    }

    pub fn prompts(&self) -> Vec<String> {
        self.script.lock().unwrap().prompts.clone()
    }

    pub fn generator(&self) -> QuizGenerator {
        QuizGenerator::new(Box::new(self.clone()), GenerationOptions::default())
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn complete(
        &self,
        messages: Vec<Message>,
        _options: &GenerationOptions,
    ) -> Result<String, LlmError> {
        let mut script = self.script.lock().unwrap();
        let prompt = messages
            .into_iter()
            .map(|m| m.content)
            .collect::<Vec<_>>()
            .join("\n");
        script.prompts.push(prompt);

        match script.responses.pop_front() {
            Some(Scripted::Text(text)) => Ok(text),
            Some(Scripted::ApiError(status, body)) => Err(LlmError::ApiError { status, body }),
            None => Err(LlmError::ParseError("no scripted response left".into())),
        }
    }

    fn model(&self) -> &str {
        "scripted"
    }
}
