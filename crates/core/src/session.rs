//! Per-session quiz workflow state.
//!
//! A [`Session`] is owned by exactly one browser session and is only mutated by
//! the action handlers, one action at a time. Every method here is pure state
//! manipulation; extraction and model calls happen in the caller.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::SessionError;
use crate::quiz::{Difficulty, QuizExport, QUIZ_SEPARATOR};

#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Name of the upload that produced the current document text.
    file_name: Option<String>,
    document_text: String,
    summary: String,
    quizzes: String,
    /// Guards against re-extracting the same upload on every page refresh.
    processed: bool,
    last_difficulty: Option<Difficulty>,
    last_error: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            file_name: None,
            document_text: String::new(),
            summary: String::new(),
            quizzes: String::new(),
            processed: false,
            last_difficulty: None,
            last_error: None,
        }
    }

    pub fn document_text(&self) -> &str {
        &self.document_text
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn quizzes(&self) -> &str {
        &self.quizzes
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn is_processed(&self) -> bool {
        self.processed
    }

    pub fn last_difficulty(&self) -> Option<&Difficulty> {
        self.last_difficulty.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// True until an upload has been extracted and summarized.
    pub fn needs_processing(&self) -> bool {
        !self.processed
    }

    pub fn record_upload(&mut self, file_name: &str, document_text: String, summary: String) {
        self.file_name = Some(file_name.to_string());
        self.document_text = document_text;
        self.summary = summary;
        self.processed = true;
        self.last_error = None;
    }

    pub fn require_document(&self) -> Result<&str, SessionError> {
        if self.document_text.is_empty() {
            Err(SessionError::NoDocument)
        } else {
            Ok(&self.document_text)
        }
    }

    /// Overwrite the quiz set with a fresh generation.
    pub fn replace_quizzes(&mut self, generated: String, difficulty: Difficulty) {
        self.quizzes = generated;
        self.last_difficulty = Some(difficulty);
        self.last_error = None;
    }

    /// Difficulty to reuse for "add more"; only available once a quiz set exists.
    pub fn add_more_difficulty(&self) -> Result<Difficulty, SessionError> {
        if self.quizzes.is_empty() {
            return Err(SessionError::NoQuizSet);
        }
        Ok(self.last_difficulty.clone().unwrap_or_default())
    }

    /// Append a batch after a blank line. Nothing is deduplicated.
    pub fn append_quizzes(&mut self, generated: &str) -> Result<(), SessionError> {
        if self.quizzes.is_empty() {
            return Err(SessionError::NoQuizSet);
        }
        self.quizzes.push_str(QUIZ_SEPARATOR);
        self.quizzes.push_str(generated);
        self.last_error = None;
        Ok(())
    }

    pub fn export(&self) -> QuizExport {
        QuizExport::new(self.quizzes.clone())
    }

    pub fn record_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    /// Clear everything except identity.
    pub fn reset(&mut self) {
        self.file_name = None;
        self.document_text.clear();
        self.summary.clear();
        self.quizzes.clear();
        self.processed = false;
        self.last_difficulty = None;
        self.last_error = None;
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            id: self.id,
            created_at: self.created_at,
            file_name: self.file_name.clone(),
            processed: self.processed,
            document_chars: self.document_text.chars().count(),
            summary: self.summary.clone(),
            quiz_ready: !self.document_text.is_empty(),
            quizzes: self.quizzes.clone(),
            last_difficulty: self.last_difficulty.clone(),
            last_error: self.last_error.clone(),
        }
    }
}

/// Snapshot rendered by the page. The document text itself is not sent back.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub file_name: Option<String>,
    pub processed: bool,
    pub document_chars: usize,
    pub summary: String,
    /// The quiz tab is usable once document text exists.
    pub quiz_ready: bool,
    pub quizzes: String,
    pub last_difficulty: Option<Difficulty>,
    pub last_error: Option<String>,
}
