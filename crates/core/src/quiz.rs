//! Quiz vocabulary shared by the prompt builder, the session and the HTTP layer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Quiz counts offered per batch.
pub const QUIZ_COUNT_CHOICES: [u32; 4] = [10, 15, 20, 25];

pub const DEFAULT_QUIZ_COUNT: u32 = 10;

/// Separator placed between an existing quiz set and an appended batch.
pub const QUIZ_SEPARATOR: &str = "\n\n";

pub const EXPORT_FILE_NAME: &str = "generated_quizzes.txt";

pub const EXPORT_MIME: &str = "text/plain";

/// Reject counts outside [`QUIZ_COUNT_CHOICES`].
pub fn validate_quiz_count(count: u32) -> Result<u32, SessionError> {
    if QUIZ_COUNT_CHOICES.contains(&count) {
        Ok(count)
    } else {
        Err(SessionError::UnsupportedQuizCount(count))
    }
}

/// Difficulty level for generated quizzes.
///
/// Labels are matched exactly. Anything else is kept as [`Difficulty::Other`]
/// so it still reaches the prompt, just without a guidance clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Advanced,
    Other(String),
}

impl Difficulty {
    /// The three levels offered in the page.
    pub const SUPPORTED: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Advanced];

    pub fn label(&self) -> &str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Advanced => "Advanced",
            Difficulty::Other(label) => label,
        }
    }

    /// Instruction appended after the difficulty sentence. Empty for unknown labels.
    pub fn guidance(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Focus on definitions, facts, and directly stated concepts.",
            Difficulty::Normal => {
                "Focus on key relationships, simple analysis, and application of concepts."
            }
            Difficulty::Advanced => {
                "Focus on complex analysis, inference, synthesis, and critical evaluation."
            }
            Difficulty::Other(_) => "",
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Difficulty::Other(_))
    }
}

impl From<&str> for Difficulty {
    fn from(label: &str) -> Self {
        match label {
            "Easy" => Difficulty::Easy,
            "Normal" => Difficulty::Normal,
            "Advanced" => Difficulty::Advanced,
            other => Difficulty::Other(other.to_string()),
        }
    }
}

impl From<String> for Difficulty {
    fn from(label: String) -> Self {
        Difficulty::from(label.as_str())
    }
}

impl From<Difficulty> for String {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.label().to_string()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Quiz set packaged as a plain-text download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizExport {
    pub file_name: &'static str,
    pub mime: &'static str,
    pub body: String,
}

impl QuizExport {
    pub fn new(body: String) -> Self {
        Self {
            file_name: EXPORT_FILE_NAME,
            mime: EXPORT_MIME,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_label_match() {
        assert_eq!(Difficulty::from("Easy"), Difficulty::Easy);
        assert_eq!(Difficulty::from("Normal"), Difficulty::Normal);
        assert_eq!(Difficulty::from("Advanced"), Difficulty::Advanced);
        // Case matters.
        assert_eq!(Difficulty::from("easy"), Difficulty::Other("easy".into()));
    }

    #[test]
    fn test_unknown_label_has_empty_guidance() {
        let d = Difficulty::from("Expert");
        assert_eq!(d.label(), "Expert");
        assert_eq!(d.guidance(), "");
        assert!(!d.is_supported());
    }

    #[test]
    fn test_supported_levels_have_guidance() {
        for d in Difficulty::SUPPORTED {
            assert!(d.is_supported());
            assert!(d.guidance().starts_with("Focus on"), "{d} has no guidance");
        }
    }

    #[test]
    fn test_serde_as_plain_string() {
        let json = serde_json::to_string(&Difficulty::Advanced).unwrap();
        assert_eq!(json, "\"Advanced\"");

        let parsed: Difficulty = serde_json::from_str("\"Impossible\"").unwrap();
        assert_eq!(parsed, Difficulty::Other("Impossible".into()));
    }

    #[test]
    fn test_quiz_count_validation() {
        for n in QUIZ_COUNT_CHOICES {
            assert_eq!(validate_quiz_count(n), Ok(n));
        }
        assert_eq!(
            validate_quiz_count(12),
            Err(SessionError::UnsupportedQuizCount(12))
        );
        assert!(validate_quiz_count(0).is_err());
    }

    #[test]
    fn test_export_metadata() {
        let export = QuizExport::new("**Quiz 1**: ?".into());
        assert_eq!(export.file_name, "generated_quizzes.txt");
        assert_eq!(export.mime, "text/plain");
    }
}
