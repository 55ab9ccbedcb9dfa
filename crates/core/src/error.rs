use thiserror::Error;

/// Reasons a session action is not available in the session's current state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("No document has been processed yet. Upload a PDF first.")]
    NoDocument,

    #[error("No quizzes generated yet. Use \"Generate Quizzes\" before adding more.")]
    NoQuizSet,

    #[error("Unsupported quiz count: {0}")]
    UnsupportedQuizCount(u32),
}
