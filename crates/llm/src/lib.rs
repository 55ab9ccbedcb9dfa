pub mod generator;
pub mod prompt;
pub mod provider;
pub mod providers;

pub use generator::QuizGenerator;
pub use provider::{GenerationOptions, LlmError, LlmProvider, Message, Role};
