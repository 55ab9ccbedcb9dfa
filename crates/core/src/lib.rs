pub mod config;
pub mod error;
pub mod quiz;
pub mod session;

pub use config::Config;
pub use error::*;
pub use quiz::{Difficulty, QuizExport};
pub use session::{Session, SessionView};
