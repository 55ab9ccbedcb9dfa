//! Document text extraction for uploaded files.

pub mod document;

pub use document::{extract_text, ExtractedDocument, ExtractionError, PageContent};
