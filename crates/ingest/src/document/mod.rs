mod pdf;
mod txt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("PDF extraction failed: {0}")]
    PdfError(String),
    #[error("Document '{0}' contains no extractable text")]
    NoText(String),
}

/// A page of extracted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    /// 1-based page number. Plain text files count form-feed separated pages.
    pub page_number: usize,
    /// The extracted text content.
    pub text: String,
}

/// Result of extracting text from a document.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// Original filename.
    pub filename: String,
    /// File type: "pdf", "txt"
    pub file_type: String,
    /// Extracted pages in document order.
    pub pages: Vec<PageContent>,
}

impl ExtractedDocument {
    /// Every page's text followed by a newline, in page order.
    pub fn full_text(&self) -> String {
        let mut text = String::with_capacity(self.total_chars() + self.pages.len());
        for page in &self.pages {
            text.push_str(&page.text);
            text.push('\n');
        }
        text
    }

    /// Total character count across all pages.
    pub fn total_chars(&self) -> usize {
        self.pages.iter().map(|p| p.text.len()).sum()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn has_text(&self) -> bool {
        self.pages.iter().any(|p| !p.text.trim().is_empty())
    }
}

/// Extract text from file bytes based on file type.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<ExtractedDocument, ExtractionError> {
    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();
    let file_type = ext.as_str();

    let pages = match file_type {
        "pdf" => pdf::extract_pdf(bytes)?,
        "txt" | "text" => txt::extract_txt(bytes)?,
        other => return Err(ExtractionError::UnsupportedType(other.to_string())),
    };

    let doc = ExtractedDocument {
        filename: filename.to_string(),
        file_type: file_type.to_string(),
        pages,
    };

    if !doc.has_text() {
        return Err(ExtractionError::NoText(filename.to_string()));
    }

    tracing::debug!(
        "Extracted '{}' (type={}): {} pages, {} chars",
        doc.filename,
        doc.file_type,
        doc.page_count(),
        doc.total_chars(),
    );

    Ok(doc)
}
