use super::{ExtractionError, PageContent};

/// Plain text; form feeds split pages the same way printed PDFs do.
pub fn extract_txt(bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError> {
    let text = String::from_utf8_lossy(bytes);

    Ok(text
        .split('\x0C')
        .enumerate()
        .map(|(i, page)| PageContent {
            page_number: i + 1,
            text: page.trim().to_string(),
        })
        .collect())
}
