use std::panic::{self, AssertUnwindSafe};

use super::{ExtractionError, PageContent};

/// Extract one `PageContent` per PDF page, in page order.
///
/// `pdf-extract` panics on some malformed files instead of returning an
/// error, so the call runs behind `catch_unwind`.
pub fn extract_pdf(bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError> {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }));

    let pages = match result {
        Ok(Ok(pages)) => pages,
        Ok(Err(e)) => return Err(ExtractionError::PdfError(e.to_string())),
        Err(_) => {
            return Err(ExtractionError::PdfError(
                "parser crashed on malformed document".to_string(),
            ))
        }
    };

    let empty = pages.iter().filter(|p| p.trim().is_empty()).count();
    if empty > 0 {
        tracing::warn!("{} of {} PDF pages have no text layer", empty, pages.len());
    }

    Ok(pages
        .into_iter()
        .enumerate()
        .map(|(i, page_text)| PageContent {
            page_number: i + 1,
            text: page_text.trim().to_string(),
        })
        .collect())
}
