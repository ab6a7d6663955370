//! PDF text extraction. `lopdf` reads page by page; `pdf-extract` is the fallback
//! when `lopdf` cannot load or decode the document.

use lopdf::Document;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{primary} (fallback extractor: {fallback})")]
    Unreadable { primary: String, fallback: String },
}

/// Turns a document byte stream into its page texts, in page order.
pub trait PageTextExtractor: Send + Sync {
    fn page_texts(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractError>;
}

/// Production extractor for uploaded PDF resumes.
pub struct PdfTextExtractor;

impl PageTextExtractor for PdfTextExtractor {
    fn page_texts(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
        with_fallback(bytes, extract_pages, |bytes| {
            pdf_extract::extract_text_from_mem(bytes).map_err(|e| e.to_string())
        })
    }
}

/// Tries the page-aware `primary` extractor, then `fallback`.
/// The fallback does not preserve page boundaries: its whole text is one page.
fn with_fallback<P, F>(bytes: &[u8], primary: P, fallback: F) -> Result<Vec<String>, ExtractError>
where
    P: FnOnce(&[u8]) -> Result<Vec<String>, String>,
    F: FnOnce(&[u8]) -> Result<String, String>,
{
    match primary(bytes) {
        Ok(pages) => {
            debug!("lopdf extracted {} page(s)", pages.len());
            Ok(pages)
        }
        Err(primary) => {
            warn!("lopdf could not read the document ({primary}), trying pdf-extract");
            fallback(bytes)
                .map(|text| vec![text])
                .map_err(|fallback| ExtractError::Unreadable { primary, fallback })
        }
    }
}

fn extract_pages(bytes: &[u8]) -> Result<Vec<String>, String> {
    let doc = Document::load_mem(bytes).map_err(|e| format!("failed to load PDF: {e}"))?;

    // get_pages is keyed by 1-based page number, so iteration is page order.
    doc.get_pages()
        .keys()
        .map(|&page_number| {
            doc.extract_text(&[page_number])
                .map_err(|e| format!("failed to extract text from page {page_number}: {e}"))
        })
        .collect()
}
