// Text Acquisition: turns an uploaded PDF or pasted text into ResumeText.
// A non-empty upload always wins over pasted text.

pub mod extract;

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info};

use crate::errors::AppError;

pub use extract::{ExtractError, PageTextExtractor, PdfTextExtractor};

/// Plain-text resume content. Never blank once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeText(String);

impl ResumeText {
    /// Pasted text is trimmed of surrounding whitespace and otherwise kept verbatim.
    pub fn from_pasted(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| ResumeText(trimmed.to_string()))
    }

    /// Page texts are concatenated in order with no separator.
    pub fn from_pages<I, S>(pages: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let text: String = pages.into_iter().fold(String::new(), |mut acc, page| {
            acc.push_str(page.as_ref());
            acc
        });
        (!text.trim().is_empty()).then_some(ResumeText(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The raw inputs of one generate request.
#[derive(Debug, Clone, Default)]
pub struct ResumeSource {
    pub document: Option<Bytes>,
    pub pasted_text: Option<String>,
}

/// Resolves a `ResumeSource` into `ResumeText`.
///
/// Fails with `InputMissing` when there is nothing usable, and with `DocumentParse`
/// when the uploaded document cannot be read.
pub fn acquire(
    source: &ResumeSource,
    extractor: &dyn PageTextExtractor,
) -> Result<ResumeText, AppError> {
    if let Some(document) = source.document.as_ref().filter(|d| !d.is_empty()) {
        info!("Extracting resume text from uploaded document ({} bytes)", document.len());
        let pages = extractor.page_texts(document)?;
        debug!("Document yielded {} page(s)", pages.len());
        return ResumeText::from_pages(&pages).ok_or(AppError::InputMissing);
    }

    info!("Using pasted resume text");
    source
        .pasted_text
        .as_deref()
        .and_then(ResumeText::from_pasted)
        .ok_or(AppError::InputMissing)
}

/// Runs `acquire` on the blocking pool; PDF parsing is CPU-bound.
pub async fn acquire_blocking(
    source: ResumeSource,
    extractor: Arc<dyn PageTextExtractor>,
) -> Result<ResumeText, AppError> {
    tokio::task::spawn_blocking(move || acquire(&source, extractor.as_ref()))
        .await
        .map_err(|e| {
            if e.is_panic() {
                AppError::DocumentParse("the document extractor crashed on this file".to_string())
            } else {
                AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extraction: {e}"))
            }
        })?
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedPages {
        pages: Vec<&'static str>,
        calls: AtomicUsize,
    }

    impl FixedPages {
        fn new(pages: Vec<&'static str>) -> Self {
            Self {
                pages,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl PageTextExtractor for FixedPages {
        fn page_texts(&self, _bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.pages.iter().map(|p| p.to_string()).collect())
        }
    }

    struct Broken;

    impl PageTextExtractor for Broken {
        fn page_texts(&self, _bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
            Err(ExtractError::Unreadable {
                primary: "bad xref".to_string(),
                fallback: "bad header".to_string(),
            })
        }
    }

    struct Panicking;

    impl PageTextExtractor for Panicking {
        fn page_texts(&self, _bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
            panic!("font table overflow")
        }
    }

    fn pasted(text: &str) -> ResumeSource {
        ResumeSource {
            document: None,
            pasted_text: Some(text.to_string()),
        }
    }

    fn upload(bytes: &'static [u8], text: Option<&str>) -> ResumeSource {
        ResumeSource {
            document: Some(Bytes::from_static(bytes)),
            pasted_text: text.map(String::from),
        }
    }

    #[test]
    fn test_pasted_text_is_trimmed() {
        let text = acquire(&pasted("\n  Jane Doe\nRust engineer  \t\n"), &Broken).unwrap();
        assert_eq!(text.as_str(), "Jane Doe\nRust engineer");
    }

    #[test]
    fn test_trim_is_idempotent() {
        let once = acquire(&pasted("  Senior SRE  "), &Broken).unwrap();
        let twice = acquire(&pasted(once.as_str()), &Broken).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_pages_are_concatenated_without_separator() {
        let extractor = FixedPages::new(vec!["Jane Doe\n", "Experience", " - Acme"]);
        let text = acquire(&upload(b"%PDF", None), &extractor).unwrap();
        assert_eq!(text.as_str(), "Jane Doe\nExperience - Acme");
    }

    #[test]
    fn test_document_wins_over_pasted_text() {
        let extractor = FixedPages::new(vec!["From the PDF"]);
        let text = acquire(&upload(b"%PDF", Some("From the text box")), &extractor).unwrap();
        assert_eq!(text.as_str(), "From the PDF");
        assert_eq!(extractor.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_blank_document_text_does_not_fall_back_to_pasted() {
        let extractor = FixedPages::new(vec!["  ", "\n"]);
        let result = acquire(&upload(b"%PDF", Some("pasted resume")), &extractor);
        assert!(matches!(result, Err(AppError::InputMissing)));
    }

    #[test]
    fn test_empty_upload_counts_as_no_document() {
        let extractor = FixedPages::new(vec!["never used"]);
        let text = acquire(&upload(b"", Some("pasted resume")), &extractor).unwrap();
        assert_eq!(text.as_str(), "pasted resume");
        assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_nothing_provided_is_input_missing() {
        let result = acquire(&ResumeSource::default(), &Broken);
        assert!(matches!(result, Err(AppError::InputMissing)));
    }

    #[test]
    fn test_whitespace_only_text_is_input_missing() {
        let result = acquire(&pasted(" \n\t "), &Broken);
        assert!(matches!(result, Err(AppError::InputMissing)));
    }

    #[test]
    fn test_unreadable_document_is_parse_error() {
        let result = acquire(&upload(b"junk", Some("pasted")), &Broken);
        match result {
            Err(AppError::DocumentParse(msg)) => assert!(msg.contains("bad xref")),
            other => panic!("expected DocumentParse, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_acquire_blocking_maps_extractor_panic_to_parse_error() {
        let result = acquire_blocking(upload(b"%PDF", None), Arc::new(Panicking)).await;
        assert!(matches!(result, Err(AppError::DocumentParse(_))));
    }

    #[tokio::test]
    async fn test_acquire_blocking_returns_text() {
        let text = acquire_blocking(pasted(" hello "), Arc::new(Broken))
            .await
            .unwrap();
        assert_eq!(text.as_str(), "hello");
    }
}
