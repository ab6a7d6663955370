// Document Renderer: QuestionList → downloadable PDF.
// Layout is a pure pass over glyph metrics; serialization goes through lopdf.
// CPU-bound rendering must run inside tokio::task::spawn_blocking.

pub mod encoding;
pub mod font_metrics;
pub mod layout;
pub mod pdf;

use thiserror::Error;
use tracing::{debug, info};

use crate::generation::questions::QuestionList;
use crate::render::font_metrics::HELVETICA;

pub use encoding::EncodingPolicy;

pub const TITLE_LINE: &str = "AI-Generated Interview Questions";
pub const DOCUMENT_TITLE: &str = "AI Interview Questions";

const PT_PER_MM: f32 = 72.0 / 25.4;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no questions to render")]
    Empty,

    #[error("question {question} contains character {ch:?} outside Windows-1252")]
    Unencodable { question: usize, ch: char },

    #[error("PDF error: {0}")]
    Pdf(String),
}

/// Page geometry and typography. All lengths are in points.
///
/// Defaults: A4 portrait, 10mm margins with a 20mm page-break margin at the
/// bottom, Helvetica 12pt on 10mm lines, 1mm between entries.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    pub margin_pt: f32,
    pub bottom_margin_pt: f32,
    /// Horizontal inset of entry text inside the margins.
    pub cell_padding_pt: f32,
    pub font_size_pt: f32,
    pub line_height_pt: f32,
    pub title_gap_pt: f32,
    pub entry_gap_pt: f32,
    pub title_color: [u8; 3],
    pub encoding_policy: EncodingPolicy,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_width_pt: 595.28,
            page_height_pt: 841.89,
            margin_pt: 10.0 * PT_PER_MM,
            bottom_margin_pt: 20.0 * PT_PER_MM,
            cell_padding_pt: 1.0 * PT_PER_MM,
            font_size_pt: 12.0,
            line_height_pt: 10.0 * PT_PER_MM,
            title_gap_pt: 10.0 * PT_PER_MM,
            entry_gap_pt: 1.0 * PT_PER_MM,
            title_color: [40, 40, 150],
            encoding_policy: EncodingPolicy::Strict,
        }
    }
}

/// A rendered PDF ready for download. Owned by the caller; nothing retains it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

impl RenderedDocument {
    pub const FILENAME: &'static str = "interview_questions.pdf";
    pub const MIME_TYPE: &'static str = "application/pdf";
}

/// Renders a non-empty question list. Identical input gives byte-identical output.
pub fn render_questions(
    questions: &QuestionList,
    options: &RenderOptions,
) -> Result<RenderedDocument, RenderError> {
    if questions.is_empty() {
        return Err(RenderError::Empty);
    }

    let entries = questions
        .numbered()
        .enumerate()
        .map(|(i, entry)| encoding::sanitize(&entry, i + 1, options.encoding_policy))
        .collect::<Result<Vec<_>, _>>()?;

    let pages = layout::layout_pages(TITLE_LINE, &entries, &HELVETICA, options);
    debug!(
        "Laid out {} question(s) on {} page(s)",
        entries.len(),
        pages.len()
    );

    let bytes = pdf::write_pdf(&pages, &HELVETICA, options, DOCUMENT_TITLE)?;
    info!(
        "Rendered question PDF: {} page(s), {} bytes",
        pages.len(),
        bytes.len()
    );

    Ok(RenderedDocument {
        bytes,
        page_count: pages.len(),
    })
}
