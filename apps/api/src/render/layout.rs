//! Page layout for the question PDF: title, numbered entries, word wrap, page breaks.
//!
//! Coordinates are PDF points with the origin at the bottom-left of the page.
//! The layout pass is pure, so it can be tested without serializing a PDF.

use crate::render::font_metrics::FontMetricTable;
use crate::render::RenderOptions;

/// Role of a placed line; the writer picks the fill colour from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Title,
    Entry,
}

/// A single line of text at its final position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub kind: LineKind,
    pub x: f32,
    pub baseline_y: f32,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub lines: Vec<PlacedLine>,
}

/// Cursor that walks down the page in line boxes, breaking to a new page
/// when the next box would cross the bottom margin.
struct Cursor<'a> {
    options: &'a RenderOptions,
    pages: Vec<PageLayout>,
    /// Distance from the top edge to the top of the next line box.
    y_from_top: f32,
}

impl<'a> Cursor<'a> {
    fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            pages: vec![PageLayout::default()],
            y_from_top: options.margin_pt,
        }
    }

    fn place(&mut self, kind: LineKind, x: f32, text: String) {
        let o = self.options;
        if self.y_from_top + o.line_height_pt > o.page_height_pt - o.bottom_margin_pt
            && self.pages.last().is_some_and(|p| !p.lines.is_empty())
        {
            self.pages.push(PageLayout::default());
            self.y_from_top = o.margin_pt;
        }

        // Text sits vertically centred in its line box.
        let baseline_from_top = self.y_from_top + o.line_height_pt / 2.0 + 0.3 * o.font_size_pt;
        let line = PlacedLine {
            kind,
            x,
            baseline_y: o.page_height_pt - baseline_from_top,
            text,
        };
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(line);
        }
        self.y_from_top += o.line_height_pt;
    }

    fn gap(&mut self, height: f32) {
        self.y_from_top += height;
    }
}

/// Lays out `title` and the already-numbered `entries` across as many pages as needed.
pub fn layout_pages(
    title: &str,
    entries: &[String],
    metrics: &FontMetricTable,
    options: &RenderOptions,
) -> Vec<PageLayout> {
    let cell_width = options.page_width_pt - 2.0 * options.margin_pt;
    let text_x = options.margin_pt + options.cell_padding_pt;
    let text_width = cell_width - 2.0 * options.cell_padding_pt;

    let mut cursor = Cursor::new(options);

    let title_width = metrics.measure_str(title, options.font_size_pt);
    let title_x = options.margin_pt + (cell_width - title_width).max(0.0) / 2.0;
    cursor.place(LineKind::Title, title_x, title.to_string());
    cursor.gap(options.title_gap_pt);

    for entry in entries {
        for line in metrics.wrap_lines(entry, options.font_size_pt, text_width) {
            cursor.place(LineKind::Entry, text_x, line);
        }
        cursor.gap(options.entry_gap_pt);
    }

    cursor.pages
}
