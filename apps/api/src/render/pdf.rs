//! Serializes laid-out pages into a PDF with `lopdf`.
//!
//! Output is deterministic: object ids are allocated in a fixed order and no
//! timestamps or file identifiers are written. Content streams stay uncompressed.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::render::encoding::encode_line;
use crate::render::font_metrics::FontMetricTable;
use crate::render::layout::{LineKind, PageLayout};
use crate::render::{RenderError, RenderOptions};

const FONT_RESOURCE: &str = "F1";

pub fn write_pdf(
    pages: &[PageLayout],
    metrics: &FontMetricTable,
    options: &RenderOptions,
    document_title: &str,
) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => metrics.base_font,
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_RESOURCE => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = page_content(page, options);
        let encoded = content
            .encode()
            .map_err(|e| RenderError::Pdf(format!("content stream encoding failed: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(options.page_width_pt),
                Object::Real(options.page_height_pt),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(encode_line(document_title)),
        "Producer" => Object::string_literal(
            concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION")),
        ),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| RenderError::Pdf(format!("failed to serialize PDF: {e}")))?;
    Ok(buffer)
}

fn page_content(page: &PageLayout, options: &RenderOptions) -> Content {
    let mut operations = Vec::with_capacity(page.lines.len() * 6);

    for line in &page.lines {
        let [r, g, b] = match line.kind {
            LineKind::Title => options.title_color,
            LineKind::Entry => [0, 0, 0],
        };

        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![FONT_RESOURCE.into(), Object::Real(options.font_size_pt)],
        ));
        operations.push(Operation::new(
            "rg",
            vec![channel(r), channel(g), channel(b)],
        ));
        operations.push(Operation::new(
            "Td",
            vec![Object::Real(line.x), Object::Real(line.baseline_y)],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(encode_line(&line.text))],
        ));
        operations.push(Operation::new("ET", vec![]));
    }

    Content { operations }
}

fn channel(value: u8) -> Object {
    Object::Real(f32::from(value) / 255.0)
}
