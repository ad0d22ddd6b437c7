//! WordprocessingML (`.docx`) writer
//!
//! The package is assembled in memory: one XML part per concern, zipped
//! with deflate. Page decorations live in the odd/even headers so every
//! page of a side gets them without touching the body flow.

mod body;
mod drawing;
mod parts;
mod xml;

use crate::model::*;
use crate::types::*;
use drawing::DrawingIds;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub(crate) const NAMESPACES: &[(&str, &str)] = &[
    ("xmlns:w", "http://schemas.openxmlformats.org/wordprocessingml/2006/main"),
    ("xmlns:r", "http://schemas.openxmlformats.org/officeDocument/2006/relationships"),
    ("xmlns:wp", "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing"),
    ("xmlns:a", "http://schemas.openxmlformats.org/drawingml/2006/main"),
    ("xmlns:pic", "http://schemas.openxmlformats.org/drawingml/2006/picture"),
    ("xmlns:wps", "http://schemas.microsoft.com/office/word/2010/wordprocessingShape"),
];

/// Serialize `doc` into `.docx` bytes; `generator` is recorded as the
/// creating application
pub fn write_docx(doc: &PlannerDocument, generator: &str) -> Result<Vec<u8>> {
    let mut ids = DrawingIds::default();
    let has_headers = !doc.decorations.is_empty();

    let mut files: Vec<(String, Vec<u8>)> = vec![
        ("[Content_Types].xml".into(), parts::content_types(has_headers)?),
        ("_rels/.rels".into(), parts::package_rels()?),
        ("docProps/core.xml".into(), parts::core_properties(&doc.title, generator)?),
        (
            "docProps/app.xml".into(),
            parts::app_properties(generator, doc.page_count())?,
        ),
        ("word/document.xml".into(), body::document_xml(doc, &mut ids)?),
        ("word/_rels/document.xml.rels".into(), parts::document_rels(doc)?),
        ("word/styles.xml".into(), parts::styles()?),
        ("word/settings.xml".into(), parts::settings()?),
        (
            format!("word/{}", parts::FOOTER_RECTO_PART),
            parts::footer(Some(Align::Right))?,
        ),
        (
            format!("word/{}", parts::FOOTER_VERSO_PART),
            parts::footer(Some(Align::Left))?,
        ),
        (format!("word/{}", parts::FOOTER_EMPTY_PART), parts::footer(None)?),
    ];
    if has_headers {
        files.push((
            format!("word/{}", parts::HEADER_RECTO_PART),
            parts::header(&doc.decorations.recto, &mut ids)?,
        ));
        files.push((
            format!("word/{}", parts::HEADER_VERSO_PART),
            parts::header(&doc.decorations.verso, &mut ids)?,
        ));
    }

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, bytes) in &files {
        zip.start_file(name.as_str(), options)?;
        zip.write_all(bytes)?;
    }
    for (index, image) in doc.images.iter().enumerate() {
        // PNG data is already compressed
        let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        zip.start_file(format!("word/{}", parts::image_part(ImageId(index))), stored)?;
        zip.write_all(&image.png)?;
    }
    let bytes = zip.finish()?.into_inner();

    log::debug!(
        "Wrote DOCX package: {} parts, {} images, {} bytes",
        files.len(),
        doc.images.len(),
        bytes.len()
    );
    Ok(bytes)
}
