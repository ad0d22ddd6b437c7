//! Package parts around the body: content types, relationships, styles,
//! settings, properties, headers and footers

use super::body::{run, spacing_exact};
use super::drawing::{self, DrawingIds};
use super::xml::XmlWriter;
use super::NAMESPACES;
use crate::model::*;
use chrono::{SecondsFormat, Utc};
use std::io;

pub const HEADER_RECTO_REL: &str = "rIdHeaderRecto";
pub const HEADER_VERSO_REL: &str = "rIdHeaderVerso";
pub const FOOTER_RECTO_REL: &str = "rIdFooterRecto";
pub const FOOTER_VERSO_REL: &str = "rIdFooterVerso";
pub const FOOTER_EMPTY_REL: &str = "rIdFooterEmpty";

pub const HEADER_RECTO_PART: &str = "header1.xml";
pub const HEADER_VERSO_PART: &str = "header2.xml";
pub const FOOTER_RECTO_PART: &str = "footer1.xml";
pub const FOOTER_VERSO_PART: &str = "footer2.xml";
pub const FOOTER_EMPTY_PART: &str = "footer3.xml";

const PAGE_NUMBER_SIZE_PT: f64 = 10.0;

const RELS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const MAIN_CONTENT: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml";

pub fn image_rel_id(image: ImageId) -> String {
    format!("rIdImage{}", image.0 + 1)
}

pub fn image_part(image: ImageId) -> String {
    format!("media/image{}.png", image.0 + 1)
}

pub fn content_types(has_headers: bool) -> io::Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.open(
        "Types",
        &[("xmlns", "http://schemas.openxmlformats.org/package/2006/content-types")],
    )?;
    xml.empty(
        "Default",
        &[
            ("Extension", "rels"),
            ("ContentType", "application/vnd.openxmlformats-package.relationships+xml"),
        ],
    )?;
    xml.empty("Default", &[("Extension", "xml"), ("ContentType", "application/xml")])?;
    xml.empty("Default", &[("Extension", "png"), ("ContentType", "image/png")])?;

    let mut overrides = vec![
        ("/word/document.xml".to_string(), format!("{MAIN_CONTENT}.document.main+xml")),
        ("/word/styles.xml".to_string(), format!("{MAIN_CONTENT}.styles+xml")),
        ("/word/settings.xml".to_string(), format!("{MAIN_CONTENT}.settings+xml")),
        (
            "/docProps/core.xml".to_string(),
            "application/vnd.openxmlformats-package.core-properties+xml".to_string(),
        ),
        (
            "/docProps/app.xml".to_string(),
            "application/vnd.openxmlformats-officedocument.extended-properties+xml".to_string(),
        ),
    ];
    for footer in [FOOTER_RECTO_PART, FOOTER_VERSO_PART, FOOTER_EMPTY_PART] {
        overrides.push((format!("/word/{footer}"), format!("{MAIN_CONTENT}.footer+xml")));
    }
    if has_headers {
        for header in [HEADER_RECTO_PART, HEADER_VERSO_PART] {
            overrides.push((format!("/word/{header}"), format!("{MAIN_CONTENT}.header+xml")));
        }
    }
    for (part, content_type) in &overrides {
        xml.empty("Override", &[("PartName", part), ("ContentType", content_type)])?;
    }
    xml.close("Types")?;
    Ok(xml.finish())
}

/// `_rels/.rels`
pub fn package_rels() -> io::Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.open("Relationships", &[("xmlns", RELS_NS)])?;
    xml.empty(
        "Relationship",
        &[
            ("Id", "rId1"),
            ("Type", &format!("{REL_BASE}/officeDocument")),
            ("Target", "word/document.xml"),
        ],
    )?;
    xml.empty(
        "Relationship",
        &[
            ("Id", "rId2"),
            (
                "Type",
                "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties",
            ),
            ("Target", "docProps/core.xml"),
        ],
    )?;
    xml.empty(
        "Relationship",
        &[
            ("Id", "rId3"),
            ("Type", &format!("{REL_BASE}/extended-properties")),
            ("Target", "docProps/app.xml"),
        ],
    )?;
    xml.close("Relationships")?;
    Ok(xml.finish())
}

/// `word/_rels/document.xml.rels`
pub fn document_rels(doc: &PlannerDocument) -> io::Result<Vec<u8>> {
    let mut rels = vec![
        ("rIdStyles".to_string(), "styles", "styles.xml".to_string()),
        ("rIdSettings".to_string(), "settings", "settings.xml".to_string()),
        (FOOTER_RECTO_REL.to_string(), "footer", FOOTER_RECTO_PART.to_string()),
        (FOOTER_VERSO_REL.to_string(), "footer", FOOTER_VERSO_PART.to_string()),
        (FOOTER_EMPTY_REL.to_string(), "footer", FOOTER_EMPTY_PART.to_string()),
    ];
    if !doc.decorations.is_empty() {
        rels.push((HEADER_RECTO_REL.to_string(), "header", HEADER_RECTO_PART.to_string()));
        rels.push((HEADER_VERSO_REL.to_string(), "header", HEADER_VERSO_PART.to_string()));
    }
    for index in 0..doc.images.len() {
        let id = ImageId(index);
        rels.push((image_rel_id(id), "image", image_part(id)));
    }

    let mut xml = XmlWriter::new()?;
    xml.open("Relationships", &[("xmlns", RELS_NS)])?;
    for (id, kind, target) in &rels {
        let kind = format!("{REL_BASE}/{kind}");
        xml.empty("Relationship", &[("Id", id), ("Type", &kind), ("Target", target)])?;
    }
    xml.close("Relationships")?;
    Ok(xml.finish())
}

/// Normal style: Times New Roman 11pt, no paragraph spacing
pub fn styles() -> io::Result<Vec<u8>> {
    let family = Font::Serif.family();
    let size = ((DEFAULT_FONT_SIZE_PT * 2.0) as i64).to_string();
    let line = ((SINGLE_LINE_FACTOR * 240.0).round() as i64).to_string();

    let mut xml = XmlWriter::new()?;
    xml.open("w:styles", NAMESPACES)?;
    xml.open("w:docDefaults", &[])?;
    xml.open("w:rPrDefault", &[])?;
    xml.open("w:rPr", &[])?;
    xml.empty(
        "w:rFonts",
        &[
            ("w:ascii", family),
            ("w:eastAsia", family),
            ("w:hAnsi", family),
            ("w:cs", family),
        ],
    )?;
    xml.val("w:sz", &size)?;
    xml.val("w:szCs", &size)?;
    xml.val("w:lang", "en-US")?;
    xml.close("w:rPr")?;
    xml.close("w:rPrDefault")?;
    xml.open("w:pPrDefault", &[])?;
    xml.open("w:pPr", &[])?;
    xml.empty(
        "w:spacing",
        &[
            ("w:before", "0"),
            ("w:after", "0"),
            ("w:line", &line),
            ("w:lineRule", "auto"),
        ],
    )?;
    xml.close("w:pPr")?;
    xml.close("w:pPrDefault")?;
    xml.close("w:docDefaults")?;

    xml.open(
        "w:style",
        &[("w:type", "paragraph"), ("w:default", "1"), ("w:styleId", "Normal")],
    )?;
    xml.val("w:name", "Normal")?;
    xml.empty("w:qFormat", &[])?;
    xml.close("w:style")?;

    xml.open(
        "w:style",
        &[("w:type", "table"), ("w:default", "1"), ("w:styleId", "TableNormal")],
    )?;
    xml.val("w:name", "Normal Table")?;
    xml.close("w:style")?;

    xml.close("w:styles")?;
    Ok(xml.finish())
}

/// Mirrored margins and separate odd/even headers for duplex printing
pub fn settings() -> io::Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.open("w:settings", NAMESPACES)?;
    xml.empty("w:mirrorMargins", &[])?;
    xml.val("w:defaultTabStop", "720")?;
    xml.empty("w:evenAndOddHeaders", &[])?;
    xml.close("w:settings")?;
    Ok(xml.finish())
}

/// `docProps/core.xml`
pub fn core_properties(title: &str, creator: &str) -> io::Result<Vec<u8>> {
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let mut xml = XmlWriter::new()?;
    xml.open(
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    xml.leaf("dc:title", &[], title)?;
    xml.leaf("dc:creator", &[], creator)?;
    xml.leaf("dcterms:created", &[("xsi:type", "dcterms:W3CDTF")], &now)?;
    xml.leaf("dcterms:modified", &[("xsi:type", "dcterms:W3CDTF")], &now)?;
    xml.close("cp:coreProperties")?;
    Ok(xml.finish())
}

/// `docProps/app.xml`
pub fn app_properties(application: &str, pages: usize) -> io::Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.open(
        "Properties",
        &[(
            "xmlns",
            "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties",
        )],
    )?;
    xml.leaf("Application", &[], application)?;
    xml.leaf("Pages", &[], &pages.to_string())?;
    xml.close("Properties")?;
    Ok(xml.finish())
}

/// Header holding one side's decorations in a 1pt paragraph
pub fn header(decorations: &SideDecorations, ids: &mut DrawingIds) -> io::Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.open("w:hdr", NAMESPACES)?;
    xml.open("w:p", &[])?;
    xml.open("w:pPr", &[])?;
    spacing_exact(&mut xml, 0.0, 1.0)?;
    xml.close("w:pPr")?;
    if let Some(guides) = &decorations.guides {
        drawing::guides(&mut xml, ids, guides)?;
    }
    if let Some(overlay) = &decorations.overlay {
        drawing::text_box(&mut xml, ids, overlay)?;
    }
    xml.close("w:p")?;
    xml.close("w:hdr")?;
    Ok(xml.finish())
}

/// Footer with a PAGE field on the outer edge, or empty
pub fn footer(align: Option<Align>) -> io::Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.open("w:ftr", NAMESPACES)?;
    xml.open("w:p", &[])?;
    if let Some(align) = align {
        xml.open("w:pPr", &[])?;
        xml.val("w:jc", super::body::jc(align))?;
        xml.close("w:pPr")?;

        let size = ((PAGE_NUMBER_SIZE_PT * 2.0) as i64).to_string();
        let field_run = |xml: &mut XmlWriter, kind: &str| -> io::Result<()> {
            xml.open("w:r", &[])?;
            xml.open("w:rPr", &[])?;
            xml.val("w:sz", &size)?;
            xml.close("w:rPr")?;
            xml.empty("w:fldChar", &[("w:fldCharType", kind)])?;
            xml.close("w:r")
        };
        field_run(&mut xml, "begin")?;
        xml.open("w:r", &[])?;
        xml.leaf("w:instrText", &[("xml:space", "preserve")], " PAGE ")?;
        xml.close("w:r")?;
        field_run(&mut xml, "separate")?;
        run(&mut xml, &TextRun::new("1").size(PAGE_NUMBER_SIZE_PT))?;
        field_run(&mut xml, "end")?;
    }
    xml.close("w:p")?;
    xml.close("w:ftr")?;
    Ok(xml.finish())
}
