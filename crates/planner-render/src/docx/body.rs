//! `word/document.xml`: paragraphs, tables, pictures and section properties

use super::drawing::{self, DrawingIds};
use super::parts;
use super::xml::XmlWriter;
use super::NAMESPACES;
use crate::model::*;
use planner_layout::constants::{cm_to_twips, grayscale_hex, pt_to_twips};
use std::io;

/// Half-points of the 1pt run inside minimized paragraphs
const MINIMIZED_RUN_SIZE: &str = "2";

pub(super) fn jc(align: Align) -> &'static str {
    match align {
        Align::Left => "left",
        Align::Center => "center",
        Align::Right => "right",
    }
}

fn v_align(align: VAlign) -> &'static str {
    match align {
        VAlign::Top => "top",
        VAlign::Center => "center",
        VAlign::Bottom => "bottom",
    }
}

fn half_points(pt: f64) -> String {
    ((pt * 2.0).round() as i64).to_string()
}

fn shading(xml: &mut XmlWriter, grayscale: u8) -> io::Result<()> {
    let fill = grayscale_hex(grayscale);
    xml.empty("w:shd", &[("w:val", "clear"), ("w:color", "auto"), ("w:fill", &fill)])
}

/// `w:spacing` with an exact line height
pub(super) fn spacing_exact(xml: &mut XmlWriter, after_pt: f64, line_pt: f64) -> io::Result<()> {
    let after = pt_to_twips(after_pt).to_string();
    let line = pt_to_twips(line_pt).to_string();
    xml.empty(
        "w:spacing",
        &[
            ("w:before", "0"),
            ("w:after", &after),
            ("w:line", &line),
            ("w:lineRule", "exact"),
        ],
    )
}

pub(super) fn run(xml: &mut XmlWriter, run: &TextRun) -> io::Result<()> {
    xml.open("w:r", &[])?;
    xml.open("w:rPr", &[])?;
    if run.font != Font::default() {
        let family = run.font.family();
        xml.empty(
            "w:rFonts",
            &[("w:ascii", family), ("w:hAnsi", family), ("w:cs", family)],
        )?;
    }
    if run.bold {
        xml.empty("w:b", &[])?;
    }
    if let Some(color) = run.color {
        xml.val("w:color", &grayscale_hex(color))?;
    }
    if let Some(size) = run.size_pt {
        let sz = half_points(size);
        xml.val("w:sz", &sz)?;
        xml.val("w:szCs", &sz)?;
    }
    xml.close("w:rPr")?;
    xml.leaf("w:t", &[("xml:space", "preserve")], &run.text)?;
    xml.close("w:r")
}

fn paragraph(xml: &mut XmlWriter, p: &Paragraph) -> io::Result<()> {
    xml.open("w:p", &[])?;
    xml.open("w:pPr", &[])?;
    if let Some(gray) = p.shading {
        shading(xml, gray)?;
    }
    match p.line_spacing {
        LineSpacing::Exact(line) => spacing_exact(xml, p.space_after_pt, line)?,
        LineSpacing::Single => {
            let after = pt_to_twips(p.space_after_pt).to_string();
            xml.empty("w:spacing", &[("w:before", "0"), ("w:after", &after)])?;
        }
    }
    xml.val("w:jc", jc(p.align))?;
    xml.close("w:pPr")?;
    for r in &p.runs {
        run(xml, r)?;
    }
    xml.close("w:p")
}

/// Paragraph properties of a 1pt exact paragraph
fn minimized_ppr(xml: &mut XmlWriter) -> io::Result<()> {
    spacing_exact(xml, 0.0, 1.0)?;
    xml.open("w:rPr", &[])?;
    xml.val("w:sz", MINIMIZED_RUN_SIZE)?;
    xml.close("w:rPr")
}

fn page_break(xml: &mut XmlWriter, minimized: bool) -> io::Result<()> {
    xml.open("w:p", &[])?;
    if minimized {
        xml.open("w:pPr", &[])?;
        minimized_ppr(xml)?;
        xml.close("w:pPr")?;
    }
    xml.open("w:r", &[])?;
    if minimized {
        xml.open("w:rPr", &[])?;
        xml.val("w:sz", MINIMIZED_RUN_SIZE)?;
        xml.close("w:rPr")?;
    }
    xml.empty("w:br", &[("w:type", "page")])?;
    xml.close("w:r")?;
    xml.close("w:p")
}

fn gap(xml: &mut XmlWriter, height_pt: f64) -> io::Result<()> {
    xml.open("w:p", &[])?;
    xml.open("w:pPr", &[])?;
    spacing_exact(xml, 0.0, height_pt)?;
    xml.close("w:pPr")?;
    run(xml, &TextRun::new(" "))?;
    xml.close("w:p")
}

fn border_edges(xml: &mut XmlWriter, borders: Option<TableBorders>) -> io::Result<()> {
    let (val, size, color) = match borders {
        Some(b) => ("single", b.size_eighths.to_string(), grayscale_hex(b.color)),
        None => ("nil", "0".to_string(), "auto".to_string()),
    };
    xml.open("w:tblBorders", &[])?;
    for edge in ["w:top", "w:left", "w:bottom", "w:right", "w:insideH", "w:insideV"] {
        xml.empty(
            edge,
            &[
                ("w:val", val),
                ("w:sz", &size),
                ("w:space", "0"),
                ("w:color", &color),
            ],
        )?;
    }
    xml.close("w:tblBorders")
}

fn dxa(xml: &mut XmlWriter, name: &str, twips: i64) -> io::Result<()> {
    let w = twips.max(0).to_string();
    xml.empty(name, &[("w:w", &w), ("w:type", "dxa")])
}

fn table(xml: &mut XmlWriter, t: &Table) -> io::Result<()> {
    xml.open("w:tbl", &[])?;
    xml.open("w:tblPr", &[])?;
    dxa(xml, "w:tblW", t.width_twips())?;
    xml.val("w:jc", jc(t.align))?;
    border_edges(xml, t.borders)?;
    xml.empty("w:tblLayout", &[("w:type", "fixed")])?;
    xml.open("w:tblCellMar", &[])?;
    dxa(xml, "w:left", t.cell_margin_or_default())?;
    dxa(xml, "w:right", t.cell_margin_or_default())?;
    xml.close("w:tblCellMar")?;
    xml.close("w:tblPr")?;

    xml.open("w:tblGrid", &[])?;
    for width in &t.column_widths {
        let w = width.to_string();
        xml.empty("w:gridCol", &[("w:w", &w)])?;
    }
    xml.close("w:tblGrid")?;

    for row in &t.rows {
        table_row(xml, t, row)?;
    }
    xml.close("w:tbl")
}

fn table_row(xml: &mut XmlWriter, t: &Table, row: &Row) -> io::Result<()> {
    let (height, rule) = match row.height {
        RowHeight::Exact(h) => (h, "exact"),
        RowHeight::AtLeast(h) => (h, "atLeast"),
    };
    let height = height.max(0).to_string();

    xml.open("w:tr", &[])?;
    xml.open("w:trPr", &[])?;
    xml.empty("w:trHeight", &[("w:val", &height), ("w:hRule", rule)])?;
    xml.close("w:trPr")?;

    let mut column = 0;
    for cell in &row.cells {
        let span = cell.span.max(1);
        let width: i64 = t.column_widths.iter().skip(column).take(span).sum();
        column += span;
        table_cell(xml, cell, width)?;
    }
    xml.close("w:tr")
}

fn table_cell(xml: &mut XmlWriter, cell: &Cell, width: i64) -> io::Result<()> {
    xml.open("w:tc", &[])?;
    xml.open("w:tcPr", &[])?;
    dxa(xml, "w:tcW", width)?;
    if cell.span > 1 {
        xml.val("w:gridSpan", &cell.span.to_string())?;
    }
    if let Some(gray) = cell.shading {
        shading(xml, gray)?;
    }
    xml.val("w:vAlign", v_align(cell.v_align))?;
    xml.close("w:tcPr")?;

    for item in &cell.items {
        match item {
            CellItem::Paragraph(p) => paragraph(xml, p)?,
            CellItem::Table(t) => table(xml, t)?,
        }
    }
    // A cell must end with a paragraph
    if !matches!(cell.items.last(), Some(CellItem::Paragraph(_))) {
        xml.open("w:p", &[])?;
        xml.open("w:pPr", &[])?;
        minimized_ppr(xml)?;
        xml.close("w:pPr")?;
        xml.close("w:p")?;
    }
    xml.close("w:tc")
}

fn image(xml: &mut XmlWriter, ids: &mut DrawingIds, block: &ImageBlock) -> io::Result<()> {
    xml.open("w:p", &[])?;
    xml.open("w:pPr", &[])?;
    xml.empty("w:spacing", &[("w:before", "0"), ("w:after", "0")])?;
    xml.close("w:pPr")?;
    drawing::inline_picture(
        xml,
        ids,
        &parts::image_rel_id(block.image),
        block.width_cm,
        block.height_cm,
    )?;
    if let Some(overlay) = &block.overlay {
        drawing::text_box(xml, ids, overlay)?;
    }
    xml.close("w:p")
}

fn section_properties(
    xml: &mut XmlWriter,
    doc: &PlannerDocument,
    index: usize,
    numbering: PageNumbering,
) -> io::Result<()> {
    let geometry = &doc.geometry;
    let twips = |cm: f64| cm_to_twips(cm).to_string();

    xml.open("w:sectPr", &[])?;
    // Later sections inherit the decoration headers
    if index == 0 && !doc.decorations.is_empty() {
        xml.empty(
            "w:headerReference",
            &[("w:type", "default"), ("r:id", parts::HEADER_RECTO_REL)],
        )?;
        xml.empty(
            "w:headerReference",
            &[("w:type", "even"), ("r:id", parts::HEADER_VERSO_REL)],
        )?;
    }
    let footers = match numbering {
        PageNumbering::Continue => None,
        PageNumbering::Numbered { .. } => {
            Some((parts::FOOTER_RECTO_REL, parts::FOOTER_VERSO_REL))
        }
        PageNumbering::Suppressed => Some((parts::FOOTER_EMPTY_REL, parts::FOOTER_EMPTY_REL)),
    };
    if let Some((recto, verso)) = footers {
        xml.empty("w:footerReference", &[("w:type", "default"), ("r:id", recto)])?;
        xml.empty("w:footerReference", &[("w:type", "even"), ("r:id", verso)])?;
    }

    xml.val("w:type", "nextPage")?;
    xml.empty(
        "w:pgSz",
        &[
            ("w:w", &twips(geometry.page_width)),
            ("w:h", &twips(geometry.page_height)),
        ],
    )?;
    xml.empty(
        "w:pgMar",
        &[
            ("w:top", &twips(geometry.margin_top)),
            ("w:right", &twips(geometry.margin_right)),
            ("w:bottom", &twips(geometry.margin_bottom)),
            ("w:left", &twips(geometry.margin_left)),
            ("w:header", "0"),
            ("w:footer", &twips(geometry.footer_distance)),
            ("w:gutter", &twips(geometry.gutter)),
        ],
    )?;
    if let PageNumbering::Numbered { start } = numbering {
        xml.empty("w:pgNumType", &[("w:start", &start.to_string())])?;
    }
    xml.close("w:sectPr")
}

/// Serialize the whole body
pub fn document_xml(doc: &PlannerDocument, ids: &mut DrawingIds) -> io::Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.open("w:document", NAMESPACES)?;
    xml.open("w:body", &[])?;

    let last = doc.sections.len().saturating_sub(1);
    for (index, section) in doc.sections.iter().enumerate() {
        for block in &section.blocks {
            match block {
                Block::Paragraph(p) => paragraph(&mut xml, p)?,
                Block::Table(t) => table(&mut xml, t)?,
                Block::Image(i) => image(&mut xml, ids, i)?,
                Block::Gap { height_pt } => gap(&mut xml, *height_pt)?,
                Block::PageBreak { minimized } => page_break(&mut xml, *minimized)?,
            }
        }

        if index < last {
            // The section ends with the paragraph carrying its properties
            xml.open("w:p", &[])?;
            xml.open("w:pPr", &[])?;
            minimized_ppr(&mut xml)?;
            section_properties(&mut xml, doc, index, section.numbering)?;
            xml.close("w:pPr")?;
            xml.close("w:p")?;
        } else {
            section_properties(&mut xml, doc, index, section.numbering)?;
        }
    }

    xml.close("w:body")?;
    xml.close("w:document")?;
    Ok(xml.finish())
}
