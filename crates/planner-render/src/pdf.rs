//! Native PDF rendering of a [`PlannerDocument`]
//!
//! Blocks are laid out top-down inside the content area of each page, in
//! points measured from the top edge. Page breaks come only from the
//! document's explicit breaks, so the PDF has exactly the sides the model
//! counted. Text widths are estimated from the font size; the built-in
//! PDF fonts need no embedding.

use crate::model::*;
use crate::types::*;
use planner_layout::constants::{grayscale_channel, twips_to_pt, AVERAGE_CHAR_WIDTH_RATIO, PT_PER_CM};
use planner_layout::PageSide;
use printpdf::color::Color;
use printpdf::graphics::{LinePoint, PaintMode, Point, Polygon, PolygonRing, WindingOrder};
use printpdf::image::RawImage;
use printpdf::ops::Op;
use printpdf::text::TextItem;
use printpdf::xobject::{XObject, XObjectTransform};
use printpdf::{BuiltinFont, Mm, PdfDocument, PdfPage, PdfSaveOptions, Pt, Rgb, XObjectId};

/// Baseline position within a line box, as a fraction of the line height
const BASELINE_RATIO: f32 = 0.8;

/// Outline width of overlay frames and layout guides
const THIN_LINE_PT: f32 = 0.5;

const PAGE_NUMBER_SIZE_PT: f32 = 10.0;

/// Overflow beyond the content area tolerated before a side counts as overflowing
const OVERFLOW_TOLERANCE_PT: f32 = 1.0;

/// How much of one side's content area the laid-out blocks used
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideExtent {
    pub side: PageSide,
    /// Height of the blocks placed on the side
    pub used_pt: f32,
    /// Height between the top and bottom margins
    pub available_pt: f32,
}

impl SideExtent {
    /// Amount by which the content runs past the bottom margin
    pub fn overflow_pt(&self) -> f32 {
        (self.used_pt - self.available_pt).max(0.0)
    }

    pub fn overflows(&self) -> bool {
        self.overflow_pt() > OVERFLOW_TOLERANCE_PT
    }
}

/// PDF bytes plus the extent of every rendered side
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub sides: Vec<SideExtent>,
}

impl RenderedPdf {
    /// 1-based numbers of the sides whose content runs past the bottom margin
    pub fn overflowing_sides(&self) -> Vec<usize> {
        self.sides
            .iter()
            .enumerate()
            .filter(|(_, extent)| extent.overflows())
            .map(|(index, _)| index + 1)
            .collect()
    }
}

fn cm(value: f64) -> f32 {
    (value * PT_PER_CM) as f32
}

fn twips(value: i64) -> f32 {
    twips_to_pt(value) as f32
}

fn gray(percent: u8) -> Color {
    let v = f32::from(grayscale_channel(percent)) / 255.0;
    Color::Rgb(Rgb::new(v, v, v, None))
}

fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

fn builtin_font(run: &TextRun) -> BuiltinFont {
    match (run.font, run.bold) {
        (Font::Serif, false) => BuiltinFont::TimesRoman,
        (Font::Serif, true) => BuiltinFont::TimesBold,
        (Font::Sans, false) => BuiltinFont::Helvetica,
        (Font::Sans, true) => BuiltinFont::HelveticaBold,
    }
}

fn run_width(run: &TextRun) -> f32 {
    (run.text.chars().count() as f64 * run.effective_size() * AVERAGE_CHAR_WIDTH_RATIO) as f32
}

/// Left edge of content `width` wide aligned inside `[x, x + available]`
fn aligned_x(align: Align, x: f32, available: f32, width: f32) -> f32 {
    match align {
        Align::Left => x,
        Align::Center => x + (available - width) / 2.0,
        Align::Right => x + available - width,
    }
}

/// Ops of the page being drawn, with top-down coordinates
struct Canvas {
    ops: Vec<Op>,
    height: f32,
}

impl Canvas {
    fn new(height: f32) -> Self {
        Self {
            ops: Vec::new(),
            height,
        }
    }

    fn point(&self, x: f32, top: f32) -> LinePoint {
        LinePoint {
            p: Point {
                x: Pt(x),
                y: Pt(self.height - top),
            },
            bezier: false,
        }
    }

    fn rect_polygon(&self, x: f32, top: f32, width: f32, height: f32, mode: PaintMode) -> Polygon {
        Polygon {
            rings: vec![PolygonRing {
                points: vec![
                    self.point(x, top),
                    self.point(x + width, top),
                    self.point(x + width, top + height),
                    self.point(x, top + height),
                ],
            }],
            mode,
            winding_order: WindingOrder::EvenOdd,
        }
    }

    fn fill_rect(&mut self, x: f32, top: f32, width: f32, height: f32, color: Color) {
        let polygon = self.rect_polygon(x, top, width, height, PaintMode::Fill);
        self.ops.push(Op::SetFillColor { col: color });
        self.ops.push(Op::DrawPolygon { polygon });
    }

    fn stroke_rect(&mut self, x: f32, top: f32, width: f32, height: f32, color: Color, line: f32) {
        let polygon = self.rect_polygon(x, top, width, height, PaintMode::Stroke);
        self.ops.push(Op::SetOutlineThickness { pt: Pt(line) });
        self.ops.push(Op::SetOutlineColor { col: color });
        self.ops.push(Op::DrawPolygon { polygon });
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), color: Color, line: f32) {
        let polygon = Polygon {
            rings: vec![PolygonRing {
                points: vec![self.point(from.0, from.1), self.point(to.0, to.1)],
            }],
            mode: PaintMode::Stroke,
            winding_order: WindingOrder::EvenOdd,
        };
        self.ops.push(Op::SetOutlineThickness { pt: Pt(line) });
        self.ops.push(Op::SetOutlineColor { col: color });
        self.ops.push(Op::DrawPolygon { polygon });
    }

    fn text(&mut self, run: &TextRun, x: f32, baseline: f32) {
        if run.text.is_empty() {
            return;
        }
        let font = builtin_font(run);
        self.ops.push(Op::SetFillColor {
            col: gray(run.color.unwrap_or(100)),
        });
        self.ops.push(Op::StartTextSection);
        self.ops.push(Op::SetTextCursor {
            pos: Point {
                x: Pt(x),
                y: Pt(self.height - baseline),
            },
        });
        self.ops.push(Op::SetFontSizeBuiltinFont {
            font,
            size: Pt(run.effective_size() as f32),
        });
        self.ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(run.text.clone())],
            font,
        });
        self.ops.push(Op::EndTextSection);
    }

    /// One line of runs inside `[x, x + width]`, line box starting at `top`
    fn text_line(&mut self, runs: &[TextRun], align: Align, x: f32, width: f32, top: f32, line_height: f32) {
        let total: f32 = runs.iter().map(run_width).sum();
        let baseline = top + line_height * BASELINE_RATIO;
        let mut cursor = aligned_x(align, x, width, total);
        for run in runs {
            self.text(run, cursor, baseline);
            cursor += run_width(run);
        }
    }
}

fn row_height(row: &Row) -> f32 {
    match row.height {
        RowHeight::Exact(h) => twips(h),
        RowHeight::AtLeast(h) => {
            let content = row
                .cells
                .iter()
                .map(cell_content_height)
                .fold(0.0, f32::max);
            twips(h).max(content)
        }
    }
}

fn cell_content_height(cell: &Cell) -> f32 {
    cell.items
        .iter()
        .map(|item| match item {
            CellItem::Paragraph(p) => p.height_pt() as f32,
            CellItem::Table(t) => table_height(t),
        })
        .sum()
}

fn table_height(table: &Table) -> f32 {
    table.rows.iter().map(row_height).sum()
}

struct PdfRenderer<'a> {
    doc: &'a PlannerDocument,
    pdf: PdfDocument,
    images: Vec<(XObjectId, (u32, u32))>,
    pages: Vec<PdfPage>,
    canvas: Canvas,
    /// Distance from the top edge to the next block
    y: f32,
    side: PageSide,
    page_number: usize,
    numbered: bool,
    extents: Vec<SideExtent>,
}

impl<'a> PdfRenderer<'a> {
    fn new(doc: &'a PlannerDocument) -> Result<Self> {
        let mut pdf = PdfDocument::new(&doc.title);
        let mut images = Vec::with_capacity(doc.images.len());
        for image in &doc.images {
            let mut warnings = Vec::new();
            let raw = RawImage::decode_from_bytes(&image.png, &mut warnings)
                .map_err(RenderError::Pdf)?;
            let size = (raw.width as u32, raw.height as u32);
            let id = XObjectId::new();
            pdf.resources.xobjects.map.insert(id.clone(), XObject::Image(raw));
            images.push((id, size));
        }

        let geometry = &doc.geometry;
        Ok(Self {
            doc,
            pdf,
            images,
            pages: Vec::new(),
            canvas: Canvas::new(geometry.page_height_pt()),
            y: cm(geometry.margin_top),
            side: PageSide::Recto,
            page_number: 1,
            numbered: false,
            extents: Vec::new(),
        })
    }

    fn content_x(&self) -> f32 {
        cm(self.doc.geometry.content_left(self.side))
    }

    fn content_width(&self) -> f32 {
        cm(self.doc.geometry.content_width(true))
    }

    fn content_top(&self) -> f32 {
        cm(self.doc.geometry.margin_top)
    }

    fn content_height(&self) -> f32 {
        cm(self.doc.geometry.content_height())
    }

    /// Close the current page and open the next one
    fn next_page(&mut self) {
        self.finish_page();
        self.side = self.side.flipped();
        self.page_number += 1;
        self.y = self.content_top();
    }

    fn finish_page(&mut self) {
        let extent = SideExtent {
            side: self.side,
            used_pt: self.y - self.content_top(),
            available_pt: self.content_height(),
        };
        if extent.overflows() {
            log::warn!(
                "Content overflows the bottom margin on side {} by {:.1}pt",
                self.pages.len() + 1,
                extent.overflow_pt()
            );
        }
        self.extents.push(extent);

        self.decorate();
        let g = &self.doc.geometry;
        let ops = std::mem::take(&mut self.canvas.ops);
        self.pages.push(PdfPage::new(
            Mm((g.page_width * 10.0) as f32),
            Mm((g.page_height * 10.0) as f32),
            ops,
        ));
    }

    /// Page number and the side's decorations, drawn over the content
    fn decorate(&mut self) {
        let geometry = self.doc.geometry;
        if self.numbered {
            let run = TextRun::new(self.page_number.to_string()).size(f64::from(PAGE_NUMBER_SIZE_PT));
            let align = match self.side {
                PageSide::Recto => Align::Right,
                PageSide::Verso => Align::Left,
            };
            let line = PAGE_NUMBER_SIZE_PT;
            let top = cm(geometry.page_height - geometry.footer_distance) - line;
            self.canvas
                .text_line(&[run], align, self.content_x(), self.content_width(), top, line);
        }

        let doc = self.doc;
        let decorations = doc.decorations.for_side(self.side);
        if let Some(guides) = &decorations.guides {
            self.guides(guides);
        }
        if let Some(overlay) = &decorations.overlay {
            self.overlay(overlay);
        }
    }

    fn guides(&mut self, guides: &Guides) {
        let green = rgb(0.0, 1.0, 0.0);
        let (page_w, page_h) = (cm(guides.page_width), cm(guides.page_height));
        for y in [cm(guides.top_y), cm(guides.footer_y)] {
            self.canvas.line((0.0, y), (page_w, y), green.clone(), THIN_LINE_PT);
        }
        let x = cm(guides.gutter_x);
        self.canvas.line((x, 0.0), (x, page_h), rgb(0.0, 0.0, 1.0), THIN_LINE_PT);
        let c = guides.content;
        self.canvas.stroke_rect(
            cm(c.x),
            cm(c.y),
            cm(c.width),
            cm(c.height),
            rgb(1.0, 0.0, 0.0),
            THIN_LINE_PT,
        );
    }

    fn overlay(&mut self, overlay: &Overlay) {
        let (x, top) = (cm(overlay.x_cm), cm(overlay.y_cm));
        let (width, height) = (cm(overlay.width_cm), cm(overlay.height_cm));
        if overlay.framed {
            self.canvas.fill_rect(x, top, width, height, gray(0));
            self.canvas.stroke_rect(x, top, width, height, gray(100), THIN_LINE_PT);
        }

        let inset_x = cm(crate::overlay::OVERLAY_SIDE_INSET_CM);
        let mut line_top = top + cm(crate::overlay::OVERLAY_INSET_CM);
        for line in &overlay.lines {
            let line_height = line.line_height_pt as f32;
            self.canvas.text_line(
                &line.runs,
                line.align,
                x + inset_x,
                width - 2.0 * inset_x,
                line_top,
                line_height,
            );
            line_top += line_height;
        }
    }

    fn paragraph(&mut self, p: &Paragraph, x: f32, width: f32, top: f32) -> f32 {
        let line_height = p.line_height_pt() as f32;
        if let Some(shade) = p.shading {
            self.canvas.fill_rect(x, top, width, line_height, gray(shade));
        }
        self.canvas.text_line(&p.runs, p.align, x, width, top, line_height);
        p.height_pt() as f32
    }

    /// Draw `table` aligned inside `[x, x + available]`; returns its height
    fn table(&mut self, table: &Table, x: f32, available: f32, top: f32) -> f32 {
        let widths: Vec<f32> = table.column_widths.iter().map(|w| twips(*w)).collect();
        let table_x = aligned_x(table.align, x, available, widths.iter().sum());
        let margin = twips(table.cell_margin_or_default());

        let mut row_top = top;
        for row in &table.rows {
            let height = row_height(row);
            let mut cell_x = table_x;
            let mut column = 0;
            for cell in &row.cells {
                let span = cell.span.max(1);
                let width: f32 = widths.iter().skip(column).take(span).sum();
                column += span;

                if let Some(shade) = cell.shading {
                    self.canvas.fill_rect(cell_x, row_top, width, height, gray(shade));
                }
                self.cell_content(cell, cell_x + margin, width - 2.0 * margin, row_top, height);
                if let Some(borders) = table.borders {
                    self.canvas.stroke_rect(
                        cell_x,
                        row_top,
                        width,
                        height,
                        gray(borders.color),
                        borders.width_pt() as f32,
                    );
                }
                cell_x += width;
            }
            row_top += height;
        }
        row_top - top
    }

    fn cell_content(&mut self, cell: &Cell, x: f32, width: f32, top: f32, height: f32) {
        let content = cell_content_height(cell);
        let mut y = match cell.v_align {
            VAlign::Top => top,
            VAlign::Center => top + (height - content).max(0.0) / 2.0,
            VAlign::Bottom => top + (height - content).max(0.0),
        };
        for item in &cell.items {
            y += match item {
                CellItem::Paragraph(p) => self.paragraph(p, x, width, y),
                CellItem::Table(t) => self.table(t, x, width, y),
            };
        }
    }

    fn image(&mut self, block: &ImageBlock) -> Result<f32> {
        let (id, (px_w, px_h)) = self
            .images
            .get(block.image.0)
            .cloned()
            .ok_or_else(|| RenderError::Pdf(format!("Unknown image {}", block.image.0)))?;
        let (width, height) = (cm(block.width_cm), cm(block.height_cm));
        let x = self.content_x();

        self.canvas.ops.push(Op::UseXobject {
            id,
            transform: XObjectTransform {
                translate_x: Some(Pt(x)),
                translate_y: Some(Pt(self.canvas.height - (self.y + height))),
                scale_x: Some(width / px_w.max(1) as f32),
                scale_y: Some(height / px_h.max(1) as f32),
                rotate: None,
                dpi: Some(72.0),
            },
        });
        if let Some(overlay) = &block.overlay {
            self.overlay(overlay);
        }
        Ok(height)
    }

    fn block(&mut self, block: &Block) -> Result<()> {
        let (x, width, top) = (self.content_x(), self.content_width(), self.y);
        let height = match block {
            Block::Paragraph(p) => self.paragraph(p, x, width, top),
            Block::Table(t) => self.table(t, x, width, top),
            Block::Image(i) => self.image(i)?,
            Block::Gap { height_pt } => *height_pt as f32,
            Block::PageBreak { .. } => {
                self.next_page();
                return Ok(());
            }
        };
        self.y += height;
        Ok(())
    }

    fn render(mut self) -> Result<RenderedPdf> {
        let doc = self.doc;
        for (index, section) in doc.sections.iter().enumerate() {
            if index > 0 {
                self.next_page();
            }
            match section.numbering {
                PageNumbering::Continue => {}
                PageNumbering::Numbered { start } => {
                    self.numbered = true;
                    self.page_number = start;
                }
                PageNumbering::Suppressed => self.numbered = false,
            }
            for block in &section.blocks {
                self.block(block)?;
            }
        }
        self.finish_page();

        log::debug!("Rendered {} PDF pages", self.pages.len());
        self.pdf.pages = self.pages;
        let mut warnings = Vec::new();
        let bytes = self.pdf.save(&PdfSaveOptions::default(), &mut warnings);
        for warning in &warnings {
            log::debug!("printpdf: {:?}", warning);
        }
        Ok(RenderedPdf {
            bytes,
            sides: self.extents,
        })
    }
}

/// Render `doc` to PDF bytes
pub fn render_pdf(doc: &PlannerDocument) -> Result<Vec<u8>> {
    Ok(render_pdf_with_extents(doc)?.bytes)
}

/// Render `doc`, keeping how much of each side's content area was used
pub fn render_pdf_with_extents(doc: &PlannerDocument) -> Result<RenderedPdf> {
    PdfRenderer::new(doc)?.render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aligned_x() {
        assert_eq!(aligned_x(Align::Left, 10.0, 100.0, 20.0), 10.0);
        assert_eq!(aligned_x(Align::Center, 10.0, 100.0, 20.0), 50.0);
        assert_eq!(aligned_x(Align::Right, 10.0, 100.0, 20.0), 90.0);
    }

    #[test]
    fn test_at_least_row_grows_with_content() {
        let mut table = Table::new(vec![1000], None);
        let tall = Cell::paragraph(Paragraph::text(TextRun::new("x").size(20.0)));
        table.push_row(Row::new(RowHeight::AtLeast(100), vec![tall]));
        table.push_row(Row::new(RowHeight::Exact(100), vec![Cell::empty()]));

        // 20pt * 1.15 line, then a fixed 5pt row
        assert!((table_height(&table) - (23.0 + 5.0)).abs() < 1e-3);
    }

    #[test]
    fn test_side_extent_tolerance() {
        let mut extent = SideExtent {
            side: PageSide::Recto,
            used_pt: 700.5,
            available_pt: 700.0,
        };
        assert!(!extent.overflows());
        extent.used_pt = 702.0;
        assert!(extent.overflows());
        assert!((extent.overflow_pt() - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_font_selection() {
        let run = TextRun::new("x").bold().font(Font::Sans);
        assert!(matches!(builtin_font(&run), BuiltinFont::HelveticaBold));
        assert!(matches!(builtin_font(&TextRun::new("x")), BuiltinFont::TimesRoman));
    }
}
