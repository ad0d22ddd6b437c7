//! Document model
//!
//! Section drivers emit value types into a [`DocumentSink`]. The resulting
//! [`PlannerDocument`] is serialized by both the DOCX writer and the native
//! PDF renderer, so the two outputs share one page structure.

use planner_layout::{PageGeometry, PageSide, PageTracker};

/// Size of the Normal style
pub const DEFAULT_FONT_SIZE_PT: f64 = 11.0;

/// Word's default left/right cell margin (0.19 cm)
pub const DEFAULT_CELL_MARGIN_TWIPS: i64 = 108;

/// Single line spacing as a multiple of the font size
pub const SINGLE_LINE_FACTOR: f64 = 1.15;

// =============================================================================
// Text
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Font {
    /// Times New Roman, the document default
    #[default]
    Serif,
    /// Arial, used by overlays
    Sans,
}

impl Font {
    pub fn family(&self) -> &'static str {
        match self {
            Font::Serif => "Times New Roman",
            Font::Sans => "Arial",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

/// A run of uniformly styled text
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextRun {
    pub text: String,
    pub font: Font,
    /// `None` keeps the Normal style size
    pub size_pt: Option<f64>,
    pub bold: bool,
    /// Grayscale percentage; `None` is automatic (black)
    pub color: Option<u8>,
}

impl TextRun {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn size(mut self, pt: f64) -> Self {
        self.size_pt = Some(pt);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn color(mut self, grayscale: u8) -> Self {
        self.color = Some(grayscale);
        self
    }

    pub fn font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn effective_size(&self) -> f64 {
        self.size_pt.unwrap_or(DEFAULT_FONT_SIZE_PT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LineSpacing {
    #[default]
    Single,
    /// Exact line height in points
    Exact(f64),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub runs: Vec<TextRun>,
    pub align: Align,
    pub line_spacing: LineSpacing,
    pub space_after_pt: f64,
    /// Paragraph background as a grayscale percentage
    pub shading: Option<u8>,
}

impl Paragraph {
    /// An empty paragraph in the Normal style
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(run: TextRun) -> Self {
        Self {
            runs: vec![run],
            ..Default::default()
        }
    }

    pub fn aligned(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn exact_line(mut self, pt: f64) -> Self {
        self.line_spacing = LineSpacing::Exact(pt);
        self
    }

    pub fn space_after(mut self, pt: f64) -> Self {
        self.space_after_pt = pt;
        self
    }

    pub fn shaded(mut self, grayscale: u8) -> Self {
        self.shading = Some(grayscale);
        self
    }

    /// Largest font size used in the paragraph
    pub fn font_size(&self) -> f64 {
        self.runs
            .iter()
            .map(TextRun::effective_size)
            .fold(None, |max: Option<f64>, s| Some(max.map_or(s, |m| m.max(s))))
            .unwrap_or(DEFAULT_FONT_SIZE_PT)
    }

    pub fn line_height_pt(&self) -> f64 {
        match self.line_spacing {
            LineSpacing::Single => self.font_size() * SINGLE_LINE_FACTOR,
            LineSpacing::Exact(pt) => pt,
        }
    }

    /// Vertical space taken by the paragraph, spacing included
    pub fn height_pt(&self) -> f64 {
        self.line_height_pt() + self.space_after_pt
    }
}

// =============================================================================
// Tables
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowHeight {
    /// Fixed height in twips
    Exact(i64),
    /// Minimum height in twips; the row grows with its content
    AtLeast(i64),
}

impl RowHeight {
    pub fn twips(&self) -> i64 {
        match *self {
            RowHeight::Exact(t) | RowHeight::AtLeast(t) => t,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellItem {
    Paragraph(Paragraph),
    Table(Table),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub items: Vec<CellItem>,
    /// Number of grid columns spanned
    pub span: usize,
    pub shading: Option<u8>,
    pub v_align: VAlign,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            span: 1,
            shading: None,
            v_align: VAlign::Top,
        }
    }
}

impl Cell {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn paragraph(paragraph: Paragraph) -> Self {
        Self {
            items: vec![CellItem::Paragraph(paragraph)],
            ..Default::default()
        }
    }

    pub fn span(mut self, span: usize) -> Self {
        self.span = span.max(1);
        self
    }

    pub fn shaded(mut self, grayscale: Option<u8>) -> Self {
        self.shading = grayscale;
        self
    }

    pub fn v_align(mut self, v_align: VAlign) -> Self {
        self.v_align = v_align;
        self
    }

    pub fn push(mut self, item: CellItem) -> Self {
        self.items.push(item);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub height: RowHeight,
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(height: RowHeight, cells: Vec<Cell>) -> Self {
        Self { height, cells }
    }
}

/// Uniform single-line borders on every edge and inner line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableBorders {
    /// Line width in eighths of a point
    pub size_eighths: u32,
    /// Grayscale percentage
    pub color: u8,
}

impl TableBorders {
    pub fn width_pt(&self) -> f64 {
        f64::from(self.size_eighths) / 8.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Grid column widths in twips
    pub column_widths: Vec<i64>,
    pub rows: Vec<Row>,
    /// `None` draws no borders at all
    pub borders: Option<TableBorders>,
    pub align: Align,
    /// Left/right cell margin in twips; `None` keeps the default
    pub cell_margin_twips: Option<i64>,
}

impl Table {
    pub fn new(column_widths: Vec<i64>, borders: Option<TableBorders>) -> Self {
        Self {
            column_widths,
            rows: Vec::new(),
            borders,
            align: Align::Left,
            cell_margin_twips: None,
        }
    }

    pub fn aligned(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn cell_margin(mut self, twips: i64) -> Self {
        self.cell_margin_twips = Some(twips);
        self
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn width_twips(&self) -> i64 {
        self.column_widths.iter().sum()
    }

    /// Height of all rows at their specified heights
    pub fn height_twips(&self) -> i64 {
        self.rows.iter().map(|r| r.height.twips()).sum()
    }

    pub fn cell_margin_or_default(&self) -> i64 {
        self.cell_margin_twips.unwrap_or(DEFAULT_CELL_MARGIN_TWIPS)
    }
}

// =============================================================================
// Images, Overlays and Decorations
// =============================================================================

/// Index into [`PlannerDocument::images`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(pub usize);

/// Encoded PNG kept once per document
#[derive(Debug, Clone, PartialEq)]
pub struct StoredImage {
    pub png: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
}

/// Floating box positioned from the page's top-left corner, in cm
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub name: String,
    pub x_cm: f64,
    pub y_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
    pub lines: Vec<OverlayLine>,
    /// White fill with a black border; otherwise transparent
    pub framed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLine {
    pub runs: Vec<TextRun>,
    pub line_height_pt: f64,
    pub align: Align,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlock {
    pub image: ImageId,
    pub width_cm: f64,
    pub height_cm: f64,
    /// Floating box anchored to the image's paragraph
    pub overlay: Option<Overlay>,
}

/// Rectangle in cm from the page's top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectCm {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Layout guides drawn in front of every page when debugging
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Guides {
    /// Content area (red)
    pub content: RectCm,
    /// Gutter boundary (blue), full page height
    pub gutter_x: f64,
    /// Top margin (green)
    pub top_y: f64,
    /// Footer boundary (green)
    pub footer_y: f64,
    pub page_width: f64,
    pub page_height: f64,
}

/// Everything drawn on top of one side's pages
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SideDecorations {
    pub overlay: Option<Overlay>,
    pub guides: Option<Guides>,
}

impl SideDecorations {
    pub fn is_empty(&self) -> bool {
        self.overlay.is_none() && self.guides.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Decorations {
    pub recto: SideDecorations,
    pub verso: SideDecorations,
}

impl Decorations {
    pub fn for_side(&self, side: PageSide) -> &SideDecorations {
        match side {
            PageSide::Recto => &self.recto,
            PageSide::Verso => &self.verso,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.recto.is_empty() && self.verso.is_empty()
    }
}

// =============================================================================
// Document
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
    Image(ImageBlock),
    /// Empty paragraph with an exact line height in points
    Gap { height_pt: f64 },
    /// Page break; a minimized one is a 1pt exact paragraph
    PageBreak { minimized: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageNumbering {
    /// Inherit the previous section's footers and numbering
    #[default]
    Continue,
    /// Page numbers in the footer, restarting at `start`
    Numbered { start: usize },
    /// Empty footers
    Suppressed,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentSection {
    pub numbering: PageNumbering,
    pub blocks: Vec<Block>,
}

/// Receiver of section driver output
pub trait DocumentSink {
    fn paragraph(&mut self, paragraph: Paragraph);
    fn table(&mut self, table: Table);
    fn image(&mut self, image: ImageBlock);
    /// Exact-height spacer
    fn gap(&mut self, height_pt: f64);
    fn page_break(&mut self, minimized: bool);
    /// Start a new section on a new page
    fn section_break(&mut self, numbering: PageNumbering);
    /// Side of the page currently being written
    fn side(&self) -> PageSide;
    /// Page sides opened so far
    fn pages(&self) -> usize;
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannerDocument {
    pub title: String,
    pub year: i32,
    pub geometry: PageGeometry,
    pub sections: Vec<DocumentSection>,
    pub images: Vec<StoredImage>,
    pub decorations: Decorations,
    tracker: PageTracker,
}

impl PlannerDocument {
    pub fn new(
        title: impl Into<String>,
        year: i32,
        geometry: PageGeometry,
        decorations: Decorations,
    ) -> Self {
        Self {
            title: title.into(),
            year,
            geometry,
            sections: vec![DocumentSection::default()],
            images: Vec::new(),
            decorations,
            tracker: PageTracker::new(),
        }
    }

    pub fn add_image(&mut self, image: StoredImage) -> ImageId {
        self.images.push(image);
        ImageId(self.images.len() - 1)
    }

    pub fn image(&self, id: ImageId) -> Option<&StoredImage> {
        self.images.get(id.0)
    }

    /// Physical page sides in the document
    pub fn page_count(&self) -> usize {
        self.tracker.pages()
    }

    fn push(&mut self, block: Block) {
        if let Some(section) = self.sections.last_mut() {
            section.blocks.push(block);
        }
    }
}

impl DocumentSink for PlannerDocument {
    fn paragraph(&mut self, paragraph: Paragraph) {
        self.push(Block::Paragraph(paragraph));
    }

    fn table(&mut self, table: Table) {
        self.push(Block::Table(table));
    }

    fn image(&mut self, image: ImageBlock) {
        self.push(Block::Image(image));
    }

    fn gap(&mut self, height_pt: f64) {
        self.push(Block::Gap { height_pt });
    }

    fn page_break(&mut self, minimized: bool) {
        self.push(Block::PageBreak { minimized });
        self.tracker.advance();
    }

    fn section_break(&mut self, numbering: PageNumbering) {
        self.sections.push(DocumentSection {
            numbering,
            blocks: Vec::new(),
        });
        self.tracker.advance();
    }

    fn side(&self) -> PageSide {
        self.tracker.side()
    }

    fn pages(&self) -> usize {
        self.tracker.pages()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_layout::PageConfig;

    fn document() -> PlannerDocument {
        let geometry = PageGeometry::from_config(&PageConfig::default());
        PlannerDocument::new("Test", 2026, geometry, Decorations::default())
    }

    #[test]
    fn test_breaks_advance_pages() {
        let mut doc = document();
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.side(), PageSide::Recto);

        doc.paragraph(Paragraph::new());
        doc.page_break(true);
        assert_eq!(doc.side(), PageSide::Verso);

        doc.section_break(PageNumbering::Numbered { start: 1 });
        assert_eq!(doc.page_count(), 3);
        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.sections[0].blocks.len(), 2);
    }

    #[test]
    fn test_paragraph_height() {
        let p = Paragraph::text(TextRun::new("x").size(20.0)).space_after(3.0);
        assert!((p.height_pt() - (23.0 + 3.0)).abs() < 1e-9);

        let gap = Paragraph::new().exact_line(14.175);
        assert!((gap.height_pt() - 14.175).abs() < 1e-9);
    }
}
