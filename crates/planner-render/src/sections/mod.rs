//! Section drivers and document assembly
//!
//! Each driver writes one section into a [`DocumentSink`]. The breaks
//! between sections are owned by [`build_document`], which also checks
//! every section's starting side against the [`DocumentPlan`].

mod backlog;
mod calendar;
mod cover;
mod goals;
mod graph_paper;
mod instructions;
mod monthly;
mod rear_cover;
mod terms;
mod toc;
mod week_planner;

pub use calendar::month_row_height;
pub use graph_paper::sheet_height_cm;
pub use monthly::day_row_height;
pub use week_planner::column_widths as week_planner_columns;

use crate::assets::Assets;
use crate::model::*;
use crate::overlay;
use crate::style::TableStyle;
use crate::types::*;
use planner_layout::{DocumentPlan, PageGeometry, PlannerConfig, SectionPlan};

/// Everything a driver reads while emitting its section
pub struct RenderContext<'a> {
    pub config: &'a PlannerConfig,
    pub plan: &'a DocumentPlan,
    pub geometry: PageGeometry,
    pub style: TableStyle,
    pub instructions_image: Option<ImageId>,
    pub grid_image: ImageId,
}

impl<'a> RenderContext<'a> {
    pub fn content_width_twips(&self) -> i64 {
        self.geometry.content_width_twips()
    }

    pub fn content_height_twips(&self) -> i64 {
        self.geometry.content_height_twips()
    }
}

/// Blank verso closing a section with an odd number of content sides
fn pad(doc: &mut impl DocumentSink, section: &SectionPlan) {
    if section.needs_blank_verso() {
        doc.page_break(true);
    }
}

/// Tracks where each section should start
struct SectionCursor {
    next_page: usize,
}

impl SectionCursor {
    fn new() -> Self {
        Self { next_page: 1 }
    }

    /// Verify the document has just opened the first page of `section`
    fn enter(&mut self, doc: &impl DocumentSink, section: &SectionPlan) -> Result<()> {
        let actual = doc.pages();
        if actual != self.next_page {
            log::error!(
                "{} starts on side {} but the plan expects {}",
                section.kind.name(),
                actual,
                self.next_page
            );
            return Err(RenderError::PageCount {
                expected: self.next_page,
                actual,
            });
        }
        self.next_page += section.total_sides();
        Ok(())
    }
}

/// Assemble the whole planner, reporting each stage through `progress`
pub fn build_document(
    config: &PlannerConfig,
    plan: &DocumentPlan,
    assets: Assets,
    mut progress: impl FnMut(&str),
) -> Result<PlannerDocument> {
    let geometry = PageGeometry::from_config(&config.page);
    let mut doc = PlannerDocument::new(
        config.document.title.clone(),
        plan.year(),
        geometry,
        overlay::decorations(config, &geometry),
    );
    let instructions_image = assets.instructions.map(|image| doc.add_image(image));
    let grid_image = doc.add_image(assets.grid);

    let ctx = RenderContext {
        config,
        plan,
        geometry,
        style: TableStyle::new(&config.table),
        instructions_image,
        grid_image,
    };
    let numbered = &plan.numbered;
    let mut cursor = SectionCursor::new();

    progress("cover page");
    cursor.enter(&doc, &plan.cover)?;
    cover::generate(&mut doc, &ctx);

    progress("instructions page");
    doc.section_break(PageNumbering::Continue);
    cursor.enter(&doc, &plan.instructions)?;
    instructions::generate(&mut doc, &ctx);

    progress("calendar pages");
    doc.page_break(true);
    cursor.enter(&doc, &plan.calendar)?;
    calendar::generate(&mut doc, &ctx)?;

    progress("table of contents");
    doc.page_break(false);
    cursor.enter(&doc, &plan.toc)?;
    toc::generate(&mut doc, &ctx);

    progress("goals page");
    doc.section_break(PageNumbering::Numbered { start: 1 });
    cursor.enter(&doc, &numbered.goals)?;
    goals::generate(&mut doc, &ctx);

    progress("backlog");
    doc.page_break(true);
    cursor.enter(&doc, &numbered.backlog)?;
    backlog::generate(&mut doc, &ctx);

    progress("week planner");
    doc.page_break(true);
    cursor.enter(&doc, &numbered.week_planner)?;
    week_planner::generate(&mut doc, &ctx);

    progress("monthly sections");
    let row_height = monthly::day_row_height(&ctx);
    for (i, month) in numbered.months.iter().enumerate() {
        // Months after the first follow a full daily spread page
        doc.page_break(i > 0);
        cursor.enter(&doc, &month.section)?;
        monthly::generate(&mut doc, &ctx, month, row_height);
    }

    progress("terms and definitions");
    doc.page_break(true);
    cursor.enter(&doc, &numbered.terms)?;
    terms::generate(&mut doc, &ctx);

    progress("graph paper");
    doc.page_break(true);
    cursor.enter(&doc, &numbered.graph_paper)?;
    graph_paper::generate(&mut doc, &ctx);

    progress("rear cover");
    doc.section_break(PageNumbering::Suppressed);
    cursor.enter(&doc, &plan.rear_cover)?;
    rear_cover::generate(&mut doc);

    let expected = plan.total_sides();
    let actual = doc.page_count();
    if actual != expected {
        return Err(RenderError::PageCount { expected, actual });
    }
    log::info!("Assembled {} sides in {} sections", actual, doc.sections.len());

    Ok(doc)
}
