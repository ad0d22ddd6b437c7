use super::RenderContext;
use crate::model::*;
use planner_layout::constants::MINIMIZED_PARAGRAPH_TWIPS;
use planner_layout::toc::{toc_column_widths, TOC_FONT_SIZE_PT};
use planner_layout::{validate_row_height, RowHeightSpec, Shading, TocEntry};

const TITLE: &str = "Table of Contents";

/// TOC pages, every page sized for a full page of rows
pub fn generate(doc: &mut impl DocumentSink, ctx: &RenderContext) {
    let entries = &ctx.plan.toc_entries;
    let rows_per_page = ctx.config.toc.rows_per_page.max(1);
    let widths = toc_column_widths(entries, ctx.content_width_twips());

    let spec = RowHeightSpec::new(ctx.content_height_twips(), rows_per_page)
        .preceded_by(MINIMIZED_PARAGRAPH_TWIPS)
        .with_title(ctx.config.table.title_row_twips());
    let row_height = validate_row_height("Table of Contents", &spec).row_height_twips;

    for (i, page) in entries.chunks(rows_per_page).enumerate() {
        if i > 0 {
            doc.page_break(true);
        }
        doc.table(toc_page(ctx, page, widths, row_height));
    }
    if ctx.plan.toc.needs_blank_verso() {
        doc.page_break(true);
    }
}

fn toc_page(
    ctx: &RenderContext,
    entries: &[TocEntry],
    (label_width, entry_width, page_width): (i64, i64, i64),
    row_height: i64,
) -> Table {
    let toc = &ctx.config.toc;
    let mut table = ctx
        .style
        .table(vec![label_width, entry_width, page_width])
        .aligned(Align::Center);
    table.push_row(ctx.style.title_row(TITLE, 3, Align::Left));

    for entry in entries {
        let shading = match entry.shading {
            Shading::None => None,
            Shading::SectionHeader => Some(toc.section_grayscale),
            Shading::FirstItem => Some(toc.first_item_grayscale),
        };
        let text_cell = |text: String, align: Align| {
            Cell::paragraph(
                Paragraph::text(TextRun::new(text).size(TOC_FONT_SIZE_PT)).aligned(align),
            )
            .shaded(shading)
            .v_align(VAlign::Center)
        };
        table.push_row(Row::new(
            RowHeight::Exact(row_height),
            vec![
                text_cell(entry.label.clone(), Align::Left),
                Cell::empty().shaded(shading).v_align(VAlign::Center),
                text_cell(entry.page_number.to_string(), Align::Right),
            ],
        ));
    }
    table
}
