use super::RenderContext;
use crate::model::*;
use planner_layout::constants::MINIMIZED_PARAGRAPH_TWIPS;
use planner_layout::{validate_row_height, RowHeightSpec};

const TITLE: &str = "Backlog";

/// `backlog.page_count` one-column pages of blank rows
pub fn generate(doc: &mut impl DocumentSink, ctx: &RenderContext) {
    let backlog = &ctx.config.backlog;
    let rows = backlog.row_count.max(1);

    let spec = RowHeightSpec::new(ctx.content_height_twips(), rows)
        .preceded_by(MINIMIZED_PARAGRAPH_TWIPS)
        .with_title(ctx.config.table.title_row_twips());
    let row_height = validate_row_height(TITLE, &spec).row_height_twips;

    for page in 0..ctx.plan.numbered.backlog.content_sides {
        if page > 0 {
            doc.page_break(true);
        }
        let mut table = ctx
            .style
            .table(vec![ctx.content_width_twips()])
            .aligned(Align::Center);
        table.push_row(ctx.style.title_row(TITLE, 1, Align::Left));
        for row in ctx.style.blank_rows(rows, 1, row_height) {
            table.push_row(row);
        }
        doc.table(table);
    }
    super::pad(doc, &ctx.plan.numbered.backlog);
}
