use super::RenderContext;
use crate::model::*;
use crate::style::percent_split;
use planner_layout::constants::MINIMIZED_PARAGRAPH_TWIPS;
use planner_layout::{validate_row_height, RowHeightSpec};

const TITLE: &str = "Terms and Definitions";

/// Two-column glossary pages for the owner to fill in
pub fn generate(doc: &mut impl DocumentSink, ctx: &RenderContext) {
    let terms = &ctx.config.terms_definitions;
    let rows = terms.row_count.max(1);
    let (term_width, definition_width) =
        percent_split(ctx.content_width_twips(), terms.term_width_percent);

    let spec = RowHeightSpec::new(ctx.content_height_twips(), rows)
        .preceded_by(MINIMIZED_PARAGRAPH_TWIPS)
        .with_title(ctx.config.table.title_row_twips())
        .with_header(ctx.config.table.header_row_twips());
    let row_height = validate_row_height(TITLE, &spec).row_height_twips;

    for page in 0..ctx.plan.numbered.terms.content_sides {
        if page > 0 {
            doc.page_break(true);
        }
        let mut table = ctx
            .style
            .table(vec![term_width, definition_width])
            .aligned(Align::Center);
        table.push_row(ctx.style.title_row(TITLE, 2, Align::Left));
        table.push_row(ctx.style.header_row(&["Term / Abbreviation", "Definition"]));
        for row in ctx.style.blank_rows(rows, 2, row_height) {
            table.push_row(row);
        }
        doc.table(table);
    }
    super::pad(doc, &ctx.plan.numbered.terms);
}
