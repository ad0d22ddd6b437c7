use super::RenderContext;
use crate::model::*;
use crate::style::equal_columns;
use planner_layout::{validate_row_height, RowHeightSpec};

/// Goals page right after the numbered section break, then a blank verso
pub fn generate(doc: &mut impl DocumentSink, ctx: &RenderContext) {
    let goals = &ctx.config.goals;
    let columns = goals.columns.max(1);
    let style = &ctx.style;

    let spec = RowHeightSpec::new(ctx.content_height_twips(), goals.rows.max(1))
        .with_title(ctx.config.table.title_row_twips())
        .with_header(ctx.config.table.header_row_twips());
    let row_height = validate_row_height("Goals", &spec).row_height_twips;

    let mut table = style
        .table(equal_columns(ctx.content_width_twips(), columns))
        .aligned(Align::Center);

    let year = ctx.plan.year().to_string();
    let title = if columns == 1 {
        style.title_row(format!("Goals {}", year), 1, Align::Left)
    } else {
        Row::new(
            style.title_height(),
            vec![
                style.title_cell("Goals", Align::Left).span(columns - 1),
                style.title_cell(year, Align::Right),
            ],
        )
    };
    table.push_row(title);

    let headers: Vec<&str> = (0..columns)
        .map(|i| goals.headers.get(i).map(String::as_str).unwrap_or(""))
        .collect();
    table.push_row(style.header_row(&headers));
    for row in style.blank_rows(goals.rows.max(1), columns, row_height) {
        table.push_row(row);
    }

    doc.table(table);
    doc.page_break(true);
}
