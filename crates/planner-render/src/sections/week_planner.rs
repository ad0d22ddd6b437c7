use super::RenderContext;
use crate::model::*;
use planner_layout::calendar::PlannerWeek;
use planner_layout::constants::{cm_to_twips, MINIMIZED_PARAGRAPH_TWIPS};
use planner_layout::{validate_row_height, RowHeightSpec};

const WEEK_COLUMN_CM: f64 = 1.4;
const MONTH_COLUMN_CM: f64 = 4.0;

/// Week | Month | Notes | Notes, the odd twip going to the first notes column
pub fn column_widths(total: i64) -> Vec<i64> {
    let week = cm_to_twips(WEEK_COLUMN_CM);
    let month = cm_to_twips(MONTH_COLUMN_CM);
    let notes = total - week - month;
    let second = notes / 2;
    vec![week, month, notes - second, second]
}

/// One row per ISO week, `week_planner.rows_per_page` weeks per page
pub fn generate(doc: &mut impl DocumentSink, ctx: &RenderContext) {
    let numbered = &ctx.plan.numbered;

    let spec = RowHeightSpec::new(ctx.content_height_twips(), numbered.week_rows_per_page)
        .preceded_by(MINIMIZED_PARAGRAPH_TWIPS)
        .with_title(ctx.config.table.title_row_twips())
        .with_header(ctx.config.table.header_row_twips());
    let row_height = validate_row_height("Week Planner", &spec).row_height_twips;

    for page in 0..numbered.week_planner.content_sides {
        if page > 0 {
            doc.page_break(true);
        }
        doc.table(week_page(ctx, numbered.weeks_on_page(page), row_height));
    }
    super::pad(doc, &numbered.week_planner);
}

fn week_page(ctx: &RenderContext, weeks: &[PlannerWeek], row_height: i64) -> Table {
    let style = &ctx.style;
    let mut table = style
        .table(column_widths(ctx.content_width_twips()))
        .aligned(Align::Center);

    table.push_row(Row::new(
        style.title_height(),
        vec![
            style.title_cell("Week Planner", Align::Left).span(3),
            style.title_cell(ctx.plan.year().to_string(), Align::Right),
        ],
    ));
    table.push_row(Row::new(
        style.header_height(),
        vec![
            style.header_cell("Week", Align::Left),
            style.header_cell("Month", Align::Left),
            style.header_cell("Notes", Align::Left).span(2),
        ],
    ));

    let shading = Some(ctx.config.week_planner.first_week_grayscale);
    for week in weeks {
        let shade = |cell: Cell| {
            if week.is_first_week_of_month() {
                cell.shaded(shading)
            } else {
                cell
            }
        };
        table.push_row(Row::new(
            RowHeight::Exact(row_height),
            vec![
                shade(style.data_cell(week.number.to_string(), Align::Left)),
                shade(style.data_cell(week.month_label(), Align::Left)),
                shade(style.blank_cell()),
                shade(style.blank_cell()),
            ],
        ));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notes_columns_split() {
        let widths = column_widths(10205);
        assert_eq!(widths[0], 793);
        assert_eq!(widths[1], 2267);
        assert_eq!(widths[2] + widths[3], 10205 - 793 - 2267);
        assert_eq!(widths[2] - widths[3], 1);
    }
}
