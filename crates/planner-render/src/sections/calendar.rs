use super::RenderContext;
use crate::model::*;
use crate::style::equal_columns;
use crate::types::Result;
use planner_layout::calendar::{self, MINI_CALENDAR_HEADINGS};
use planner_layout::constants::{pt_to_twips, TABLE_BORDER_OVERHEAD_TWIPS};
use planner_layout::{validate_row_height, RowHeightSpec};

const MONTH_NAME_SIZE_PT: f64 = 10.0;
const MINI_CALENDAR_SIZE_PT: f64 = 7.0;
const MONTH_ROWS: usize = 6;

/// Two year calendars, each followed by a blank verso
pub fn generate(doc: &mut impl DocumentSink, ctx: &RenderContext) -> Result<()> {
    let year = ctx.plan.year();

    doc.table(year_calendar(ctx, year)?);
    doc.page_break(true);
    doc.page_break(true);
    doc.table(year_calendar(ctx, year + 1)?);
    doc.page_break(true);
    Ok(())
}

/// Month row height filling the page below the title row
pub fn month_row_height(ctx: &RenderContext) -> i64 {
    let spec = RowHeightSpec::new(ctx.content_height_twips(), MONTH_ROWS)
        .with_title(ctx.config.table.title_row_twips())
        .with_border_allowance(TABLE_BORDER_OVERHEAD_TWIPS);
    validate_row_height("Calendar", &spec).row_height_twips
}

/// 2x7 grid: the year, then two months per row
fn year_calendar(ctx: &RenderContext, year: i32) -> Result<Table> {
    let total = ctx.content_width_twips();
    let cell_width = total / 2;

    let mut table = ctx
        .style
        .table(vec![cell_width, cell_width])
        .aligned(Align::Center)
        .cell_margin(0);
    table.push_row(ctx.style.title_row(year.to_string(), 2, Align::Center));

    let height = RowHeight::Exact(month_row_height(ctx));
    for pair in (1..=12u32).collect::<Vec<_>>().chunks(2) {
        let cells = pair
            .iter()
            .map(|&month| month_cell(ctx, year, month, cell_width))
            .collect::<Result<Vec<_>>>()?;
        table.push_row(Row::new(height, cells));
    }
    Ok(table)
}

fn month_cell(ctx: &RenderContext, year: i32, month: u32, width: i64) -> Result<Cell> {
    let settings = &ctx.config.calendar;

    let name = Paragraph::text(
        TextRun::new(calendar::month_name(month))
            .size(MONTH_NAME_SIZE_PT)
            .bold(),
    )
    .aligned(Align::Center)
    .space_after(settings.month_name_gap)
    .shaded(ctx.style.header_background());

    let day_height = RowHeight::AtLeast(pt_to_twips(settings.day_row_height));
    let day = |text: String, bold: bool| {
        let run = TextRun::new(text).size(MINI_CALENDAR_SIZE_PT);
        let run = if bold { run.bold() } else { run };
        Cell::paragraph(Paragraph::text(run).aligned(Align::Center))
    };

    let mut mini = Table::new(equal_columns(width, 7), None).aligned(Align::Center);
    mini.push_row(Row::new(
        day_height,
        MINI_CALENDAR_HEADINGS
            .iter()
            .map(|h| day(h.to_string(), true))
            .collect(),
    ));
    for week in calendar::sunday_first_weeks(year, month)? {
        mini.push_row(Row::new(
            day_height,
            week.iter()
                .map(|d| match d {
                    Some(d) => day(d.to_string(), false),
                    None => Cell::paragraph(Paragraph::new().aligned(Align::Center)),
                })
                .collect(),
        ));
    }

    Ok(Cell::paragraph(name).push(CellItem::Table(mini)))
}
