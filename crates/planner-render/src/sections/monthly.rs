use super::RenderContext;
use crate::model::*;
use crate::style::percent_split;
use chrono::NaiveDate;
use planner_layout::calendar;
use planner_layout::constants::{
    cm_to_twips, MINIMIZED_PARAGRAPH_TWIPS, SAFETY_MARGIN_TWIPS, DAYS_PER_SIDE,
};
use planner_layout::rows::stacked_table_height;
use planner_layout::{validate_row_height, MonthPlan, RowHeightSpec};

const COVER_LINES: usize = 12;
const COVER_TITLE_SIZE_PT: f64 = 36.0;

/// Points per centimeter used for the gap between day tables
const GAP_PT_PER_CM: f64 = 28.35;

/// One month: cover, blank verso, then the daily spread ending on a verso
pub fn generate(doc: &mut impl DocumentSink, ctx: &RenderContext, month: &MonthPlan, row_height: i64) {
    month_cover(doc, month.month);
    doc.page_break(false);
    doc.page_break(false);
    daily_spread(doc, ctx, month, row_height);
}

/// Content row height of a day table, two tables sharing a side
pub fn day_row_height(ctx: &RenderContext) -> i64 {
    let spread = &ctx.config.daily_spread;
    let per_table = stacked_table_height(
        ctx.content_height_twips(),
        MINIMIZED_PARAGRAPH_TWIPS,
        SAFETY_MARGIN_TWIPS,
        cm_to_twips(spread.table_gap),
        DAYS_PER_SIDE,
    );
    let spec = RowHeightSpec::new(per_table, spread.rows.max(1))
        .with_safety(0)
        .with_title(ctx.config.table.title_row_twips())
        .with_header(ctx.config.table.header_row_twips());
    validate_row_height("Daily Spread", &spec).row_height_twips
}

fn month_cover(doc: &mut impl DocumentSink, month: u32) {
    for _ in 0..COVER_LINES {
        doc.paragraph(Paragraph::new().aligned(Align::Center));
    }
    doc.paragraph(
        Paragraph::text(
            TextRun::new(calendar::month_name(month))
                .size(COVER_TITLE_SIZE_PT)
                .bold(),
        )
        .aligned(Align::Center),
    );
}

fn daily_spread(doc: &mut impl DocumentSink, ctx: &RenderContext, month: &MonthPlan, row_height: i64) {
    let gap_pt = ctx.config.daily_spread.table_gap * GAP_PT_PER_CM;

    for (side, days) in month.dates.chunks(DAYS_PER_SIDE).enumerate() {
        if side > 0 {
            doc.page_break(true);
        }
        for (i, day) in days.iter().enumerate() {
            if i > 0 {
                doc.gap(gap_pt);
            }
            doc.table(day_table(ctx, *day, row_height));
        }
    }
    super::pad(doc, &month.section);
}

fn day_table(ctx: &RenderContext, day: NaiveDate, row_height: i64) -> Table {
    let style = &ctx.style;
    let spread = &ctx.config.daily_spread;
    let (subject, description) = percent_split(ctx.content_width_twips(), spread.subject_width_percent);

    let mut table = style.table(vec![subject, description]).aligned(Align::Center);
    table.push_row(Row::new(
        style.title_height(),
        vec![
            style.title_cell(calendar::day_name(day), Align::Left),
            style.title_cell(calendar::day_heading(day), Align::Right),
        ],
    ));
    table.push_row(style.header_row(&["Subject", "Description"]));
    for row in style.blank_rows(spread.rows.max(1), 2, row_height) {
        table.push_row(row);
    }
    table
}
