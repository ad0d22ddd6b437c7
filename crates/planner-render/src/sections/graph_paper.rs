use super::RenderContext;
use crate::model::*;
use planner_layout::constants::{twips_to_cm, MINIMIZED_PARAGRAPH_TWIPS, SAFETY_MARGIN_TWIPS};

/// Height of a grid sheet: the page minus the break marker it follows
pub fn sheet_height_cm(ctx: &RenderContext) -> f64 {
    twips_to_cm(ctx.content_height_twips() - MINIMIZED_PARAGRAPH_TWIPS - SAFETY_MARGIN_TWIPS)
}

/// Grid sheets, each followed by a blank verso
pub fn generate(doc: &mut impl DocumentSink, ctx: &RenderContext) {
    let sheets = ctx.config.graph_paper.page_count;
    let width_cm = ctx.geometry.content_width(true);
    let height_cm = sheet_height_cm(ctx);

    for i in 0..sheets {
        if i > 0 {
            doc.page_break(true);
        }
        doc.image(ImageBlock {
            image: ctx.grid_image,
            width_cm,
            height_cm,
            overlay: None,
        });
        doc.page_break(true);
    }
}
