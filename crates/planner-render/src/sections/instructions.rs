use super::RenderContext;
use crate::model::*;
use crate::overlay;

const TITLE: &str = "Instructions";

/// Full-page instructions image with its title, then a blank verso
pub fn generate(doc: &mut impl DocumentSink, ctx: &RenderContext) {
    let geometry = &ctx.geometry;
    match ctx.instructions_image {
        Some(image) => doc.image(ImageBlock {
            image,
            width_cm: geometry.content_width(true),
            height_cm: geometry.content_height(),
            overlay: Some(overlay::title_overlay(geometry, doc.side(), TITLE)),
        }),
        None => doc.paragraph(
            Paragraph::text(TextRun::new(TITLE).size(18.0).bold()).aligned(Align::Center),
        ),
    }
    doc.page_break(true);
}
