use super::RenderContext;
use crate::model::*;
use planner_layout::constants::cm_to_twips;

const TITLE_SIZE_PT: f64 = 36.0;
const SUBTITLE_SIZE_PT: f64 = 14.0;
const CONTACT_HEADING_SIZE_PT: f64 = 18.0;

/// Front cover, then the inside cover with the contact table
pub fn generate(doc: &mut impl DocumentSink, ctx: &RenderContext) {
    front_cover(doc, ctx);
    doc.page_break(false);
    inside_cover(doc, ctx);
}

fn centered_blank_lines(doc: &mut impl DocumentSink, count: usize) {
    for _ in 0..count {
        doc.paragraph(Paragraph::new().aligned(Align::Center));
    }
}

fn front_cover(doc: &mut impl DocumentSink, ctx: &RenderContext) {
    let document = &ctx.config.document;

    centered_blank_lines(doc, 10);
    doc.paragraph(
        Paragraph::text(TextRun::new(document.title.clone()).size(TITLE_SIZE_PT).bold())
            .aligned(Align::Center),
    );
    doc.paragraph(
        Paragraph::text(TextRun::new(format!("Version {}", document.version)).size(SUBTITLE_SIZE_PT))
            .aligned(Align::Center),
    );
    centered_blank_lines(doc, 2);
    doc.paragraph(
        Paragraph::text(TextRun::new(document.year.to_string()).size(TITLE_SIZE_PT).bold())
            .aligned(Align::Center),
    );
}

fn inside_cover(doc: &mut impl DocumentSink, ctx: &RenderContext) {
    let cover = &ctx.config.cover;
    let contact = &cover.contact_table;

    doc.paragraph(
        Paragraph::text(
            TextRun::new("If found, please contact:")
                .size(CONTACT_HEADING_SIZE_PT)
                .bold(),
        )
        .aligned(Align::Center),
    );
    doc.paragraph(Paragraph::new());

    let mut table = ctx
        .style
        .table(vec![cm_to_twips(contact.label_width), cm_to_twips(contact.value_width)])
        .aligned(Align::Center);
    let height = RowHeight::AtLeast(cm_to_twips(contact.row_height));
    for field in &cover.contact_fields {
        let label = Cell::paragraph(
            Paragraph::text(TextRun::new(field.clone()).bold()).aligned(Align::Right),
        )
        .shaded(Some(contact.label_grayscale))
        .v_align(VAlign::Center);
        table.push_row(Row::new(height, vec![label, ctx.style.blank_cell()]));
    }
    doc.table(table);
}
