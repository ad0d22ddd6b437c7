use crate::model::*;

/// Inside and outside of the back cover, both blank
pub fn generate(doc: &mut impl DocumentSink) {
    doc.paragraph(Paragraph::new());
    doc.page_break(false);
}
