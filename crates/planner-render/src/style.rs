//! Table styling shared by the section drivers
//!
//! Title and header rows follow `table.title_row` and `table.header_row`.
//! Structured data (week numbers, dates) is plain black text at the default
//! size; `table.content_row` is reserved for supplementary text in cells
//! that are normally left blank.

use crate::model::*;
use planner_layout::constants::{border_eighths, pt_to_twips};
use planner_layout::TableConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableStyle {
    config: TableConfig,
}

impl TableStyle {
    pub fn new(config: &TableConfig) -> Self {
        Self { config: *config }
    }

    pub fn borders(&self) -> TableBorders {
        TableBorders {
            size_eighths: border_eighths(self.config.border.thickness),
            color: self.config.border.grayscale,
        }
    }

    /// Empty bordered table over `column_widths`
    pub fn table(&self, column_widths: Vec<i64>) -> Table {
        Table::new(column_widths, Some(self.borders()))
    }

    pub fn title_height(&self) -> RowHeight {
        RowHeight::Exact(pt_to_twips(self.config.title_row.height))
    }

    pub fn header_height(&self) -> RowHeight {
        RowHeight::Exact(pt_to_twips(self.config.header_row.height))
    }

    pub fn title_run(&self, text: impl Into<String>) -> TextRun {
        let row = &self.config.title_row;
        TextRun::new(text)
            .size(row.font_size)
            .bold()
            .color(row.font_grayscale)
    }

    pub fn header_run(&self, text: impl Into<String>) -> TextRun {
        let row = &self.config.header_row;
        TextRun::new(text)
            .size(row.font_size)
            .bold()
            .color(row.font_grayscale)
    }

    /// Shaded title cell, vertically centered
    pub fn title_cell(&self, text: impl Into<String>, align: Align) -> Cell {
        Cell::paragraph(Paragraph::text(self.title_run(text)).aligned(align))
            .shaded(Some(self.config.title_row.background_grayscale))
            .v_align(VAlign::Center)
    }

    pub fn header_cell(&self, text: impl Into<String>, align: Align) -> Cell {
        Cell::paragraph(Paragraph::text(self.header_run(text)).aligned(align))
            .shaded(Some(self.config.header_row.background_grayscale))
            .v_align(VAlign::Center)
    }

    pub fn header_background(&self) -> u8 {
        self.config.header_row.background_grayscale
    }

    /// Blank writing cell
    pub fn blank_cell(&self) -> Cell {
        Cell::empty().v_align(VAlign::Center)
    }

    /// Cell holding structured data in plain black text
    pub fn data_cell(&self, text: impl Into<String>, align: Align) -> Cell {
        Cell::paragraph(Paragraph::text(TextRun::new(text)).aligned(align))
            .v_align(VAlign::Center)
    }

    /// Title row with one cell spanning the whole table
    pub fn title_row(&self, text: impl Into<String>, columns: usize, align: Align) -> Row {
        Row::new(
            self.title_height(),
            vec![self.title_cell(text, align).span(columns)],
        )
    }

    /// Header row with one cell per column
    pub fn header_row<S: AsRef<str>>(&self, labels: &[S]) -> Row {
        Row::new(
            self.header_height(),
            labels
                .iter()
                .map(|l| self.header_cell(l.as_ref(), Align::Left))
                .collect(),
        )
    }

    /// `count` blank rows of `columns` cells
    pub fn blank_rows(&self, count: usize, columns: usize, height_twips: i64) -> Vec<Row> {
        (0..count)
            .map(|_| {
                Row::new(
                    RowHeight::Exact(height_twips),
                    (0..columns).map(|_| self.blank_cell()).collect(),
                )
            })
            .collect()
    }
}

/// Split `total` twips into a `percent` column and the remainder
pub fn percent_split(total: i64, percent: u8) -> (i64, i64) {
    let first = (total as f64 * f64::from(percent) / 100.0) as i64;
    (first, total - first)
}

/// Split `total` twips into `columns` equal columns; the first columns
/// absorb the remainder one twip each
pub fn equal_columns(total: i64, columns: usize) -> Vec<i64> {
    let columns = columns.max(1) as i64;
    let base = total / columns;
    let extra = total % columns;
    (0..columns)
        .map(|i| if i < extra { base + 1 } else { base })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_split() {
        assert_eq!(percent_split(10204, 25), (2551, 7653));
        assert_eq!(percent_split(10204, 100), (10204, 0));
    }

    #[test]
    fn test_equal_columns() {
        assert_eq!(equal_columns(10204, 2), vec![5102, 5102]);
        assert_eq!(equal_columns(10, 3), vec![4, 3, 3]);
        assert_eq!(equal_columns(10, 3).iter().sum::<i64>(), 10);
    }

    #[test]
    fn test_title_cell_style() {
        let style = TableStyle::new(&TableConfig::default());
        let cell = style.title_cell("Backlog", Align::Left);
        assert_eq!(cell.shading, Some(25));
        assert_eq!(cell.v_align, VAlign::Center);
        match &cell.items[0] {
            CellItem::Paragraph(p) => {
                assert_eq!(p.runs[0].size_pt, Some(12.0));
                assert!(p.runs[0].bold);
            }
            other => panic!("Expected paragraph, got {:?}", other),
        }
        assert_eq!(style.borders().size_eighths, 4);
    }
}
