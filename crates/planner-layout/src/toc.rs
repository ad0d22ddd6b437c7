//! Table of contents precomputation
//!
//! Page numbers are assigned by walking the section plans, before any page
//! is rendered. Numbering starts at 1 on the Goals page.

use crate::calendar;
use crate::constants::estimate_text_width_twips;
use crate::pagination::SectionPlan;
use crate::plan::NumberedPlan;
use crate::types::Shading;

/// Font size of TOC content rows in points
pub const TOC_FONT_SIZE_PT: f64 = 10.0;

/// Padding added to the estimated label width (twips)
pub const TOC_LABEL_PADDING_TWIPS: i64 = 150;

/// Padding added to the estimated page number width (twips)
pub const TOC_PAGE_PADDING_TWIPS: i64 = 250;

/// One row of the table of contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    /// Empty for blank versos
    pub label: String,
    pub page_number: usize,
    pub shading: Shading,
}

/// Appends entries while counting pages
struct TocWriter {
    entries: Vec<TocEntry>,
    page: usize,
}

impl TocWriter {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            page: 1,
        }
    }

    /// Entry on the current page, without turning it
    fn entry(&mut self, label: impl Into<String>, shading: Shading) {
        self.entries.push(TocEntry {
            label: label.into(),
            page_number: self.page,
            shading,
        });
    }

    /// Entry occupying the current page, then turn the page
    fn page(&mut self, label: impl Into<String>, shading: Shading) {
        self.entry(label, shading);
        self.page += 1;
    }

    fn blank(&mut self) {
        self.page("", Shading::None);
    }

    fn pad(&mut self, plan: &SectionPlan) {
        for _ in 0..plan.padding_sides {
            self.blank();
        }
    }

    /// Numbered "Label (i/N)" pages, the first one marked as section header
    fn counted_pages(&mut self, label: &str, plan: &SectionPlan) {
        let count = plan.content_sides;
        for i in 0..count {
            self.page(format!("{} ({}/{})", label, i + 1, count), first_page_shading(i));
        }
        self.pad(plan);
    }
}

fn first_page_shading(index: usize) -> Shading {
    if index == 0 { Shading::SectionHeader } else { Shading::None }
}

/// Build every TOC entry for the numbered part of the planner.
///
/// Entries appear in page order, and the page number of the last entry is
/// the number of the last numbered page.
pub fn build_toc_entries(plan: &NumberedPlan) -> Vec<TocEntry> {
    let mut toc = TocWriter::new();

    toc.page("Goals", Shading::SectionHeader);
    toc.blank();

    toc.counted_pages("Backlog", &plan.backlog);

    let first_weeks = calendar::first_week_ordinals(&plan.weeks);
    for page in 0..plan.week_planner.content_sides {
        let start = page * plan.week_rows_per_page + 1;
        let end = ((page + 1) * plan.week_rows_per_page).min(plan.weeks.len());
        let shading = if page == 0 {
            Shading::SectionHeader
        } else if first_weeks.iter().any(|w| (start..=end).contains(w)) {
            Shading::FirstItem
        } else {
            Shading::None
        };
        toc.page(format!("Week Planner (Weeks {}-{})", start, end), shading);
    }
    toc.pad(&plan.week_planner);

    for month in &plan.months {
        toc.page(calendar::month_name(month.month), Shading::SectionHeader);
        toc.blank();

        // Daily spread: two days share one page side
        for pair in month.dates.chunks(crate::constants::DAYS_PER_SIDE) {
            for day in pair {
                let shading = if calendar::is_weekend(*day) {
                    Shading::FirstItem
                } else {
                    Shading::None
                };
                toc.entry(calendar::day_label(*day), shading);
            }
            toc.page += 1;
        }
        toc.pad(&month.section);
    }

    toc.counted_pages("Terms and Definitions", &plan.terms);

    let sheets = plan.graph_paper.content_sides / 2;
    for i in 0..sheets {
        toc.page(format!("Graph Paper ({}/{})", i + 1, sheets), first_page_shading(i));
        toc.blank();
    }

    toc.entries
}

/// Pages needed for `entries` TOC rows
pub fn toc_page_count(entries: usize, rows_per_page: usize) -> usize {
    entries.div_ceil(rows_per_page.max(1))
}

/// Column widths (label, user entry, page number) in twips.
///
/// Label and page number columns are sized to their longest text; the
/// entry column takes what is left.
pub fn toc_column_widths(entries: &[TocEntry], total_width_twips: i64) -> (i64, i64, i64) {
    let longest_label = entries
        .iter()
        .map(|e| e.label.as_str())
        .max_by_key(|label| label.chars().count())
        .unwrap_or("");
    let label_width =
        estimate_text_width_twips(longest_label, TOC_FONT_SIZE_PT) + TOC_LABEL_PADDING_TWIPS;

    let max_page = entries.iter().map(|e| e.page_number).max().unwrap_or(0);
    let page_width = estimate_text_width_twips(&max_page.to_string(), TOC_FONT_SIZE_PT)
        + TOC_PAGE_PADDING_TWIPS;

    (label_width, total_width_twips - label_width - page_width, page_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(label: &str, page_number: usize) -> TocEntry {
        TocEntry {
            label: label.to_string(),
            page_number,
            shading: Shading::None,
        }
    }

    #[test]
    fn test_column_widths() {
        let entries = [entry("Goals", 1), entry("Week 10, September 30th, Wednesday", 212)];
        let (label, user, page) = toc_column_widths(&entries, 10204);
        // 34 chars * 10pt * 0.5 * 20 + 150
        assert_eq!(label, 3400 + 150);
        // 3 digits * 100 + 250
        assert_eq!(page, 300 + 250);
        assert_eq!(label + user + page, 10204);
    }

    #[test]
    fn test_page_count() {
        assert_eq!(toc_page_count(0, 40), 0);
        assert_eq!(toc_page_count(40, 40), 1);
        assert_eq!(toc_page_count(41, 40), 2);
    }
}
