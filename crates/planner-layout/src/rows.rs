//! Row-height solver and validator
//!
//! Every page-filling table is sized with the same closed form:
//!
//! ```text
//! available = preceding + safety + border + title + header + n * row
//! ```
//!
//! solved for `row` with integer division, so a table can never overflow
//! its page and leaves less than `n` twips unused.

use crate::constants::{twips_to_cm, SAFETY_MARGIN_TWIPS};
use std::fmt;

/// Solve for the content row height in twips.
///
/// `content_rows` must be at least 1. The result is returned even when it
/// is zero or negative so that the caller can report it.
pub fn solve_content_row_height(
    available: i64,
    preceding: i64,
    safety: i64,
    fixed_rows: i64,
    content_rows: usize,
) -> i64 {
    (available - preceding - safety - fixed_rows) / content_rows as i64
}

/// Height available to each of `tables` tables stacked on one page with
/// `gap` twips between neighbours.
pub fn stacked_table_height(
    available: i64,
    preceding: i64,
    safety: i64,
    gap: i64,
    tables: usize,
) -> i64 {
    (available - preceding - safety - gap) / tables as i64
}

/// Everything that consumes vertical space on a page-filling table's page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowHeightSpec {
    pub available_twips: i64,
    /// Paragraph already on the page before the table (page-break marker, anchor)
    pub preceding_twips: i64,
    pub safety_twips: i64,
    /// Allowance for outer borders, used only by the calendar grid
    pub border_allowance_twips: i64,
    pub title_row_twips: i64,
    pub header_row_twips: i64,
    pub content_rows: usize,
}

impl RowHeightSpec {
    /// Spec with the standard safety margin and no title, header or border
    pub fn new(available_twips: i64, content_rows: usize) -> Self {
        Self {
            available_twips,
            preceding_twips: 0,
            safety_twips: SAFETY_MARGIN_TWIPS,
            border_allowance_twips: 0,
            title_row_twips: 0,
            header_row_twips: 0,
            content_rows,
        }
    }

    pub fn preceded_by(mut self, twips: i64) -> Self {
        self.preceding_twips = twips;
        self
    }

    pub fn with_safety(mut self, twips: i64) -> Self {
        self.safety_twips = twips;
        self
    }

    pub fn with_title(mut self, twips: i64) -> Self {
        self.title_row_twips = twips;
        self
    }

    pub fn with_header(mut self, twips: i64) -> Self {
        self.header_row_twips = twips;
        self
    }

    pub fn with_border_allowance(mut self, twips: i64) -> Self {
        self.border_allowance_twips = twips;
        self
    }

    pub fn fixed_rows_twips(&self) -> i64 {
        self.title_row_twips + self.header_row_twips
    }

    /// All space consumed before the content rows are laid out
    pub fn overhead_twips(&self) -> i64 {
        self.preceding_twips + self.safety_twips + self.border_allowance_twips + self.fixed_rows_twips()
    }

    pub fn remaining_twips(&self) -> i64 {
        self.available_twips - self.overhead_twips()
    }

    pub fn solve(&self) -> i64 {
        solve_content_row_height(
            self.available_twips,
            self.preceding_twips,
            self.safety_twips,
            self.border_allowance_twips + self.fixed_rows_twips(),
            self.content_rows,
        )
    }
}

/// Outcome of validating a [`RowHeightSpec`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowHeightCheck {
    pub section: String,
    pub spec: RowHeightSpec,
    pub row_height_twips: i64,
}

impl RowHeightCheck {
    pub fn is_valid(&self) -> bool {
        self.row_height_twips > 0
    }
}

impl fmt::Display for RowHeightCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spec = &self.spec;
        if self.is_valid() {
            return write!(
                f,
                "{}: {} rows of {} twips",
                self.section, spec.content_rows, self.row_height_twips
            );
        }

        writeln!(f, "{} table height validation failed!", self.section)?;
        writeln!(
            f,
            "    Available space: {} twips ({:.2} cm)",
            spec.available_twips,
            twips_to_cm(spec.available_twips)
        )?;
        writeln!(
            f,
            "    Fixed overhead: {} twips ({:.2} cm)",
            spec.overhead_twips(),
            twips_to_cm(spec.overhead_twips())
        )?;
        writeln!(f, "      - Preceding paragraph: {} twips", spec.preceding_twips)?;
        writeln!(f, "      - Safety margin: {} twips", spec.safety_twips)?;
        if spec.border_allowance_twips > 0 {
            writeln!(f, "      - Border allowance: {} twips", spec.border_allowance_twips)?;
        }
        writeln!(f, "      - Title row: {} twips", spec.title_row_twips)?;
        writeln!(f, "      - Header row: {} twips", spec.header_row_twips)?;
        writeln!(
            f,
            "    Remaining for {} content rows: {} twips",
            spec.content_rows,
            spec.remaining_twips()
        )?;
        writeln!(
            f,
            "    Computed row height: {} twips (INVALID - must be > 0)",
            self.row_height_twips
        )?;
        write!(f, "    Suggestion: Reduce margins, row counts, or row heights.")
    }
}

/// Solve `spec` and warn when its content rows cannot fit.
///
/// Never fails: an infeasible table still renders (visibly broken) so the
/// output can be inspected.
pub fn validate_row_height(section: &str, spec: &RowHeightSpec) -> RowHeightCheck {
    let check = RowHeightCheck {
        section: section.to_string(),
        spec: *spec,
        row_height_twips: spec.solve(),
    };
    if check.is_valid() {
        log::debug!("{}", check);
    } else {
        log::warn!("{}", check);
    }
    check
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MINIMIZED_PARAGRAPH_TWIPS;

    #[test]
    fn test_solver_matches_closed_form() {
        // A4, 1cm/1.5cm margins: 15420 twips; 18pt title, 16 rows
        let spec = RowHeightSpec::new(15420, 16)
            .preceded_by(MINIMIZED_PARAGRAPH_TWIPS)
            .with_title(360);
        assert_eq!(spec.solve(), (15420 - 20 - 40 - 360) / 16);
        assert_eq!(spec.solve(), 937);
    }

    #[test]
    fn test_solver_truncates_toward_zero() {
        assert_eq!(solve_content_row_height(100, 0, 0, 0, 3), 33);
        assert_eq!(solve_content_row_height(10, 0, 40, 0, 4), -7);
    }

    #[test]
    fn test_stacked_tables_split_the_page() {
        let per_table = stacked_table_height(15420, 20, 40, 283, 2);
        assert_eq!(per_table, (15420 - 20 - 40 - 283) / 2);
    }

    #[test]
    fn test_validator_reports_infeasible_spec() {
        let spec = RowHeightSpec::new(500, 6).with_title(400).with_border_allowance(80);
        let check = validate_row_height("Calendar 2026", &spec);
        assert!(!check.is_valid());
        assert_eq!(check.row_height_twips, (500 - 40 - 80 - 400) / 6);

        let report = check.to_string();
        assert!(report.contains("Calendar 2026"));
        assert!(report.contains("Border allowance: 80 twips"));
        assert!(report.contains("INVALID"));
        assert!(report.contains("Reduce margins"));
    }

    #[test]
    fn test_validator_returns_solver_value() {
        let spec = RowHeightSpec::new(15420, 40).preceded_by(20).with_title(360);
        assert_eq!(validate_row_height("Table of Contents", &spec).row_height_twips, spec.solve());
    }
}
