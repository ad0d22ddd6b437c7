//! Section footprints for the whole planner
//!
//! Page counts are derived once, here, and consumed both by the table of
//! contents builder and by the renderer. Nothing else decides how many
//! sides a section occupies.

use crate::calendar::{self, PlannerWeek};
use crate::config::PlannerConfig;
use crate::constants::*;
use crate::pagination::{SectionKind, SectionPlan};
use crate::toc::{self, TocEntry};
use crate::types::*;
use chrono::NaiveDate;

/// Page sides of a month's daily spread (two days per side)
pub fn daily_spread_sides(days: usize) -> usize {
    days.div_ceil(DAYS_PER_SIDE)
}

/// One month: cover, blank verso, daily spread and padding
#[derive(Debug, Clone, PartialEq)]
pub struct MonthPlan {
    /// 1-based month
    pub month: u32,
    pub dates: Vec<NaiveDate>,
    pub section: SectionPlan,
}

impl MonthPlan {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        let dates = calendar::month_days(year, month)?;
        let spread = daily_spread_sides(dates.len());
        Ok(Self {
            month,
            dates,
            section: SectionPlan::padded(SectionKind::Month(month), MONTH_COVER_SIDES + spread),
        })
    }

    pub fn spread_sides(&self) -> usize {
        daily_spread_sides(self.dates.len())
    }
}

/// Footprints of the page-numbered part of the planner (Goals onward)
#[derive(Debug, Clone, PartialEq)]
pub struct NumberedPlan {
    pub year: i32,
    pub goals: SectionPlan,
    pub backlog: SectionPlan,
    /// ISO weeks of the year, in planner order
    pub weeks: Vec<PlannerWeek>,
    pub week_rows_per_page: usize,
    pub week_planner: SectionPlan,
    pub months: Vec<MonthPlan>,
    pub terms: SectionPlan,
    pub graph_paper: SectionPlan,
}

impl NumberedPlan {
    pub fn new(config: &PlannerConfig) -> Result<Self> {
        let year = config.document.year;
        let weeks = calendar::year_weeks(year)?;
        let rows_per_page = config.week_planner.rows_per_page.max(1);
        let week_pages = weeks.len().div_ceil(rows_per_page);
        let months = (1..=12)
            .map(|month| MonthPlan::new(year, month))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            year,
            // Goals page and its blank verso
            goals: SectionPlan::fixed(SectionKind::Goals, 2),
            backlog: SectionPlan::padded(SectionKind::Backlog, config.backlog.page_count),
            weeks,
            week_rows_per_page: rows_per_page,
            week_planner: SectionPlan::padded(SectionKind::WeekPlanner, week_pages),
            months,
            terms: SectionPlan::padded(SectionKind::Terms, config.terms_definitions.page_count),
            // Each sheet is a grid recto followed by a blank verso
            graph_paper: SectionPlan::fixed(
                SectionKind::GraphPaper,
                2 * config.graph_paper.page_count,
            ),
        })
    }

    /// Weeks shown on week planner page `page` (0-based)
    pub fn weeks_on_page(&self, page: usize) -> &[PlannerWeek] {
        let start = (page * self.week_rows_per_page).min(self.weeks.len());
        let end = (start + self.week_rows_per_page).min(self.weeks.len());
        &self.weeks[start..end]
    }

    pub fn sections(&self) -> Vec<&SectionPlan> {
        let mut sections = vec![&self.goals, &self.backlog, &self.week_planner];
        sections.extend(self.months.iter().map(|m| &m.section));
        sections.push(&self.terms);
        sections.push(&self.graph_paper);
        sections
    }

    /// Number of the last numbered page
    pub fn numbered_sides(&self) -> usize {
        self.sections().iter().map(|s| s.total_sides()).sum()
    }
}

/// Footprint of every section, front cover to rear cover
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPlan {
    pub cover: SectionPlan,
    pub instructions: SectionPlan,
    pub calendar: SectionPlan,
    pub toc: SectionPlan,
    pub numbered: NumberedPlan,
    pub rear_cover: SectionPlan,
    /// Table of contents, computed before anything is rendered
    pub toc_entries: Vec<TocEntry>,
}

impl DocumentPlan {
    pub fn new(config: &PlannerConfig) -> Result<Self> {
        let numbered = NumberedPlan::new(config)?;
        let toc_entries = toc::build_toc_entries(&numbered);
        let toc_pages = toc::toc_page_count(toc_entries.len(), config.toc.rows_per_page);

        let plan = Self {
            cover: SectionPlan::fixed(SectionKind::Cover, COVER_SIDES),
            instructions: SectionPlan::fixed(SectionKind::Instructions, INSTRUCTIONS_SIDES),
            calendar: SectionPlan::fixed(SectionKind::Calendar, CALENDAR_SIDES),
            toc: SectionPlan::padded(SectionKind::TableOfContents, toc_pages),
            numbered,
            rear_cover: SectionPlan::fixed(SectionKind::RearCover, REAR_COVER_SIDES),
            toc_entries,
        };
        log::debug!(
            "Planned {} sides ({} numbered, {} TOC entries)",
            plan.total_sides(),
            plan.numbered.numbered_sides(),
            plan.toc_entries.len()
        );
        Ok(plan)
    }

    pub fn year(&self) -> i32 {
        self.numbered.year
    }

    /// All sections in document order
    pub fn sections(&self) -> Vec<&SectionPlan> {
        let mut sections = vec![&self.cover, &self.instructions, &self.calendar, &self.toc];
        sections.extend(self.numbered.sections());
        sections.push(&self.rear_cover);
        sections
    }

    /// Sides before page numbering starts
    pub fn front_matter_sides(&self) -> usize {
        self.cover.total_sides()
            + self.instructions.total_sides()
            + self.calendar.total_sides()
            + self.toc.total_sides()
    }

    pub fn total_sides(&self) -> usize {
        self.sections().iter().map(|s| s.total_sides()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_spread_sides() {
        assert_eq!(daily_spread_sides(28), 14);
        assert_eq!(daily_spread_sides(29), 15);
        assert_eq!(daily_spread_sides(30), 15);
        assert_eq!(daily_spread_sides(31), 16);
    }

    #[test]
    fn test_month_padding() {
        // February 2026: 28 days, even spread, no blank verso
        let feb = MonthPlan::new(2026, 2).unwrap();
        assert_eq!(feb.section.content_sides, 16);
        assert!(!feb.section.needs_blank_verso());

        // February 2028: 29 days, odd spread, one blank verso
        let feb = MonthPlan::new(2028, 2).unwrap();
        assert_eq!(feb.section.content_sides, 17);
        assert!(feb.section.needs_blank_verso());

        // April: 30 days
        let apr = MonthPlan::new(2026, 4).unwrap();
        assert_eq!(apr.section.total_sides(), 18);

        // January: 31 days
        let jan = MonthPlan::new(2026, 1).unwrap();
        assert_eq!(jan.section.total_sides(), 18);
        assert!(!jan.section.needs_blank_verso());
    }

    #[test]
    fn test_week_pages_short_last_page() {
        let config = PlannerConfig::default();
        let plan = NumberedPlan::new(&config).unwrap();
        assert_eq!(plan.weeks.len(), 53);
        assert_eq!(plan.week_planner.content_sides, 4);
        assert_eq!(plan.weeks_on_page(0).len(), 14);
        assert_eq!(plan.weeks_on_page(3).len(), 11);
    }

    #[test]
    fn test_every_section_is_even() {
        let plan = DocumentPlan::new(&PlannerConfig::default()).unwrap();
        for section in plan.sections() {
            assert_eq!(section.total_sides() % 2, 0, "{:?}", section.kind);
        }
    }
}
