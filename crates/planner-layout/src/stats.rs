use crate::calendar;
use crate::plan::DocumentPlan;
use crate::types::*;

/// Calculate page statistics for a planned document
pub fn calculate_statistics(plan: &DocumentPlan) -> Result<PlannerStatistics> {
    let year = plan.year();
    let iso_weeks = calendar::week_count(year)?;

    let front_matter_pages = plan.front_matter_sides();
    let numbered_pages = plan.numbered.numbered_sides();
    let back_matter_pages = plan.rear_cover.total_sides();
    let total_pages = plan.total_sides();

    // Every section is padded to an even count, so the document is too
    let padded_count = total_pages.div_ceil(2) * 2;
    let sheets = padded_count / 2;

    let blank_pages_added = plan.sections().iter().map(|s| s.padding_sides).sum();

    Ok(PlannerStatistics {
        year,
        iso_weeks,
        toc_pages: plan.toc.total_sides(),
        front_matter_pages,
        numbered_pages,
        back_matter_pages,
        total_pages,
        sheets,
        blank_pages_added,
        toc_entries: plan.toc_entries.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerConfig;

    #[test]
    fn test_default_planner_statistics() {
        let plan = DocumentPlan::new(&PlannerConfig::default()).unwrap();
        let stats = calculate_statistics(&plan).unwrap();

        assert_eq!(stats.year, 2026);
        assert_eq!(stats.iso_weeks, 53);
        assert_eq!(
            stats.front_matter_pages + stats.numbered_pages + stats.back_matter_pages,
            stats.total_pages
        );
        assert_eq!(stats.total_pages, stats.sheets * 2);
        assert_eq!(stats.toc_entries, plan.toc_entries.len());
    }
}
