use planner_layout::constants::*;
use planner_layout::*;
use proptest::prelude::*;

#[test]
fn test_toc_last_entry_is_last_numbered_page() {
    for year in [2024, 2025, 2026, 2028] {
        let mut config = PlannerConfig::default();
        config.document.year = year;
        let plan = DocumentPlan::new(&config).unwrap();

        let last = plan.toc_entries.last().unwrap();
        // Graph paper ends with a blank verso, which is listed too
        assert_eq!(last.page_number, plan.numbered.numbered_sides(), "{year}");
        assert_eq!(plan.numbered.numbered_sides() % 2, 0);
    }
}

#[test]
fn test_toc_entries_in_page_order() {
    let plan = DocumentPlan::new(&PlannerConfig::default()).unwrap();
    let entries = &plan.toc_entries;

    assert_eq!(entries[0].label, "Goals");
    assert_eq!(entries[0].page_number, 1);
    assert_eq!(entries[0].shading, Shading::SectionHeader);
    assert_eq!(entries[1].label, "");
    assert_eq!(entries[2].label, "Backlog (1/4)");
    assert_eq!(entries[2].page_number, 3);

    for pair in entries.windows(2) {
        assert!(pair[0].page_number <= pair[1].page_number);
    }
}

#[test]
fn test_toc_days_share_pages() {
    let plan = DocumentPlan::new(&PlannerConfig::default()).unwrap();
    let jan1 = plan
        .toc_entries
        .iter()
        .position(|e| e.label == "Week 1, January 1st, Thursday")
        .unwrap();
    let jan2 = &plan.toc_entries[jan1 + 1];
    assert_eq!(jan2.label, "Week 1, January 2nd, Friday");
    assert_eq!(jan2.page_number, plan.toc_entries[jan1].page_number);

    // January 3rd 2026 is a Saturday
    let jan3 = &plan.toc_entries[jan1 + 2];
    assert_eq!(jan3.shading, Shading::FirstItem);
    assert_eq!(jan3.page_number, jan2.page_number + 1);
}

#[test]
fn test_toc_week_planner_shading() {
    let plan = DocumentPlan::new(&PlannerConfig::default()).unwrap();
    let weeks: Vec<_> = plan
        .toc_entries
        .iter()
        .filter(|e| e.label.starts_with("Week Planner"))
        .collect();
    assert_eq!(weeks.len(), 4);
    assert_eq!(weeks[0].label, "Week Planner (Weeks 1-14)");
    assert_eq!(weeks[0].shading, Shading::SectionHeader);
    assert_eq!(weeks[3].label, "Week Planner (Weeks 43-53)");
    assert_eq!(weeks[1].shading, Shading::FirstItem);
}

#[test]
fn test_toc_page_count_follows_entries() {
    let mut config = PlannerConfig::default();
    let plan = DocumentPlan::new(&config).unwrap();
    let pages = plan.toc.content_sides;
    assert_eq!(pages, plan.toc_entries.len().div_ceil(40));

    config.toc.rows_per_page = 1000;
    let plan = DocumentPlan::new(&config).unwrap();
    assert_eq!(plan.toc.content_sides, 1);
    assert!(plan.toc.needs_blank_verso());
}

#[test]
fn test_tracker_walks_whole_document() {
    let plan = DocumentPlan::new(&PlannerConfig::default()).unwrap();
    let mut tracker = PageTracker::new();
    for (i, section) in plan.sections().iter().enumerate() {
        if i > 0 {
            assert_eq!(tracker.advance(), PageSide::Recto);
        }
        tracker.fill(section);
        assert_eq!(tracker.side(), PageSide::Verso);
    }
    assert_eq!(tracker.pages(), plan.total_sides());
}

#[test]
fn test_statistics_odd_page_counts() {
    let mut config = PlannerConfig::default();
    config.backlog.page_count = 3;
    config.terms_definitions.page_count = 5;
    let plan = DocumentPlan::new(&config).unwrap();
    let stats = calculate_statistics(&plan).unwrap();

    assert_eq!(plan.numbered.backlog.total_sides(), 4);
    assert_eq!(plan.numbered.terms.total_sides(), 6);
    // Backlog, terms, and the four week planner pages stay balanced
    assert!(stats.blank_pages_added >= 2);
    assert_eq!(stats.total_pages % 2, 0);
}

#[test]
fn test_daily_spread_fits_a4() {
    let config = PlannerConfig::default();
    let geometry = PageGeometry::from_config(&config.page);
    let gap = cm_to_twips(config.daily_spread.table_gap);
    let per_table = rows::stacked_table_height(
        geometry.content_height_twips(),
        MINIMIZED_PARAGRAPH_TWIPS,
        SAFETY_MARGIN_TWIPS,
        gap,
        2,
    );
    assert_eq!(per_table, (15420 - 20 - 40 - 283) / 2);

    let spec = RowHeightSpec::new(per_table, config.daily_spread.rows)
        .with_safety(0)
        .with_title(config.table.title_row_twips())
        .with_header(config.table.header_row_twips());
    let check = validate_row_height("Daily spread", &spec);
    assert!(check.is_valid());
    assert_eq!(check.row_height_twips, (per_table - 360 - 280) / 8);
}

#[test]
fn test_invalid_row_height_report() {
    let spec = RowHeightSpec::new(600, 10)
        .with_title(360)
        .with_header(280)
        .with_border_allowance(TABLE_BORDER_OVERHEAD_TWIPS);
    let check = validate_row_height("Calendar", &spec);
    assert!(!check.is_valid());

    let report = check.to_string();
    assert!(report.contains("Calendar table height validation failed!"));
    assert!(report.contains("INVALID"));
    assert!(report.contains("Border allowance: 80 twips"));
}

proptest! {
    #[test]
    fn prop_rows_never_overflow(
        available in 1000i64..40000,
        preceding in prop::sample::select(vec![0i64, MINIMIZED_PARAGRAPH_TWIPS, EMPTY_PARAGRAPH_TWIPS]),
        title in 0i64..800,
        header in 0i64..800,
        rows in 1usize..60,
    ) {
        let spec = RowHeightSpec::new(available, rows)
            .preceded_by(preceding)
            .with_title(title)
            .with_header(header);
        let row = spec.solve();
        prop_assume!(row > 0);

        let used = spec.overhead_twips() + row * rows as i64;
        prop_assert!(used <= available);
        // Integer division leaves less than one twip per row unused
        prop_assert!(available - used < rows as i64);
    }

    #[test]
    fn prop_every_year_balances(year in 1900i32..2100) {
        let mut config = PlannerConfig::default();
        config.document.year = year;
        let plan = DocumentPlan::new(&config).unwrap();

        for section in plan.sections() {
            prop_assert_eq!(section.total_sides() % 2, 0);
        }
        let last = plan.toc_entries.last().unwrap();
        prop_assert_eq!(last.page_number, plan.numbered.numbered_sides());
    }
}
