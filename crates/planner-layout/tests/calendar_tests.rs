use chrono::NaiveDate;
use planner_layout::calendar::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_week_count() {
    // Thursday January 1st
    assert_eq!(week_count(2026).unwrap(), 53);
    assert_eq!(week_count(2015).unwrap(), 53);
    // Leap year ending on a Thursday
    assert_eq!(week_count(2020).unwrap(), 53);
    assert_eq!(week_count(2025).unwrap(), 52);
    assert_eq!(week_count(2024).unwrap(), 52);
}

#[test]
fn test_year_weeks_cover_year_boundaries() {
    let weeks = year_weeks(2026).unwrap();
    assert_eq!(weeks.len(), 53);

    // Week 1 of 2026 starts in December 2025
    assert_eq!(weeks[0].number, 1);
    assert_eq!(weeks[0].monday, date(2025, 12, 29));
    assert_eq!(weeks[0].sunday, date(2026, 1, 4));

    // Week 53 ends in January 2027
    assert_eq!(weeks[52].monday, date(2026, 12, 28));
    assert_eq!(weeks[52].sunday, date(2027, 1, 3));

    for pair in weeks.windows(2) {
        assert_eq!(pair[1].monday - pair[0].monday, chrono::Duration::days(7));
    }
}

#[test]
fn test_first_week_of_month() {
    let weeks = year_weeks(2026).unwrap();

    // Week 9: Feb 23 - Mar 1, contains March 1st
    let w9 = &weeks[8];
    assert_eq!(w9.number, 9);
    assert!(w9.is_first_week_of_month());
    assert_eq!(w9.month_label(), "February / March");

    // Week 10: Mar 2 - Mar 8, entirely inside March
    assert!(!weeks[9].is_first_week_of_month());
    assert_eq!(weeks[9].month_label(), "March");

    // June 1st 2026 is a Monday
    let june = weeks.iter().find(|w| w.monday == date(2026, 6, 1)).unwrap();
    assert!(june.is_first_week_of_month());

    // Twelve months plus January of the following year
    let ordinals = first_week_ordinals(&weeks);
    assert_eq!(ordinals.len(), 13);
    assert!(ordinals.contains(&9));
}

#[test]
fn test_day_labels() {
    let d = date(2026, 1, 1);
    assert_eq!(day_label(d), "Week 1, January 1st, Thursday");
    assert_eq!(day_heading(d), "January 1st,  2026-01-01,  Week 1");
    assert_eq!(day_name(d), "Thursday");

    let d = date(2026, 3, 22);
    assert_eq!(day_label(d), "Week 12, March 22nd, Sunday");
    assert!(is_weekend(d));
    assert!(!is_weekend(date(2026, 3, 23)));
}

#[test]
fn test_month_days() {
    let days = month_days(2028, 2).unwrap();
    assert_eq!(days.len(), 29);
    assert_eq!(days[28], date(2028, 2, 29));
    assert_eq!(month_name(2), "February");
}
