//! Calendar math: ISO weeks, month lengths and date labels

use crate::types::*;
use chrono::{Datelike, NaiveDate, Weekday};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Day names, Monday first
pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Column headings of the Sunday-first mini calendars
pub const MINI_CALENDAR_HEADINGS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

/// Name of a 1-based month
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month.clamp(1, 12) - 1) as usize]
}

pub fn day_name(date: NaiveDate) -> &'static str {
    DAY_NAMES[date.weekday().num_days_from_monday() as usize]
}

pub(crate) fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or(LayoutError::InvalidDate { year, month, day })
}

/// Number of ISO 8601 weeks in `year` (52 or 53).
///
/// A year has 53 weeks when January 1st or December 31st is a Thursday.
pub fn week_count(year: i32) -> Result<u32> {
    let jan1 = ymd(year, 1, 1)?;
    let dec31 = ymd(year, 12, 31)?;
    if jan1.weekday() == Weekday::Thu || dec31.weekday() == Weekday::Thu {
        Ok(53)
    } else {
        Ok(52)
    }
}

pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    let first = ymd(year, month, 1)?;
    let next = if month == 12 {
        ymd(year + 1, 1, 1)?
    } else {
        ymd(year, month + 1, 1)?
    };
    Ok(next.signed_duration_since(first).num_days() as u32)
}

/// Every date of a month, in order
pub fn month_days(year: i32, month: u32) -> Result<Vec<NaiveDate>> {
    let count = days_in_month(year, month)?;
    (1..=count).map(|day| ymd(year, month, day)).collect()
}

/// One ISO week of the planner year
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerWeek {
    /// ISO week number (1-53)
    pub number: u32,
    pub monday: NaiveDate,
    pub sunday: NaiveDate,
}

impl PlannerWeek {
    /// A week opens a month when its Monday is the 1st or a month boundary
    /// falls inside it.
    pub fn is_first_week_of_month(&self) -> bool {
        self.monday.day() == 1 || self.monday.month() != self.sunday.month()
    }

    /// "March" or "March / April" when the week spans two months
    pub fn month_label(&self) -> String {
        let start = self.monday.month();
        let end = self.sunday.month();
        if start == end {
            month_name(start).to_string()
        } else {
            format!("{} / {}", month_name(start), month_name(end))
        }
    }
}

/// All ISO weeks of `year`. Boundary weeks may include days of the
/// neighbouring years.
pub fn year_weeks(year: i32) -> Result<Vec<PlannerWeek>> {
    let count = week_count(year)?;
    (1..=count)
        .map(|number| {
            let monday = NaiveDate::from_isoywd_opt(year, number, Weekday::Mon);
            let sunday = NaiveDate::from_isoywd_opt(year, number, Weekday::Sun);
            match (monday, sunday) {
                (Some(monday), Some(sunday)) => Ok(PlannerWeek {
                    number,
                    monday,
                    sunday,
                }),
                _ => Err(LayoutError::Config(format!(
                    "ISO week {number} of {year} is out of range"
                ))),
            }
        })
        .collect()
}

/// 1-based ordinals (position in [`year_weeks`]) of the weeks that open a month
pub fn first_week_ordinals(weeks: &[PlannerWeek]) -> Vec<usize> {
    weeks
        .iter()
        .enumerate()
        .filter(|(_, week)| week.is_first_week_of_month())
        .map(|(i, _)| i + 1)
        .collect()
}

pub fn ordinal_suffix(n: u32) -> &'static str {
    if (11..=13).contains(&(n % 100)) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// TOC label for a day: "Week 1, January 1st, Thursday"
pub fn day_label(date: NaiveDate) -> String {
    format!(
        "Week {}, {} {}{}, {}",
        date.iso_week().week(),
        month_name(date.month()),
        date.day(),
        ordinal_suffix(date.day()),
        day_name(date)
    )
}

/// Day table heading: "January 1st,  2026-01-01,  Week 1"
pub fn day_heading(date: NaiveDate) -> String {
    format!(
        "{} {}{},  {},  Week {}",
        month_name(date.month()),
        date.day(),
        ordinal_suffix(date.day()),
        date.format("%Y-%m-%d"),
        date.iso_week().week()
    )
}

/// Sunday-first week rows for a mini calendar; `None` marks an empty cell
pub fn sunday_first_weeks(year: i32, month: u32) -> Result<Vec<[Option<u32>; 7]>> {
    let days = month_days(year, month)?;
    let mut weeks = Vec::new();
    let mut row = [None; 7];
    for date in days {
        let col = date.weekday().num_days_from_sunday() as usize;
        row[col] = Some(date.day());
        if col == 6 {
            weeks.push(row);
            row = [None; 7];
        }
    }
    if row.iter().any(Option::is_some) {
        weeks.push(row);
    }
    Ok(weeks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2026, 2).unwrap(), 28);
        assert_eq!(days_in_month(2028, 2).unwrap(), 29);
        assert_eq!(days_in_month(2026, 12).unwrap(), 31);
        assert_eq!(days_in_month(2026, 4).unwrap(), 30);
    }

    #[test]
    fn test_ordinal_suffix() {
        let cases = [(1, "st"), (2, "nd"), (3, "rd"), (4, "th"), (11, "th"), (12, "th"), (13, "th"), (21, "st"), (22, "nd"), (23, "rd"), (31, "st")];
        for (n, suffix) in cases {
            assert_eq!(ordinal_suffix(n), suffix, "{n}");
        }
    }

    #[test]
    fn test_mini_calendar_layout() {
        // February 2026 starts on a Sunday and fills exactly four rows
        let weeks = sunday_first_weeks(2026, 2).unwrap();
        assert_eq!(weeks.len(), 4);
        assert_eq!(weeks[0][0], Some(1));
        assert_eq!(weeks[3][6], Some(28));

        // January 2026 starts on a Thursday
        let weeks = sunday_first_weeks(2026, 1).unwrap();
        assert_eq!(weeks[0][..4], [None, None, None, None]);
        assert_eq!(weeks[0][4], Some(1));
    }

    #[test]
    fn test_invalid_date() {
        assert!(matches!(
            days_in_month(2026, 13),
            Err(LayoutError::InvalidDate { month: 13, .. })
        ));
    }
}
