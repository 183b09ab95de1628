use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Aggregation granularity for dashboard and history views.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Interval {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Interval {
    pub const ALL: [Interval; 5] = [
        Interval::Daily,
        Interval::Weekly,
        Interval::Monthly,
        Interval::Quarterly,
        Interval::Yearly,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Interval::Daily => "Daily",
            Interval::Weekly => "Weekly",
            Interval::Monthly => "Monthly",
            Interval::Quarterly => "Quarterly",
            Interval::Yearly => "Yearly",
        }
    }

    /// Parses user-supplied interval selectors. Unknown spellings yield
    /// `None` for the caller to reject or default.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "daily" | "day" | "d" => Some(Interval::Daily),
            "weekly" | "week" | "w" => Some(Interval::Weekly),
            "monthly" | "month" | "mo" | "m" => Some(Interval::Monthly),
            "quarterly" | "quarter" | "q" => Some(Interval::Quarterly),
            "yearly" | "year" | "y" => Some(Interval::Yearly),
            _ => None,
        }
    }

    /// Every calendar date of the period containing `reference`, ascending.
    /// The period is the enclosing calendar unit: the Sunday-started week,
    /// the month, the 3-month quarter block, or the year.
    pub fn dates(self, reference: NaiveDate) -> Vec<NaiveDate> {
        match self {
            Interval::Daily => vec![reference],
            Interval::Weekly => {
                let start = week_start(reference);
                (0..7).map(|offset| start + Duration::days(offset)).collect()
            }
            Interval::Monthly => month_dates(reference.year(), reference.month()),
            Interval::Quarterly => {
                let first = quarter_start_month(reference);
                (first..first + 3)
                    .flat_map(|month| month_dates(reference.year(), month))
                    .collect()
            }
            Interval::Yearly => (1..=12)
                .flat_map(|month| month_dates(reference.year(), month))
                .collect(),
        }
    }

    /// Moves the reference date by whole units of this interval. Month-based
    /// moves clamp the day to the target month's length, so the 31st shifts
    /// into February without leaving the calendar.
    pub fn shift(self, reference: NaiveDate, steps: i32) -> NaiveDate {
        match self {
            Interval::Daily => reference + Duration::days(i64::from(steps)),
            Interval::Weekly => reference + Duration::weeks(i64::from(steps)),
            Interval::Monthly => shift_months(reference, steps),
            Interval::Quarterly => shift_months(reference, 3 * steps),
            Interval::Yearly => shift_months(reference, 12 * steps),
        }
    }

    /// Human label for the period containing `reference`.
    pub fn range_label(self, reference: NaiveDate) -> String {
        match self {
            Interval::Daily => reference.format("%A, %B %-d, %Y").to_string(),
            Interval::Weekly => {
                let start = week_start(reference);
                let end = start + Duration::days(6);
                format!("{} - {}", start.format("%b %-d"), end.format("%b %-d, %Y"))
            }
            Interval::Monthly => reference.format("%B %Y").to_string(),
            Interval::Quarterly => {
                format!("Q{} {}", reference.month0() / 3 + 1, reference.year())
            }
            Interval::Yearly => reference.year().to_string(),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The Sunday on or before `date`. Weeks run Sunday through Saturday.
fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// First month (1-based) of the quarter block containing `date`.
fn quarter_start_month(date: NaiveDate) -> u32 {
    (date.month0() / 3) * 3 + 1
}

fn month_dates(year: i32, month: u32) -> Vec<NaiveDate> {
    (1..=days_in_month(year, month))
        .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
        .collect()
}

fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    let mut day = date.day();
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    day = day.min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}
