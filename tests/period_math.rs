use chrono::{Datelike, Duration, NaiveDate, Weekday};
use ledgr::ledger::Interval;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn contiguous(dates: &[NaiveDate]) -> bool {
    dates
        .windows(2)
        .all(|pair| pair[1] - pair[0] == Duration::days(1))
}

#[test]
fn weeks_hold_seven_days_sunday_through_saturday() {
    // Every reference day of a month resolves to a full Sunday-started week
    // containing itself.
    for day in 1..=31 {
        let reference = date(2026, 3, day);
        let week = Interval::Weekly.dates(reference);
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].weekday(), Weekday::Sun);
        assert_eq!(week[6].weekday(), Weekday::Sat);
        assert!(contiguous(&week));
        assert!(week.contains(&reference));
    }
}

#[test]
fn months_cover_their_full_calendar_span() {
    let leap_february = Interval::Monthly.dates(date(2024, 2, 10));
    assert_eq!(leap_february.len(), 29);

    let plain_february = Interval::Monthly.dates(date(2023, 2, 10));
    assert_eq!(plain_february.len(), 28);

    let april = Interval::Monthly.dates(date(2026, 4, 15));
    assert_eq!(april.len(), 30);
    assert_eq!(april[0], date(2026, 4, 1));
    assert_eq!(*april.last().unwrap(), date(2026, 4, 30));
    assert!(contiguous(&april));
}

#[test]
fn quarters_are_three_whole_months() {
    let fourth = Interval::Quarterly.dates(date(2026, 11, 15));
    assert_eq!(fourth.len(), 92);
    assert_eq!(fourth[0], date(2026, 10, 1));
    assert_eq!(*fourth.last().unwrap(), date(2026, 12, 31));
    assert!(contiguous(&fourth));

    // Each month resolves into the quarter that holds it.
    for month in 1..=12 {
        let reference = date(2026, month, 10);
        let quarter = Interval::Quarterly.dates(reference);
        assert!(quarter.contains(&reference));
        assert_eq!(quarter[0].month0() / 3, reference.month0() / 3);
    }
}

#[test]
fn years_run_january_first_through_december_end() {
    let plain = Interval::Yearly.dates(date(2026, 6, 15));
    assert_eq!(plain.len(), 365);
    assert_eq!(plain[0], date(2026, 1, 1));
    assert_eq!(*plain.last().unwrap(), date(2026, 12, 31));

    let leap = Interval::Yearly.dates(date(2024, 6, 15));
    assert_eq!(leap.len(), 366);
    assert!(contiguous(&leap));
}

#[test]
fn consecutive_periods_tile_without_gaps() {
    for interval in [
        Interval::Weekly,
        Interval::Monthly,
        Interval::Quarterly,
        Interval::Yearly,
    ] {
        let mut reference = date(2025, 11, 15);
        for _ in 0..6 {
            let current = interval.dates(reference);
            let next_reference = interval.shift(reference, 1);
            let next = interval.dates(next_reference);
            assert_eq!(
                *current.last().unwrap() + Duration::days(1),
                next[0],
                "{} periods must tile the calendar",
                interval
            );
            reference = next_reference;
        }
    }
}

#[test]
fn boundary_weeks_keep_days_from_both_months() {
    // 2026-04-01 is a Wednesday; its week opens in March.
    let week = Interval::Weekly.dates(date(2026, 4, 1));
    assert_eq!(week[0], date(2026, 3, 29));
    assert_eq!(week[6], date(2026, 4, 4));
    assert_eq!(week.iter().filter(|d| d.month() == 3).count(), 3);
    assert_eq!(week.iter().filter(|d| d.month() == 4).count(), 4);
}

#[test]
fn new_year_week_label_carries_the_ending_year() {
    assert_eq!(
        Interval::Weekly.range_label(date(2025, 12, 30)),
        "Dec 28 - Jan 3, 2026"
    );
}

#[test]
fn navigating_back_from_a_clamped_month_stays_clamped() {
    let end_of_january = date(2026, 1, 31);
    let forward = Interval::Monthly.shift(end_of_january, 1);
    assert_eq!(forward, date(2026, 2, 28));
    // The clamp is not undone on the way back; the period stays correct.
    let back = Interval::Monthly.shift(forward, -1);
    assert_eq!(back, date(2026, 1, 28));
    assert_eq!(Interval::Monthly.dates(back)[0], date(2026, 1, 1));
}

#[test]
fn daily_periods_are_the_reference_itself() {
    let reference = date(2026, 8, 23);
    assert_eq!(Interval::Daily.dates(reference), vec![reference]);
    assert_eq!(Interval::Daily.shift(reference, 1), date(2026, 8, 24));
    assert_eq!(Interval::Daily.shift(reference, -1), date(2026, 8, 22));
}
