use chrono::NaiveDate;
use tracing::warn;

use crate::ledger::{compute, AggregateMetrics, DatedLog, Interval, Settings};
use crate::storage::LogStore;

/// Merges per-day logs across `dates` into one flat, date-tagged list.
///
/// Dates are visited in the order given; within a day the store's order is
/// preserved and nothing is deduplicated. A failing read (for instance a
/// corrupt day file) contributes no logs for that date and is reported at
/// warn level; partial data beats no result.
pub fn collect_logs<S>(dates: &[NaiveDate], store: &S) -> Vec<DatedLog>
where
    S: LogStore + ?Sized,
{
    let mut merged = Vec::new();
    for &date in dates {
        match store.logs_for_date(date) {
            Ok(logs) => merged.extend(logs.into_iter().map(|log| DatedLog::new(date, log))),
            Err(err) => warn!("skipping unreadable logs for {}: {}", date, err),
        }
    }
    merged
}

/// Resolves the period containing `reference`, merges its logs, and reduces
/// them with `settings` into the full metrics record.
pub fn historical_metrics<S>(
    interval: Interval,
    reference: NaiveDate,
    settings: Option<&Settings>,
    store: &S,
) -> AggregateMetrics
where
    S: LogStore + ?Sized,
{
    let dates = interval.dates(reference);
    let logs = collect_logs(&dates, store);
    compute(logs, settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use chrono::{Duration, Utc};

    use crate::errors::{LedgrError, Result};
    use crate::ledger::ServiceLog;

    struct StubStore {
        days: HashMap<NaiveDate, Vec<ServiceLog>>,
        broken: Option<NaiveDate>,
    }

    impl StubStore {
        fn new() -> Self {
            Self {
                days: HashMap::new(),
                broken: None,
            }
        }

        fn with_day(mut self, date: NaiveDate, logs: Vec<ServiceLog>) -> Self {
            self.days.insert(date, logs);
            self
        }

        fn with_broken_day(mut self, date: NaiveDate) -> Self {
            self.broken = Some(date);
            self
        }
    }

    impl LogStore for StubStore {
        fn logs_for_date(&self, date: NaiveDate) -> Result<Vec<ServiceLog>> {
            if self.broken == Some(date) {
                return Err(LedgrError::StorageError("malformed day file".into()));
            }
            Ok(self.days.get(&date).cloned().unwrap_or_default())
        }

        fn append_log(&self, _date: NaiveDate, _log: &ServiceLog) -> Result<()> {
            unreachable!("aggregation never writes")
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn session(client: &str, payout: f64) -> ServiceLog {
        let start = Utc::now();
        ServiceLog::record(
            client,
            "Haircut",
            start,
            start + Duration::minutes(45),
            payout,
            &Settings::default(),
        )
        .expect("valid session")
    }

    #[test]
    fn merges_in_date_order_and_tags_sources() {
        let monday = date(2026, 1, 5);
        let tuesday = date(2026, 1, 6);
        let store = StubStore::new()
            .with_day(tuesday, vec![session("Late", 80.0)])
            .with_day(monday, vec![session("Early A", 40.0), session("Early B", 50.0)]);

        let merged = collect_logs(&[monday, tuesday], &store);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].date, monday);
        assert_eq!(merged[0].log.client_name, "Early A");
        assert_eq!(merged[1].log.client_name, "Early B");
        assert_eq!(merged[2].date, tuesday);
    }

    #[test]
    fn empty_days_contribute_nothing() {
        let store = StubStore::new().with_day(date(2026, 1, 5), vec![session("Only", 40.0)]);
        let merged = collect_logs(
            &[date(2026, 1, 4), date(2026, 1, 5), date(2026, 1, 6)],
            &store,
        );
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn broken_day_is_skipped_without_failing() {
        let good = date(2026, 1, 5);
        let bad = date(2026, 1, 6);
        let store = StubStore::new()
            .with_day(good, vec![session("Kept", 40.0)])
            .with_broken_day(bad);

        let merged = collect_logs(&[good, bad], &store);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].log.client_name, "Kept");
    }

    #[test]
    fn historical_metrics_span_the_resolved_week() {
        // 2026-01-04 through 2026-01-10 is the Sunday-started week around the 5th.
        let store = StubStore::new()
            .with_day(date(2026, 1, 5), vec![session("In range", 100.0)])
            .with_day(date(2026, 1, 11), vec![session("Next week", 999.0)]);

        let settings = Settings::default();
        let metrics =
            historical_metrics(Interval::Weekly, date(2026, 1, 5), Some(&settings), &store);
        assert!((metrics.total_revenue - 100.0).abs() < 1e-9);
        assert_eq!(metrics.days_worked, 1);
    }

    #[test]
    fn unconfigured_settings_zero_the_summary() {
        let store = StubStore::new().with_day(date(2026, 1, 5), vec![session("Ana", 100.0)]);
        let metrics = historical_metrics(Interval::Daily, date(2026, 1, 5), None, &store);
        assert_eq!(metrics, AggregateMetrics::default());
    }
}
