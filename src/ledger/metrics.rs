use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::ledger::service_log::{DatedLog, ServiceLog};
use crate::ledger::settings::Settings;

/// Derived financial summary for a set of logs. Recomputed per view, never
/// persisted. All amounts are finite; divisions are guarded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AggregateMetrics {
    pub total_revenue: f64,
    pub total_service_hours: f64,
    pub money_per_hour: f64,
    pub total_tax_set_aside: f64,
    /// Rent attributed to one working day under the current settings.
    pub daily_rent: f64,
    /// `daily_rent * days_worked`; the rent share actually charged in view.
    pub rent_contribution: f64,
    pub total_set_asides: f64,
    /// Revenue minus every set-aside: the true-net-income figure.
    pub net_income: f64,
    /// Distinct dates contributing at least one log.
    pub days_worked: usize,
    pub logs: Vec<DatedLog>,
}

/// Reduces date-tagged logs and settings into the full metrics record.
///
/// Total function: absent settings or an empty log list produce the all-zero
/// record instead of an error, and every denominator is guarded. A day's rent
/// is charged once per distinct date present among the logs, so a single-date
/// list degenerates to the dashboard's one-day rule.
pub fn compute(logs: Vec<DatedLog>, settings: Option<&Settings>) -> AggregateMetrics {
    let Some(settings) = settings else {
        return AggregateMetrics::default();
    };
    if logs.is_empty() {
        return AggregateMetrics::default();
    }

    let total_revenue: f64 = logs.iter().map(|entry| entry.log.payout_amount).sum();
    let total_minutes: i64 = logs.iter().map(|entry| entry.log.duration_minutes).sum();
    let total_service_hours = total_minutes as f64 / 60.0;
    let money_per_hour = if total_service_hours > 0.0 {
        total_revenue / total_service_hours
    } else {
        0.0
    };
    let total_tax_set_aside: f64 = logs.iter().map(|entry| entry.log.tax_set_aside).sum();
    let daily_rent = settings.daily_rent();

    let days_worked = logs
        .iter()
        .map(|entry| entry.date)
        .collect::<BTreeSet<NaiveDate>>()
        .len();
    let rent_contribution = daily_rent * days_worked as f64;
    let total_set_asides = total_tax_set_aside + rent_contribution;
    let net_income = total_revenue - total_set_asides;

    AggregateMetrics {
        total_revenue,
        total_service_hours,
        money_per_hour,
        total_tax_set_aside,
        daily_rent,
        rent_contribution,
        total_set_asides,
        net_income,
        days_worked,
        logs,
    }
}

/// Dashboard variant: tags a single day's raw logs with that date and runs the
/// shared formula set, charging exactly one day's rent however many logs the
/// day holds.
pub fn compute_today(
    date: NaiveDate,
    logs: Vec<ServiceLog>,
    settings: Option<&Settings>,
) -> AggregateMetrics {
    let dated = logs
        .into_iter()
        .map(|log| DatedLog::new(date, log))
        .collect();
    compute(dated, settings)
}
