use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{LedgrError, Result};
use crate::ledger::settings::Settings;

/// One completed, paid service session. Immutable once recorded; filed under
/// the calendar day it was logged on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceLog {
    pub id: Uuid,
    pub logged_at: DateTime<Utc>,
    pub client_name: String,
    pub service_type: String,
    pub service_start: DateTime<Utc>,
    pub service_end: DateTime<Utc>,
    /// Whole minutes between start and end, rounded down.
    #[serde(default)]
    pub duration_minutes: i64,
    #[serde(default)]
    pub payout_amount: f64,
    /// Tax percentage in force when the log was recorded. Never re-derived
    /// from later settings; historical summaries depend on the snapshot.
    #[serde(default)]
    pub tax_rate_used: f64,
    /// `payout_amount * tax_rate_used / 100`, fixed at creation.
    #[serde(default)]
    pub tax_set_aside: f64,
}

impl ServiceLog {
    /// Records a completed session, deriving the duration and tax snapshot
    /// from the settings in force right now.
    pub fn record(
        client_name: impl Into<String>,
        service_type: impl Into<String>,
        service_start: DateTime<Utc>,
        service_end: DateTime<Utc>,
        payout_amount: f64,
        settings: &Settings,
    ) -> Result<Self> {
        if service_end < service_start {
            return Err(LedgrError::InvalidInput(
                "service end time precedes its start time".into(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            logged_at: Utc::now(),
            client_name: client_name.into(),
            service_type: service_type.into(),
            service_start,
            service_end,
            duration_minutes: (service_end - service_start).num_minutes(),
            payout_amount,
            tax_rate_used: settings.tax_rate,
            tax_set_aside: settings.tax_for(payout_amount),
        })
    }
}

/// A log annotated with its source day, produced while merging across dates.
/// The annotation is not part of the stored record.
#[derive(Debug, Clone, PartialEq)]
pub struct DatedLog {
    pub date: NaiveDate,
    pub log: ServiceLog,
}

impl DatedLog {
    pub fn new(date: NaiveDate, log: ServiceLog) -> Self {
        Self { date, log }
    }
}
