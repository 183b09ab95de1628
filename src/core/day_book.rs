use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use tracing::warn;

use crate::core::aggregator;
use crate::errors::{LedgrError, Result};
use crate::ledger::{
    sort_schedule, AggregateMetrics, Appointment, Interval, ServiceLog, Settings,
};
use crate::storage::{JsonStorage, StorageBackend};

/// Facade that coordinates settings, the day-by-day service logs, and the
/// appointment schedule behind one storage backend.
pub struct DayBook {
    settings: Option<Settings>,
    storage: Box<dyn StorageBackend>,
}

impl DayBook {
    pub fn new(storage: Box<dyn StorageBackend>) -> Self {
        Self {
            settings: None,
            storage,
        }
    }

    /// Opens the default on-disk store and primes the settings cache.
    pub fn open_default() -> Result<Self> {
        let storage = JsonStorage::new_default()?;
        let mut book = Self::new(Box::new(storage));
        book.reload_settings();
        Ok(book)
    }

    pub fn settings(&self) -> Option<&Settings> {
        self.settings.as_ref()
    }

    /// Re-reads settings from the store. A missing file leaves the book
    /// unconfigured; an unreadable one is reported and treated the same way.
    pub fn reload_settings(&mut self) {
        self.settings = match self.storage.load_settings() {
            Ok(settings) => settings,
            Err(err) => {
                warn!("falling back to unconfigured settings: {}", err);
                None
            }
        };
    }

    pub fn update_settings(&mut self, settings: Settings) -> Result<()> {
        self.storage.save_settings(&settings)?;
        self.settings = Some(settings);
        Ok(())
    }

    /// Records a finished session against `date` and returns the stored log.
    /// Requires configured settings so the tax snapshot is meaningful.
    pub fn log_service(
        &self,
        date: NaiveDate,
        client_name: &str,
        service_type: &str,
        service_start: DateTime<Utc>,
        service_end: DateTime<Utc>,
        payout_amount: f64,
    ) -> Result<ServiceLog> {
        let settings = self
            .settings
            .as_ref()
            .ok_or(LedgrError::SettingsNotConfigured)?;
        let log = ServiceLog::record(
            client_name,
            service_type,
            service_start,
            service_end,
            payout_amount,
            settings,
        )?;
        self.storage.append_log(date, &log)?;
        Ok(log)
    }

    /// The day's schedule in display order: timed slots first, walk-ins last.
    pub fn schedule_for(&self, date: NaiveDate) -> Result<Vec<Appointment>> {
        self.storage.appointments_for_date(date)
    }

    pub fn book(
        &self,
        date: NaiveDate,
        client_name: &str,
        service_type: &str,
        scheduled_time: Option<NaiveTime>,
    ) -> Result<Appointment> {
        let mut day = self.storage.appointments_for_date(date)?;
        let appointment = Appointment::new(client_name, service_type, scheduled_time);
        day.push(appointment.clone());
        sort_schedule(&mut day);
        self.storage.save_appointments(date, &day)?;
        Ok(appointment)
    }

    /// Removes the appointment at `index` (zero-based, in schedule order)
    /// and returns it.
    pub fn cancel(&self, date: NaiveDate, index: usize) -> Result<Appointment> {
        let mut day = self.storage.appointments_for_date(date)?;
        if index >= day.len() {
            return Err(LedgrError::AppointmentNotFound(format!("#{}", index + 1)));
        }
        let removed = day.remove(index);
        self.storage.save_appointments(date, &day)?;
        Ok(removed)
    }

    /// Flags the appointment at `index` as completed and returns the update.
    pub fn complete_appointment(&self, date: NaiveDate, index: usize) -> Result<Appointment> {
        let mut day = self.storage.appointments_for_date(date)?;
        let slot = day
            .get_mut(index)
            .ok_or_else(|| LedgrError::AppointmentNotFound(format!("#{}", index + 1)))?;
        slot.completed = true;
        let updated = slot.clone();
        self.storage.save_appointments(date, &day)?;
        Ok(updated)
    }

    /// Single-day summary for the dashboard.
    pub fn today_metrics(&self, date: NaiveDate) -> AggregateMetrics {
        self.period_metrics(Interval::Daily, date)
    }

    /// Summary for the period of `interval` that contains `reference`.
    pub fn period_metrics(&self, interval: Interval, reference: NaiveDate) -> AggregateMetrics {
        aggregator::historical_metrics(
            interval,
            reference,
            self.settings.as_ref(),
            self.storage.as_ref(),
        )
    }
}
