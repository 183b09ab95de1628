pub mod json_backend;

use chrono::NaiveDate;

use crate::errors::Result;
use crate::ledger::{Appointment, ServiceLog, Settings};

/// Read/write access to the per-day service log files. Missing days read as
/// empty lists; a malformed day file is an error the caller may downgrade.
pub trait LogStore: Send + Sync {
    fn logs_for_date(&self, date: NaiveDate) -> Result<Vec<ServiceLog>>;
    fn append_log(&self, date: NaiveDate, log: &ServiceLog) -> Result<()>;
}

/// Access to the singleton settings record. Absent is not an error.
pub trait SettingsStore: Send + Sync {
    fn load_settings(&self) -> Result<Option<Settings>>;
    fn save_settings(&self, settings: &Settings) -> Result<()>;
}

/// Read/write access to the per-day appointment books.
pub trait AppointmentStore: Send + Sync {
    fn appointments_for_date(&self, date: NaiveDate) -> Result<Vec<Appointment>>;
    fn save_appointments(&self, date: NaiveDate, appointments: &[Appointment]) -> Result<()>;
}

/// Full persistence surface the application runs on. Blanket-implemented so
/// any backend covering the three stores qualifies.
pub trait StorageBackend: LogStore + SettingsStore + AppointmentStore {}

impl<T: LogStore + SettingsStore + AppointmentStore> StorageBackend for T {}

pub use json_backend::JsonStorage;
