//! Domain models for the day book: settings, service logs, appointments, and
//! the period math driving every summary view.

pub mod appointment;
pub mod interval;
pub mod metrics;
pub mod service_log;
pub mod settings;

pub use appointment::{sort_schedule, Appointment, SERVICE_TYPES};
pub use interval::Interval;
pub use metrics::{compute, compute_today, AggregateMetrics};
pub use service_log::{DatedLog, ServiceLog};
pub use settings::{RentFrequency, Settings, WEEKS_PER_MONTH};
