//! Coordination layer: period aggregation and the day-book facade that ties
//! settings, logs, and the schedule to a storage backend.

pub mod aggregator;
pub mod build_info;
pub mod day_book;
pub mod utils;

pub use aggregator::{collect_logs, historical_metrics};
pub use day_book::DayBook;
