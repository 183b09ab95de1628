use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for the domain and storage layers.
#[derive(Error, Debug)]
pub enum LedgrError {
    #[error("Settings not configured")]
    SettingsNotConfigured,
    #[error("Appointment not found: {0}")]
    AppointmentNotFound(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = StdResult<T, LedgrError>;

impl From<std::io::Error> for LedgrError {
    fn from(err: std::io::Error) -> Self {
        LedgrError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for LedgrError {
    fn from(err: serde_json::Error) -> Self {
        LedgrError::StorageError(err.to_string())
    }
}
