use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Serialize};

use crate::core::utils::{app_data_dir, ensure_dir};
use crate::errors::{LedgrError, Result};
use crate::ledger::{Appointment, ServiceLog, Settings};

use super::{AppointmentStore, LogStore, SettingsStore};

const LOGS_DIR: &str = "logs";
const APPOINTMENTS_DIR: &str = "appointments";
const SETTINGS_FILE: &str = "settings.json";
const TMP_SUFFIX: &str = "tmp";
const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// JSON-file persistence rooted at the application data directory: one file
/// per day for logs and for appointments, plus the singleton settings file.
/// Writes go through a temp file and rename so a crash never leaves a
/// half-written day on disk.
#[derive(Clone)]
pub struct JsonStorage {
    root: PathBuf,
    logs_dir: PathBuf,
    appointments_dir: PathBuf,
    settings_file: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(app_data_dir);
        ensure_dir(&root)?;
        let logs_dir = root.join(LOGS_DIR);
        let appointments_dir = root.join(APPOINTMENTS_DIR);
        ensure_dir(&logs_dir)?;
        ensure_dir(&appointments_dir)?;
        let settings_file = root.join(SETTINGS_FILE);
        Ok(Self {
            root,
            logs_dir,
            appointments_dir,
            settings_file,
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn log_path(&self, date: NaiveDate) -> PathBuf {
        self.logs_dir.join(day_file_name(date))
    }

    pub fn appointment_path(&self, date: NaiveDate) -> PathBuf {
        self.appointments_dir.join(day_file_name(date))
    }

    fn read_day_file<T: DeserializeOwned>(&self, path: &Path) -> Result<Vec<T>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(path)?;
        let records = serde_json::from_str(&data).map_err(|err| {
            LedgrError::StorageError(format!(
                "malformed day file `{}`: {}",
                path.display(),
                err
            ))
        })?;
        Ok(records)
    }

    fn write_day_file<T: Serialize>(&self, path: &Path, records: &[T]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        write_atomic(path, &json)
    }
}

impl LogStore for JsonStorage {
    fn logs_for_date(&self, date: NaiveDate) -> Result<Vec<ServiceLog>> {
        self.read_day_file(&self.log_path(date))
    }

    fn append_log(&self, date: NaiveDate, log: &ServiceLog) -> Result<()> {
        let path = self.log_path(date);
        let mut logs: Vec<ServiceLog> = self.read_day_file(&path)?;
        logs.push(log.clone());
        self.write_day_file(&path, &logs)
    }
}

impl SettingsStore for JsonStorage {
    fn load_settings(&self) -> Result<Option<Settings>> {
        if !self.settings_file.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.settings_file)?;
        let settings = serde_json::from_str(&data).map_err(|err| {
            LedgrError::StorageError(format!("malformed settings file: {}", err))
        })?;
        Ok(Some(settings))
    }

    fn save_settings(&self, settings: &Settings) -> Result<()> {
        let json = serde_json::to_string_pretty(settings)?;
        write_atomic(&self.settings_file, &json)
    }
}

impl AppointmentStore for JsonStorage {
    fn appointments_for_date(&self, date: NaiveDate) -> Result<Vec<Appointment>> {
        self.read_day_file(&self.appointment_path(date))
    }

    fn save_appointments(&self, date: NaiveDate, appointments: &[Appointment]) -> Result<()> {
        self.write_day_file(&self.appointment_path(date), appointments)
    }
}

fn day_file_name(date: NaiveDate) -> String {
    format!("{}.json", date.format(DAY_KEY_FORMAT))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Writes through a sibling temp file and renames it into place, so readers
/// only ever see the previous complete payload or the new one.
fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}
