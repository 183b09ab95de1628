use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use ledgr::core::DayBook;
use ledgr::ledger::{RentFrequency, ServiceLog, Settings};
use ledgr::storage::{AppointmentStore, JsonStorage, LogStore, SettingsStore};
use tempfile::tempdir;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

fn sample_log(client: &str, payout: f64) -> ServiceLog {
    let end = Utc::now();
    ServiceLog::record(
        client,
        "Haircut",
        end - Duration::minutes(45),
        end,
        payout,
        &Settings::default(),
    )
    .expect("valid session")
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.tmp", existing),
        None => String::from("tmp"),
    };
    tmp.set_extension(ext);
    tmp
}

#[test]
fn logs_survive_reopening_the_store() {
    let temp = tempdir().unwrap();
    let day = date(2026, 2, 14);

    {
        let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();
        storage.append_log(day, &sample_log("Ana", 100.0)).unwrap();
        storage.append_log(day, &sample_log("Teo", 60.0)).unwrap();
    }

    let reopened = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();
    let logs = reopened.logs_for_date(day).expect("read day");
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0].client_name, "Ana");
    assert_eq!(logs[1].client_name, "Teo");
    assert!((logs[0].payout_amount - 100.0).abs() < f64::EPSILON);
}

#[test]
fn settings_file_roundtrips_every_choice() {
    let temp = tempdir().unwrap();
    let settings = Settings {
        tax_rate: 32.5,
        rent_amount: 1200.0,
        rent_frequency: RentFrequency::Monthly,
        working_days: 6,
    };

    {
        let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();
        storage.save_settings(&settings).unwrap();
    }

    let reopened = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();
    let loaded = reopened.load_settings().unwrap().expect("settings present");
    assert_eq!(loaded, settings);
}

#[test]
fn schedule_reopens_with_timed_slots_before_walk_ins() {
    let temp = tempdir().unwrap();
    let day = date(2026, 2, 16);

    {
        let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();
        let book = DayBook::new(Box::new(storage));
        book.book(day, "Walk-in", "Other", None).unwrap();
        book.book(day, "Ana", "Color", Some(time(9, 30))).unwrap();
        book.book(day, "Teo", "Haircut", Some(time(8, 0))).unwrap();
    }

    let reopened = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();
    let schedule = reopened.appointments_for_date(day).expect("read schedule");
    let names: Vec<&str> = schedule
        .iter()
        .map(|appointment| appointment.client_name.as_str())
        .collect();
    assert_eq!(names, ["Teo", "Ana", "Walk-in"]);
}

#[test]
fn day_files_stay_isolated_per_date() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();

    storage
        .append_log(date(2026, 3, 2), &sample_log("Ana", 80.0))
        .unwrap();
    storage
        .append_log(date(2026, 3, 3), &sample_log("Teo", 90.0))
        .unwrap();

    assert!(storage.log_path(date(2026, 3, 2)).exists());
    assert!(storage.log_path(date(2026, 3, 3)).exists());

    let monday = storage.logs_for_date(date(2026, 3, 2)).unwrap();
    assert_eq!(monday.len(), 1);
    assert_eq!(monday[0].client_name, "Ana");
}

#[test]
fn interrupted_writes_never_corrupt_the_previous_day() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();
    let day = date(2026, 3, 4);

    storage.append_log(day, &sample_log("Ana", 100.0)).unwrap();
    let path = storage.log_path(day);
    let original = fs::read_to_string(&path).expect("read original file");

    // A directory squatting on the temp file name forces the write to fail
    // before the rename, so the day file on disk must stay untouched.
    let tmp = tmp_path_for(&path);
    fs::create_dir_all(&tmp).unwrap();

    let result = storage.append_log(day, &sample_log("Teo", 60.0));
    assert!(result.is_err(), "append must fail when the temp path is taken");

    let current = fs::read_to_string(&path).expect("read after failure");
    assert_eq!(current, original);

    let _ = fs::remove_dir_all(&tmp);
}

#[test]
fn writes_leave_no_temp_files_behind() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();

    for day in 1..=5 {
        let when = date(2026, 6, day);
        storage.append_log(when, &sample_log("Ana", 50.0)).unwrap();
        storage
            .save_appointments(when, &[ledgr::ledger::Appointment::new("Teo", "Shave", None)])
            .unwrap();
    }
    storage.save_settings(&Settings::default()).unwrap();

    for subdir in ["logs", "appointments"] {
        let entries = fs::read_dir(storage.base_dir().join(subdir)).unwrap();
        for entry in entries {
            let name = entry.unwrap().file_name();
            let name = name.to_string_lossy();
            assert!(!name.ends_with(".tmp"), "leftover temp file: {}", name);
        }
    }
}

#[test]
fn older_day_files_without_derived_fields_still_load() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();
    let day = date(2026, 1, 9);

    // Derived amounts were added after the first release; files written
    // before then carry neither them nor any later additions.
    let aged = r#"[{
        "id": "7b1d7f5e-0d3a-4a57-9f26-3d9be61c2a11",
        "logged_at": "2026-01-09T18:00:00Z",
        "client_name": "Ana",
        "service_type": "Haircut",
        "service_start": "2026-01-09T17:00:00Z",
        "service_end": "2026-01-09T18:00:00Z",
        "payout_amount": 75.0,
        "mood": "cheerful"
    }]"#;
    fs::write(storage.log_path(day), aged).unwrap();

    let logs = storage.logs_for_date(day).expect("aged file loads");
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].client_name, "Ana");
    assert!((logs[0].payout_amount - 75.0).abs() < f64::EPSILON);
    assert_eq!(logs[0].duration_minutes, 0);
    assert_eq!(logs[0].tax_set_aside, 0.0);
}
