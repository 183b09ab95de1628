use std::sync::Mutex;

use ledgr::{core::DayBook, storage::JsonStorage};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated book backed by a unique directory for each test.
/// The returned storage handle shares the same files as the book.
pub fn setup_day_book() -> (DayBook, JsonStorage) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let storage = JsonStorage::new(Some(base)).expect("create json storage backend");
    let book = DayBook::new(Box::new(storage.clone()));
    (book, storage)
}
