use std::{env, fs, io, path::Path, path::PathBuf, sync::Once};

use dirs::home_dir;

const DEFAULT_DIR_NAME: &str = ".ledgr";

static TRACING_INIT: Once = Once::new();

/// Returns the application data directory, defaulting to `~/.ledgr` and
/// honoring the `LEDGR_HOME` override.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("LEDGR_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Creates `path` and any missing parents.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}

/// Initializes the global tracing subscriber. `RUST_LOG` controls the filter;
/// without it only `ledgr` events at info and above are emitted.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ledgr=info"));

        fmt().with_env_filter(filter).init();
    });
}
