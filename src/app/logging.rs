use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Local};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber: console on stderr plus a per-run log file
/// in `log_dir`. Returns the log file path.
///
/// The level defaults to `info` and can be overridden with `RUST_LOG`.
pub fn init(log_dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(log_dir)?;
    let path = log_dir.join(log_file_name(Local::now()));
    let file = File::create(&path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();

    Ok(path)
}

/// `downloader_<YYYYMMDD_HHMMSS>.log`
pub fn log_file_name(at: DateTime<Local>) -> String {
    format!("downloader_{}.log", at.format("%Y%m%d_%H%M%S"))
}
