//! Verbose diagnostics.
//!
//! Off by default. When enabled, `vlog!` lines go to the log file if one was opened with
//! [`init_log_file`], otherwise to stderr. Solutions are never written here.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

static VERBOSE_LOGGING: AtomicBool = AtomicBool::new(false);

static LOG_FILE: Mutex<Option<std::fs::File>> = Mutex::new(None);

/// Open (truncating) `path` as the destination for verbose lines.
pub fn init_log_file(path: &Path) -> std::io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;

    if let Ok(mut log_file) = LOG_FILE.lock() {
        *log_file = Some(file);
    }
    Ok(())
}

pub fn write_log(message: &str) {
    if let Ok(mut log_file) = LOG_FILE.lock() {
        if let Some(file) = log_file.as_mut() {
            let _ = writeln!(file, "{message}");
            let _ = file.flush();
            return;
        }
    }
    eprintln!("{message}");
}

pub fn enable_verbose_logging() {
    VERBOSE_LOGGING.store(true, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE_LOGGING.load(Ordering::Relaxed)
}

/// Verbose-only log line; formatting is skipped entirely when verbose logging is off.
#[macro_export]
macro_rules! vlog {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            let message = format!($($arg)*);
            $crate::logging::write_log(&message);
        }
    };
}
