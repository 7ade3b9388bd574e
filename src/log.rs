// src/log.rs
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

use crate::config::consts::{DEFAULT_LOG_LEVEL, LOG_FILE};

#[doc(hidden)]
pub use tracing;

static START: OnceLock<Instant> = OnceLock::new();

fn start() -> Instant {
    *START.get_or_init(Instant::now)
}

fn fmt_elapsed(ms: u128) -> String {
    let total_ms = ms as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

/// `[hh:mm:ss.mmm]` since the first log line of the process.
struct Elapsed;

impl FormatTime for Elapsed {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "[{}]", fmt_elapsed(start().elapsed().as_millis()))
    }
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Append plain-text log lines to `path`, creating parent dirs as needed.
/// A second install (from any init fn) is silently ignored.
pub fn init_file(path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    start();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_timer(Elapsed)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

/// [`init_file`] at the default debug-log location.
pub fn init() -> io::Result<()> {
    init_file(LOG_FILE)
}

/// Log to stderr instead of a file.
pub fn init_stderr() {
    start();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_timer(Elapsed)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        $crate::log::tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        $crate::log::tracing::debug!($($arg)*)
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        $crate::log::tracing::warn!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        $crate::log::tracing::error!($($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_formats_hours_minutes_seconds_millis() {
        assert_eq!(fmt_elapsed(0), "00:00:00.000");
        assert_eq!(fmt_elapsed(3_723_004), "01:02:03.004");
    }

    #[test]
    fn init_file_creates_parent_dir() {
        let mut dir = std::env::temp_dir();
        dir.push("jarchive_log_init");
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join("nested").join("debug.log");
        init_file(&path).unwrap();
        assert!(path.exists());
        logf!("hello from test");
    }
}
