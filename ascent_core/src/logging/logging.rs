// ascent_core/src/logging/logging.rs
use crate::error::AscentResult;
use crate::storage::core_storage::app_dir;
use flexi_logger::*;
use log::Record;
use once_cell::sync::Lazy;
use std::io::*;
use std::sync::Mutex;

// Most recent on-screen message, shown by the kiosk status line.
pub static LAST_LOG: Lazy<Mutex<String>> = Lazy::new(|| Mutex::new(String::new()));

/// Logs a message and keeps it as the current on-screen message.
#[macro_export]
macro_rules! onscreen_log {
    ($lvl:expr, $($arg:tt)*) => {{
        println!($($arg)*);
        log::log!($lvl, $($arg)*);
        if let Ok(mut buf) = $crate::logging::logging::LAST_LOG.lock() {
            *buf = format!($($arg)*);
        }
    }};
}

/// Helper macro that allow logs to be displayed by the program.
#[macro_export]
macro_rules! onscreen_info  { ($($arg:tt)*) => { $crate::onscreen_log!(log::Level::Info,  $($arg)*) }; }

/// Helper macro that allow logs to be displayed by the program.
#[macro_export]
macro_rules! onscreen_warn  { ($($arg:tt)*) => { $crate::onscreen_log!(log::Level::Warn,  $($arg)*) }; }

/// Helper macro that allow logs to be displayed by the program.
#[macro_export]
macro_rules! onscreen_error { ($($arg:tt)*) => { $crate::onscreen_log!(log::Level::Error, $($arg)*) }; }

/// Helper macro that allow logs to be displayed by the program.
#[macro_export]
macro_rules! onscreen_debug { ($($arg:tt)*) => { $crate::onscreen_log!(log::Level::Debug, $($arg)*) }; }

/// The latest on-screen message.
pub fn last_log() -> String {
    LAST_LOG.lock().map(|buf| buf.clone()).unwrap_or_default()
}

/// Starts the rotating file logger.
/// Keep the handle alive for as long as logs should be written.
pub fn init_file_logger(level: &str, basename: &str) -> AscentResult<LoggerHandle> {
    let log_dir = app_dir().join("logs");

    let file_spec = FileSpec::default()
        .directory(&log_dir)
        .basename(basename)
        .suffix("log");

    let handle = Logger::try_with_str(level)?
        .log_to_file(file_spec)
        .format(ascent_formatter)
        .rotate(
            Criterion::Size(5_000_000),
            Naming::Numbers,
            Cleanup::KeepLogFiles(5),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .start()?;

    crate::onscreen_info!("Log dir: {}.", &log_dir.display());
    Ok(handle)
}

fn ascent_formatter(write: &mut dyn Write, now: &mut DeferredNow, record: &Record) -> Result<()> {
    write!(
        write,
        "{} {:5} [{}] {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        record.module_path().unwrap_or("<unknown>"),
        &record.args()
    )
}
