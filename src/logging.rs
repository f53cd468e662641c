//! Console logger for the relay process.
//!
//! Every pipeline step reports through the `log` facade; this module
//! installs the single backend that prints those records to stdout.

use log::{error, LevelFilter, SetLoggerError};
use std::io::{self, Write};

/// Environment variable selecting the maximum log level.
pub const LOG_LEVEL_ENV: &str = "RELAY_LOG_LEVEL";

// Simple console logger implementation
struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let mut stdout = io::stdout().lock();
            let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
            writeln!(
                stdout,
                "[{}] {} - {}: {}",
                timestamp,
                record.level(),
                record.target(),
                record.args()
            )
            .unwrap_or_else(|e| eprintln!("Failed to write log: {}", e));
        }
    }

    fn flush(&self) {
        io::stdout()
            .flush()
            .unwrap_or_else(|e| error!("Failed to flush stdout: {}", e));
    }
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Initialize the process logger
///
/// Installs the console logger and sets the maximum level. Can only
/// succeed once per process.
pub fn init_logger(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

/// Resolves the log level from a raw `RELAY_LOG_LEVEL` value.
///
/// Unset or unrecognised values fall back to `Info`.
pub fn parse_level(raw: Option<&str>) -> LevelFilter {
    raw.and_then(|value| value.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Reads `RELAY_LOG_LEVEL` from the process environment.
pub fn level_from_env() -> LevelFilter {
    parse_level(std::env::var(LOG_LEVEL_ENV).ok().as_deref())
}
