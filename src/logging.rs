#![cfg(feature = "std")]

use std::env;

use log::{LevelFilter, Metadata, Record};

/// Environment variable holding the log level (`error` … `trace`, or `off`).
pub const LOG_ENV: &str = "TICTACTOE_LOG";

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Install the stderr logger with the level from `TICTACTOE_LOG`, `info` by default.
///
/// Calling it again is harmless; the first logger stays installed.
pub fn init_logging() {
    init_logging_with(LevelFilter::Info);
}

/// Same as [`init_logging`] with a different fallback level.
pub fn init_logging_with(default: LevelFilter) {
    let level = env::var(LOG_ENV)
        .ok()
        .and_then(|lvl| lvl.parse().ok())
        .unwrap_or(default);
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level));
}
