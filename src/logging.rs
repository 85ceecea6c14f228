#![cfg(feature = "std")]

use std::env;
use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Environment variable holding the log level for this crate.
pub const LOG_ENV: &str = "BROADSIDE_LOG";

/// Records from other crates (tokio and friends) pass only at this level.
const FOREIGN_LEVEL: Level = Level::Warn;

struct StderrLogger {
    started: OnceLock<Instant>,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if metadata.level() > log::max_level() {
            return false;
        }
        is_own(metadata.target()) || metadata.level() <= FOREIGN_LEVEL
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = self.started.get_or_init(Instant::now).elapsed();
        let _ = writeln!(
            std::io::stderr().lock(),
            "{:>8.3}s {:<5} [{}] {}",
            elapsed.as_secs_f64(),
            record.level(),
            record.module_path().unwrap_or(record.target()),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: StderrLogger = StderrLogger {
    started: OnceLock::new(),
};

fn is_own(target: &str) -> bool {
    target == env!("CARGO_CRATE_NAME") || target.starts_with(concat!(env!("CARGO_CRATE_NAME"), "::"))
}

/// Level named by `value` (`off`, `error` ... `trace`, any case), or `info`
/// when it is missing or unrecognised.
pub fn level_from(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|lvl| lvl.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Install the stderr logger with its level read from [`LOG_ENV`]. Calling it
/// again keeps the first logger.
pub fn init_logging() {
    let level = level_from(env::var(LOG_ENV).ok().as_deref());
    LOGGER.started.get_or_init(Instant::now);
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level));
}
