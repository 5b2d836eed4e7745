//! Process-wide logging to stderr.
//!
//! Output goes to stderr so it never mixes with command output (`--output json`
//! stays machine-readable). Initialisation runs at most once per process.

use std::io::stderr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;
use std::time::SystemTime;

use fern::colors::Color::{Blue, Green, Magenta, Red, Yellow};
use fern::colors::ColoredLevelConfig;
use fern::Dispatch;
use humantime::format_rfc3339_seconds;
use log::{debug, warn, LevelFilter, SetLoggerError};

use crate::config::LOG_LEVEL_ENV;

/// Thread-safe initialization guard.
static INIT_LOGGER_ONCE: Once = Once::new();

/// Tracks if logger initialization was already attempted.
static LOGGER_ALREADY_CALLED: AtomicBool = AtomicBool::new(false);

/// Map `-v` repetitions to a level; quiet by default.
pub fn level_from_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// An `OUTRIS_LOG` value, when it names a level, beats the verbosity flag.
pub fn resolve_level(verbose: u8, env_value: Option<&str>) -> LevelFilter {
    env_value
        .and_then(|raw| raw.trim().parse::<LevelFilter>().ok())
        .unwrap_or_else(|| level_from_verbosity(verbose))
}

/// Install the logger. Calling it again logs a warning and returns Ok.
pub fn initialize(verbose: u8) -> Result<(), SetLoggerError> {
    if LOGGER_ALREADY_CALLED.swap(true, Ordering::SeqCst) {
        warn!("Logger already initialized");
        return Ok(());
    }

    let level = resolve_level(verbose, std::env::var(LOG_LEVEL_ENV).ok().as_deref());
    let mut result = Ok(());

    INIT_LOGGER_ONCE.call_once(|| {
        result = initialize_internal(level);
        if result.is_ok() {
            debug!("Logger initialized with level: {level:?}");
        }
    });

    result
}

fn initialize_internal(level: LevelFilter) -> Result<(), SetLoggerError> {
    let colors = ColoredLevelConfig::new()
        .debug(Blue)
        .info(Green)
        .warn(Yellow)
        .error(Red)
        .trace(Magenta);

    Dispatch::new()
        .level(level)
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} {level} {target}] {message}",
                date = format_rfc3339_seconds(SystemTime::now()),
                level = colors.color(record.level()),
                target = record.target(),
                message = message,
            ))
        })
        .chain(stderr())
        .apply()
}
