/*!

Logging for the simulation. The `log` facade macros are re-exported here so model code only
ever imports `crate::log::*`. Output goes through a `log4rs` console appender that is
installed on the first call to [`enable_logging`] or [`set_log_level`].

Logging is off until one of those is called. Calling them again swaps the configuration on the
existing `log4rs` handle; the global logger can only be installed once per process.

*/

pub use log::{debug, error, info, trace, warn, LevelFilter};

use crate::error::SpreadError;
use log4rs::{
    append::console::ConsoleAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    Handle,
};
use std::sync::Mutex;

const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;
const DEFAULT_LOG_PATTERN: &str = "{h({l})} {M}: {m}{n}";
const CONSOLE_APPENDER: &str = "stdout";

static LOG_HANDLE: Mutex<Option<Handle>> = Mutex::new(None);

/// Turns on console logging at the default level (`Info`).
pub fn enable_logging() -> Result<(), SpreadError> {
    set_log_level(DEFAULT_LOG_LEVEL)
}

/// Turns console logging off. The logger stays installed.
pub fn disable_logging() -> Result<(), SpreadError> {
    set_log_level(LevelFilter::Off)
}

/// Sets the maximum level that reaches the console.
pub fn set_log_level(level: LevelFilter) -> Result<(), SpreadError> {
    let config = build_config(level)?;
    let mut guard = LOG_HANDLE.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    match guard.as_ref() {
        Some(handle) => handle.set_config(config),
        None => {
            let handle = log4rs::init_config(config)
                .map_err(|e| SpreadError::Logging(e.to_string()))?;
            *guard = Some(handle);
        }
    }
    trace!("log level set to {level}");
    Ok(())
}

fn build_config(level: LevelFilter) -> Result<Config, SpreadError> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(DEFAULT_LOG_PATTERN)))
        .build();

    Config::builder()
        .appender(Appender::builder().build(CONSOLE_APPENDER, Box::new(stdout)))
        .build(Root::builder().appender(CONSOLE_APPENDER).build(level))
        .map_err(|e| SpreadError::Logging(e.to_string()))
}
