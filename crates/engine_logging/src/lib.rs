#![deny(missing_docs)]
//! Logging front end for the position scraper crates.
//!
//! Poller, fetcher and store code log through the `engine_*` macros below,
//! which forward to the `log` facade. The process installs its own backend
//! (text or JSON lines with application labels, see `scraper_app`); test
//! binaries call [`initialize_for_tests`] instead.

/// Info: one line per cycle step (query, status, timings, sleep).
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Debug: per-batch detail such as decoded record counts.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Warn: a failure the loop recovers from by itself.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Error: process-level problems outside the poll loop.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Installs a terminal logger for test binaries.
///
/// Debug builds log at debug level so decode counts show up. Later calls
/// no-op once any logger is installed.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
