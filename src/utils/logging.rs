//! Logging macros gated by a module-level `ENABLE_LOGS` flag.
//!
//! Modules that log on every store mutation opt in explicitly:
//! ```rust,ignore
//! const ENABLE_LOGS: bool = true;
//!
//! use crate::{log_info, log_warn, log_error};
//!
//! log_info!("loaded {} dosages", count);
//! ```
//!
//! Setting the flag to `false` silences the module without touching `RUST_LOG`.

/// Emit at `$level` when the calling module's `ENABLE_LOGS` is true.
#[doc(hidden)]
#[macro_export]
macro_rules! log_gated {
    ($level:expr, $($arg:tt)*) => {
        if ENABLE_LOGS {
            log::log!($level, $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => { $crate::log_gated!(log::Level::Info, $($arg)*) };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::log_gated!(log::Level::Warn, $($arg)*) };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => { $crate::log_gated!(log::Level::Error, $($arg)*) };
}

/// Initialize the `env_logger` backend (reads `RUST_LOG`, defaults to info).
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init();
}
