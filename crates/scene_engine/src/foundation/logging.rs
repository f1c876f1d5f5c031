//! Logging setup
//!
//! The library only talks to the `log` facade. Binaries call [`init`] once at
//! startup; `RUST_LOG` still takes precedence per module.

pub use log::{debug, info, warn, error, trace};

use crate::config::LoggingConfig;

/// Initialize the logging system from a logging config
///
/// Safe to call more than once; later calls are ignored.
pub fn init(config: &LoggingConfig) {
    let result = env_logger::Builder::from_default_env()
        .filter_level(config.level_filter())
        .format_timestamp(None)
        .is_test(config.is_test)
        .try_init();

    if result.is_err() {
        log::trace!("Logger already initialized");
    }
}
