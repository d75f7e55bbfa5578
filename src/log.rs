// src/log.rs
//
// File logging through `tracing`. The short macros below are what the rest of
// the crate uses; `init` decides where the events end up.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use tracing_subscriber::EnvFilter;

use crate::config::consts::{LOG_FILE, DEFAULT_LOG_FILTER};

static INIT: OnceLock<()> = OnceLock::new();

/// Install the global subscriber, appending to `.store/debug.log`.
/// Safe to call more than once; only the first call does anything.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        let path = Path::new(LOG_FILE);
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(false);

        // No log file is not fatal; fall back to stderr.
        let _ = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => builder.with_writer(Mutex::new(file)).try_init(),
            Err(_) => builder.with_writer(std::io::stderr).try_init(),
        };
    });
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        ::tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        ::tracing::error!($($arg)*)
    };
}
