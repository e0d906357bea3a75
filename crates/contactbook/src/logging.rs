//! Logging configuration for contactbook.
//!
//! This module provides initialization and configuration for the tracing-based
//! logging system used throughout contactbook.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Verbosity level for logging output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Suppress all output except errors.
    Quiet,
    /// Warnings and above; the contact listing stays readable.
    #[default]
    Normal,
    /// Informational events for every mutation.
    Verbose,
    /// Everything, including per-file load/save details.
    Trace,
}

impl Verbosity {
    /// The most verbose level shown for this verbosity.
    #[must_use]
    pub fn level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::INFO,
            Self::Trace => Level::TRACE,
        }
    }
}

/// Target prefix shared by every event this crate emits.
const LOG_TARGET: &str = "contactbook";

fn default_directive(level: Level) -> String {
    format!("{LOG_TARGET}={level}")
}

/// `RUST_LOG` if set, otherwise this crate's events at `level`.
fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(level)))
}

/// Initialize the logging system.
///
/// This should be called once at application startup. The logging level can be
/// controlled via:
/// 1. The `verbosity` parameter
/// 2. The `RUST_LOG` environment variable (takes precedence)
///
/// Log output goes to stderr so it never mixes with listings on stdout.
///
/// # Examples
///
/// ```no_run
/// use contactbook::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::Verbose);
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let subscriber = tracing_subscriber::registry()
        .with(env_filter(verbosity.level()))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false),
        );

    // Install the subscriber (ignore error if already set)
    let _ = subscriber.try_init();
}

/// Route load/save events to the test harness output.
///
/// Called by the file-backed tests; shown only for failing tests or with
/// `--nocapture`.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(Level::DEBUG))
        .with_test_writer()
        .try_init();
}
