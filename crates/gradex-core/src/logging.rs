//! Logging setup.
//!
//! The TUI owns stdout and stderr, so logs go to a daily-rolling file under
//! ${GRADEX_HOME}/logs instead. The returned guard must be kept alive for
//! the duration of the program; dropping it flushes buffered log lines.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber with a file writer.
///
/// The filter comes from the `GRADEX_LOG` environment variable when set,
/// falling back to `default_filter` (normally the configured log level).
/// Calling this twice is harmless; the second call leaves the first
/// subscriber in place.
pub fn init_logging(default_filter: &str) -> Result<WorkerGuard> {
    let log_dir = crate::config::paths::logs_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("create log directory {}", log_dir.display()))?;

    let appender = tracing_appender::rolling::daily(&log_dir, "gradex.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env("GRADEX_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init();

    Ok(guard)
}
