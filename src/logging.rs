//! File-based structured logging.
//!
//! The terminal belongs to the focus screen, so events go to `stint.log` in the
//! stint directory. `STINT_LOG` takes an `EnvFilter` directive and overrides
//! the level from settings.

use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

pub const LOG_ENV: &str = "STINT_LOG";

/// Build the filter from `STINT_LOG`, falling back to `stint=<level>`
pub fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("stint={}", default_level)))
}

/// Initialize logging to a file. Keep the returned guard alive until exit so
/// buffered lines are written out.
pub fn init_logging(log_file: &Path, default_level: &str) -> io::Result<WorkerGuard> {
    let dir = log_file
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Invalid log file path"))?;
    let name = log_file
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Invalid log file name"))?;

    let appender = tracing_appender::rolling::never(dir, name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_timer(fmt::time::ChronoLocal::rfc_3339())
        .with_writer(writer);

    Registry::default()
        .with(build_filter(default_level))
        .with(fmt_layer)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    Ok(guard)
}
