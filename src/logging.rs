//! Logging initialization
//!
//! The wizard owns the terminal's alternate screen, so logs go to
//! `<data_dir>/loan-wizard.log` when a data directory is available and to
//! stderr otherwise.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file name inside the data directory
pub const LOG_FILE_NAME: &str = "loan-wizard.log";

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "loan_wizard=info";

/// Keeps the background log writer alive; drop flushes buffered lines
pub struct LoggingHandle {
    pub _guard: Option<WorkerGuard>,
    pub log_file_path: Option<PathBuf>,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Where the log file goes for a given data directory
pub fn log_file_path(data_dir: &Path) -> PathBuf {
    data_dir.join(LOG_FILE_NAME)
}

/// Install the global subscriber
pub fn init_logging(data_dir: Option<&Path>) -> Result<LoggingHandle> {
    if let Some(dir) = data_dir {
        std::fs::create_dir_all(dir)?;

        let file_appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::registry()
            .with(env_filter())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();

        return Ok(LoggingHandle {
            _guard: Some(guard),
            log_file_path: Some(log_file_path(dir)),
        });
    }

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    Ok(LoggingHandle {
        _guard: None,
        log_file_path: None,
    })
}
