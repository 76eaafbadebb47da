//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/myconsole/logs/`
/// Log level is controlled by `MYCONSOLE_LOG` environment variable.
///
/// # Examples
/// ```bash
/// MYCONSOLE_LOG=debug myconsole replay events.ndjson
/// MYCONSOLE_LOG=trace myconsole replay -
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "myconsole.log");

    // Default to info, allow override via MYCONSOLE_LOG
    let env_filter = EnvFilter::try_from_env("MYCONSOLE_LOG")
        .unwrap_or_else(|_| EnvFilter::new("myconsole=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("MyConsole starting, log directory: {}", log_dir.display());

    Ok(())
}

/// Get the log directory path
fn get_log_directory() -> Result<PathBuf> {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    Ok(base.join("myconsole").join("logs"))
}

