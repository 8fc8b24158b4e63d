//! Logging Infrastructure
//!
//! Console output always; a daily rolling file under `LOG_DIR` when one is
//! configured. `RUST_LOG` overrides the configured level.

use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn")
/// * `json_format` - JSON lines instead of human-readable output (production)
/// * `log_dir` - Optional directory for daily rotating log files
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_appender = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(Path::new(dir))?;
            Some(RollingFileAppender::new(Rotation::DAILY, dir, "guide-server"))
        }
        None => None,
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    if json_format {
        registry
            .with(fmt::layer().json().with_target(true))
            .with(file_appender.map(|w| fmt::layer().json().with_ansi(false).with_writer(w)))
            .try_init()?;
    } else {
        registry
            .with(fmt::layer().with_target(false))
            .with(file_appender.map(|w| fmt::layer().with_ansi(false).with_writer(w)))
            .try_init()?;
    }

    Ok(())
}

/// Initialize console-only logging at `info`
pub fn init_logger() -> anyhow::Result<()> {
    init_logger_with_file("info", false, None)
}
