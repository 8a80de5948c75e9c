use anyhow::{Context, Result};
use std::{fs, path::Path};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_FILE_NAME: &str = "pawprint.log";

/// `RUST_LOG` wins over the configured filter; a bad configured filter
/// falls back to `info`.
pub fn build_filter(configured: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Sends tracing output to a file in `log_dir` so it never mixes with the
/// game screen. Keep the guard alive until exit or buffered lines are lost.
pub fn init_file_logging(log_dir: &Path, filter: &str) -> Result<WorkerGuard> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("could not create log directory {}", log_dir.display()))?;
    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(build_filter(filter))
        .with(file_layer)
        .try_init()
        .context("could not install log subscriber")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unusable_log_dir_is_an_error_not_a_panic() {
        let file = std::env::temp_dir().join(format!("pawprint-logfile-{}", std::process::id()));
        fs::write(&file, b"").unwrap();
        let result = init_file_logging(&file.join("logs"), "info");
        assert!(result.is_err());
        fs::remove_file(&file).ok();
    }

    #[test]
    fn test_bad_filter_falls_back() {
        // a malformed directive must not panic
        let _ = build_filter("pawprint=[");
    }
}
