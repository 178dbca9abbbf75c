//! Tracing subscriber setup for the binary

use std::path::Path;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LOG_FILTER_ENV;

const DEFAULT_LOG_FILTER: &str = "warn";

/// Installs the global subscriber.
///
/// Logs go to stderr unless `log_file` is set, in which case they are written
/// to that file as JSON. Keep the returned guard alive until exit so buffered
/// lines are flushed.
pub fn init(log_file: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("log file {:?} has no file name", path))?;

    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {:?}", dir))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(writer)
        .init();

    Ok(Some(guard))
}
