use std::fs;
use std::path::Path;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "typesnip.log";

/// Install a file-backed subscriber. `RUST_LOG` wins over `default_filter`.
///
/// The returned guard flushes pending lines on drop and must outlive the
/// session. Returns `None` if a global subscriber is already set.
pub fn init_tracing(log_dir: &Path, default_filter: &str) -> Result<Option<WorkerGuard>> {
    fs::create_dir_all(log_dir)?;
    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("typesnip={default_filter}")));

    let installed = tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_env_filter(filter)
        .try_init()
        .is_ok();

    Ok(installed.then_some(guard))
}
