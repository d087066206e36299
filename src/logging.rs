//! Optional log output for applications embedding the client.
//!
//! The client only emits `tracing` events and never installs a subscriber.
//! An application that has no subscriber of its own can call [`init`] to get
//! a daily-rotated log file filtered by `RUST_LOG`.

use std::path::{Path, PathBuf};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "jira_cloud=info,warn";

/// File name prefix; each day's file gets a date suffix.
const LOG_FILE_NAME: &str = "jira-cloud.log";

/// Send client logs to `<local data dir>/jira-cloud/logs/`.
///
/// `RUST_LOG` overrides the default filter; `RUST_LOG=jira_cloud=debug`
/// records every request the client sends.
///
/// # Errors
///
/// Fails when the platform has no local data directory, the directory
/// cannot be created, or a global subscriber is already installed.
///
/// ```no_run
/// jira_cloud::logging::init().expect("Failed to initialize logging");
/// ```
pub fn init() -> anyhow::Result<()> {
    let log_dir = get_log_directory()?;
    init_in(&log_dir)
}

/// Like [`init`], but logs into `log_dir`.
pub fn init_in(log_dir: &Path) -> anyhow::Result<()> {
    let file_appender = file_appender(log_dir)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "jira-cloud logging started");
    tracing::debug!(log_dir = %log_dir.display(), "Log directory");

    Ok(())
}

fn file_appender(log_dir: &Path) -> anyhow::Result<RollingFileAppender> {
    std::fs::create_dir_all(log_dir)?;
    Ok(RollingFileAppender::new(
        Rotation::DAILY,
        log_dir,
        LOG_FILE_NAME,
    ))
}

fn get_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("jira-cloud").join("logs"))
}

/// Where [`init`] writes logs, if the platform has a local data directory.
pub fn log_directory() -> Option<PathBuf> {
    get_log_directory().ok()
}
