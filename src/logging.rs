//! Tracing subscriber setup for the desktop app and the command line client.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use thiserror::Error;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::app_dirs;

const KEPT_LOG_FILES: usize = 10;
const LOG_FILE_PREFIX: &str = "telepredict_";
const LOG_FILE_SUFFIX: &str = ".log";
/// Zero-padded so file names sort in launch order.
const FILE_STAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
const LINE_STAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Where a binary sends its log output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogTarget {
    /// Desktop app: stdout plus a per-launch file under `logs/`.
    Desktop,
    /// Command line client: stderr only, leaving stdout for results.
    Cli,
}

impl LogTarget {
    /// Filter used when `RUST_LOG` is unset.
    fn default_directive(self) -> &'static str {
        match self {
            Self::Desktop => "info",
            Self::Cli => "warn",
        }
    }
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Log directory unavailable: {0}")]
    Dir(#[from] app_dirs::AppDirError),
    #[error("Failed to manage log file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to format log file timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
    #[error("Failed to install global tracing subscriber: {0}")]
    Install(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Keeps the background file writer alive; hold it for the lifetime of `main`.
#[must_use = "dropping the handle stops file logging"]
pub struct LoggingHandle {
    _file_guard: Option<WorkerGuard>,
    log_path: Option<PathBuf>,
}

impl LoggingHandle {
    /// The file this launch writes to, if any.
    pub fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }
}

/// Install the global subscriber for `target`. `RUST_LOG` overrides the default filter.
pub fn init(target: LogTarget) -> Result<LoggingHandle, LoggingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(target.default_directive()));
    match target {
        LogTarget::Cli => {
            let subscriber = tracing_subscriber::registry().with(filter).with(
                fmt::layer()
                    .with_timer(line_timer())
                    .with_target(false)
                    .with_writer(std::io::stderr),
            );
            tracing::subscriber::set_global_default(subscriber)?;
            Ok(LoggingHandle {
                _file_guard: None,
                log_path: None,
            })
        }
        LogTarget::Desktop => {
            let dir = app_dirs::logs_dir()?;
            let (file, path) = create_log_file(&dir, now_local())?;
            prune_logs(&dir, KEPT_LOG_FILES)?;
            let (file_writer, guard) = tracing_appender::non_blocking(file);
            let subscriber = tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_timer(line_timer())
                        .with_writer(std::io::stdout),
                )
                .with(
                    fmt::layer()
                        .with_ansi(false)
                        .with_timer(line_timer())
                        .with_writer(file_writer),
                );
            tracing::subscriber::set_global_default(subscriber)?;
            Ok(LoggingHandle {
                _file_guard: Some(guard),
                log_path: Some(path),
            })
        }
    }
}

fn log_file_name(launched_at: OffsetDateTime) -> Result<String, LoggingError> {
    let stamp = launched_at.format(FILE_STAMP)?;
    Ok(format!("{LOG_FILE_PREFIX}{stamp}{LOG_FILE_SUFFIX}"))
}

fn create_log_file(dir: &Path, launched_at: OffsetDateTime) -> Result<(File, PathBuf), LoggingError> {
    let path = dir.join(log_file_name(launched_at)?);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| LoggingError::Io {
            path: path.clone(),
            source,
        })?;
    Ok((file, path))
}

/// Delete this app's oldest log files so at most `keep` remain; other files are left alone.
fn prune_logs(dir: &Path, keep: usize) -> Result<(), LoggingError> {
    let io_error = |path: &Path, source| LoggingError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut names = fs::read_dir(dir)
        .map_err(|source| io_error(dir, source))?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_ok_and(|kind| kind.is_file()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.starts_with(LOG_FILE_PREFIX) && name.ends_with(LOG_FILE_SUFFIX))
        .collect::<Vec<_>>();
    names.sort();
    let excess = names.len().saturating_sub(keep);
    for name in &names[..excess] {
        let path = dir.join(name);
        fs::remove_file(&path).map_err(|source| io_error(&path, source))?;
    }
    Ok(())
}

fn line_timer() -> OffsetTime<&'static [BorrowedFormatItem<'static>]> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    OffsetTime::new(offset, LINE_STAMP)
}

fn now_local() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}
