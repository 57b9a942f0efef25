//! Logging setup.
//!
//! Installs a `tracing` subscriber that writes human-readable events to
//! stderr and, optionally, plain-text events to a log file through a
//! non-blocking writer. `RUST_LOG` overrides the default level.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Logging options chosen by the caller.
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Log debug events (one per tile/file) instead of info only.
    pub verbose: bool,

    /// Also write events to this file.
    pub log_file: Option<PathBuf>,
}

/// Errors installing the subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log file path has no file name.
    #[error("Invalid log file path: {}", .0.display())]
    InvalidPath(PathBuf),

    /// The log directory could not be created.
    #[error("Failed to create log directory {}: {source}", .path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A global subscriber is already installed.
    #[error("Failed to install logger: {0}")]
    Install(String),
}

/// Default filter directive when `RUST_LOG` is unset.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Split a log file path into its directory and file name.
fn split_log_path(path: &Path) -> Result<(&Path, &OsStr), LoggingError> {
    let name = path
        .file_name()
        .ok_or_else(|| LoggingError::InvalidPath(path.to_path_buf()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Ok((dir, name))
}

/// Install the global subscriber.
///
/// The returned guard must be kept alive for the life of the program when a
/// log file is used; dropping it flushes and closes the file writer.
pub fn init_logging(options: &LogOptions) -> Result<Option<WorkerGuard>, LoggingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(options.verbose)));

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    match &options.log_file {
        Some(path) => {
            let (dir, name) = split_log_path(path)?;
            std::fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDirectory {
                path: dir.to_path_buf(),
                source,
            })?;

            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = fmt::layer().with_writer(writer).with_ansi(false);

            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(file_layer)
                .try_init()
                .map_err(|e| LoggingError::Install(e.to_string()))?;

            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .try_init()
                .map_err(|e| LoggingError::Install(e.to_string()))?;

            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(false), "info");
        assert_eq!(default_filter(true), "debug");
    }

    #[test]
    fn test_split_log_path() {
        let (dir, name) = split_log_path(Path::new("/var/log/cubetile.log")).unwrap();
        assert_eq!(dir, Path::new("/var/log"));
        assert_eq!(name, "cubetile.log");
    }

    #[test]
    fn test_split_log_path_bare_name() {
        let (dir, name) = split_log_path(Path::new("cubetile.log")).unwrap();
        assert_eq!(dir, Path::new("."));
        assert_eq!(name, "cubetile.log");
    }

    #[test]
    fn test_split_log_path_without_name() {
        assert!(matches!(
            split_log_path(Path::new("/")),
            Err(LoggingError::InvalidPath(_))
        ));
    }
}
