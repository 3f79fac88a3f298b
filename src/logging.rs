//! Tracing setup.
//!
//! The interactive viewer owns the terminal, so its logs go to a file in the
//! user cache directory. The print-and-exit subcommands log to stderr.
//!
//!   RUST_LOG=board_viewer=debug board-viewer   # fine-grained control
//!   board-viewer --debug list                  # debug level to stderr

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

const LOG_DIR_NAME: &str = "board-viewer";
const LOG_FILE_NAME: &str = "board-viewer.log";

/// Where log output goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File,
}

fn env_filter(debug: bool) -> EnvFilter {
    let default = if debug { "debug" } else { "warn" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Location of the interactive-mode log file
pub fn log_file_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join(LOG_DIR_NAME).join(LOG_FILE_NAME))
}

/// Install the global subscriber. Returns the log file path when logging
/// to a file.
pub fn init_tracing(target: LogTarget, debug: bool) -> Result<Option<PathBuf>> {
    match target {
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(debug))
                .with_writer(io::stderr)
                .compact()
                .try_init()
                .map_err(|err| anyhow!(err))?;
            Ok(None)
        }
        LogTarget::File => init_file_logging(log_file_path(), debug),
    }
}

/// File logging for the interactive viewer. When the file cannot be set up
/// the viewer runs without logs instead of refusing to start.
fn init_file_logging(path: Option<PathBuf>, debug: bool) -> Result<Option<PathBuf>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let Some(file) = open_log_file(&path) else {
        return Ok(None);
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(debug))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!(err))?;
    Ok(Some(path))
}

fn open_log_file(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_lives_in_app_dir() {
        if let Some(path) = log_file_path() {
            assert!(path.ends_with("board-viewer/board-viewer.log"));
        }
    }

    #[test]
    fn test_unusable_log_location_runs_without_logs() {
        let dir = tempfile::tempdir().unwrap();
        // A plain file where the cache directory should be
        let cache = dir.path().join("cache");
        fs::write(&cache, "not a directory").unwrap();
        let path = cache.join(LOG_DIR_NAME).join(LOG_FILE_NAME);

        assert!(open_log_file(&path).is_none());
        assert_eq!(init_file_logging(Some(path), false).unwrap(), None);
    }

    #[test]
    fn test_log_file_is_created_with_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_DIR_NAME).join(LOG_FILE_NAME);
        assert!(open_log_file(&path).is_some());
        assert!(path.is_file());
    }
}
