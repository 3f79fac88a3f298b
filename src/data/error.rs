//! Structured error types for the catalog data layer.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A catalog file could not be read or parsed. Fatal to startup.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file does not exist
    #[error("catalog file not found: {path:?}")]
    NotFound { path: PathBuf },

    /// Any other I/O failure while reading the file
    #[error("failed to read catalog file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not a JSON array of records
    #[error("invalid catalog JSON in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Classify an I/O error for `path`, separating "not found" from the rest.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            LoadError::NotFound { path }
        } else {
            LoadError::Io { path, source }
        }
    }

    /// Path of the catalog file that failed
    pub fn path(&self) -> &std::path::Path {
        match self {
            LoadError::NotFound { path }
            | LoadError::Io { path, .. }
            | LoadError::Json { path, .. } => path,
        }
    }
}

/// A field needed for display is absent on the selected record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("missing required field '{field}'")]
pub struct MissingFieldError {
    pub field: &'static str,
}
