//! Error types for corpus statistics runs.
//!
//! Every variant is fatal for a run. Malformed documents are not errors; the
//! polarity classifier counts them as ties (see `polarity`).

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result alias used across the library.
pub type Result<T> = std::result::Result<T, CorpusError>;

#[derive(Debug, Error)]
pub enum CorpusError {
    /// An input resource (corpus or lexicon) does not exist.
    #[error("resource not found: {path}")]
    ResourceNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The resource exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A task scheduled on the worker pool panicked or never reported back.
    #[error("task `{task}` failed: {reason}")]
    TaskFailure { task: &'static str, reason: String },

    /// The worker pool could not be built.
    #[error("worker pool error: {0}")]
    Pool(String),
}

impl CorpusError {
    /// Map a read error for `path`, separating missing files from other I/O failures.
    pub fn from_read(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::ResourceNotFound {
                path: path.to_path_buf(),
                source,
            }
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    pub fn task_failure(task: &'static str, reason: impl Into<String>) -> Self {
        Self::TaskFailure {
            task,
            reason: reason.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound { .. })
    }
}
