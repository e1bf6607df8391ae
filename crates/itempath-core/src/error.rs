//! Error taxonomy for the mapping engine.

use std::io;
use std::path::PathBuf;

/// Error returned by path mapping, shortening and link file I/O.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// Caller broke a precondition: rooted logical path, `.` or `..`
    /// segment, or a path that is not under the declared root. Never
    /// transient; not retried.
    #[error("contract violation: {message}")]
    ContractViolation { message: String },

    /// Mapper configuration cannot produce a usable length budget.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Directory creation or link file I/O failed.
    #[error("filesystem failure at {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl MapError {
    pub(crate) fn contract(message: impl Into<String>) -> Self {
        MapError::ContractViolation {
            message: message.into(),
        }
    }

    pub(crate) fn fs(path: impl Into<PathBuf>, source: io::Error) -> Self {
        MapError::Filesystem {
            path: path.into(),
            source,
        }
    }
}
