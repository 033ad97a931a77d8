//! Error types for sigkit.
//!
//! Both utilities share one error enum so the library surface stays small.
//! Missing files are not represented here: callers check existence first and
//! report that condition themselves.

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for the sniffer and the PIN generator.
#[derive(Debug, Error)]
pub enum SigkitError {
    /// IO error outside of a specific input file (e.g. writing the PIN file).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An existing path could not be opened or read (directory, permissions).
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// Path that failed
        path: PathBuf,
        /// Underlying IO failure
        #[source]
        source: std::io::Error,
    },

    /// A PIN request that cannot be satisfied.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the request
        message: String,
    },

    /// The operating system's secure random source failed.
    #[error("secure random source unavailable: {0}")]
    Entropy(#[from] rand::Error),
}

impl SigkitError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        SigkitError::InvalidArgument {
            message: message.into(),
        }
    }
}

/// Result type alias for sigkit operations.
pub type Result<T> = std::result::Result<T, SigkitError>;
