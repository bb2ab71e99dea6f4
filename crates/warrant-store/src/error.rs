//! Store error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating or reading the credential store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No store file exists at the resolved location.
    #[error("credential store not found at {path}")]
    NotFound {
        /// Resolved store file path.
        path: PathBuf,
    },

    /// The store file exists but could not be read.
    #[error("credential store at {path} is unreadable: {message}")]
    Unreadable {
        /// Resolved store file path.
        path: PathBuf,
        /// Underlying I/O error message.
        message: String,
    },

    /// The store file is not a valid agent document.
    #[error("credential store is malformed: {0}")]
    Malformed(String),

    /// The stored principal is not a usable signing key.
    #[error("stored principal is invalid: {0}")]
    BadPrincipal(String),

    /// `WARRANT_STORE_DIR` must be an absolute path.
    #[error("WARRANT_STORE_DIR must be an absolute path")]
    OverrideNotAbsolute,

    /// No platform configuration directory could be determined.
    #[error("no configuration directory available on this platform")]
    NoConfigDir,
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
