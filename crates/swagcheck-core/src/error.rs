//! Error types for SwagCheck

use thiserror::Error;

/// Result type alias using the SwagCheck Error
pub type Result<T> = std::result::Result<T, Error>;

/// SwagCheck error types
#[derive(Error, Debug)]
pub enum Error {
    // === Fetch Errors ===
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Timeout after {0}s")]
    Timeout(u64),

    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    // === Parse Errors ===
    #[error("Parse error: {0}")]
    Parse(String),

    // === History Errors ===
    #[error("Git tag lookup error, {0}")]
    GitLookup(String),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("URL list file not found: {path}")]
    UrlListNotFound { path: String },

    #[error("Invalid repository at {path}: {reason}")]
    InvalidRepository { path: String, reason: String },

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this error is fatal (should stop the run).
    ///
    /// Only configuration-class errors abort the batch; everything else is
    /// absorbed at the component boundary and degrades locally.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Configuration(_)
                | Error::UrlListNotFound { .. }
                | Error::InvalidRepository { .. }
        )
    }

    /// Get an error code for logging
    pub fn code(&self) -> &'static str {
        match self {
            Error::Request(_) => "REQUEST_FAILED",
            Error::Timeout(_) => "TIMEOUT",
            Error::Status { .. } => "BAD_STATUS",
            Error::Parse(_) => "PARSE_ERROR",
            Error::GitLookup(_) => "GIT_LOOKUP",
            Error::Configuration(_) => "CONFIG_ERROR",
            Error::UrlListNotFound { .. } => "URL_LIST_NOT_FOUND",
            Error::InvalidRepository { .. } => "INVALID_REPOSITORY",
            Error::Io(_) => "IO_ERROR",
        }
    }
}
