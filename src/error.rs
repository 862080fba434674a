use std::sync::Arc;

use thiserror::Error;

/// Unified error type for conventional-bump operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version validation error: {0}")]
    Version(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("No Impact determined: neither the pull request nor any commit follows conventional commits")]
    NoImpactDetermined,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A failure observed by every caller attached to one cached operation
    #[error("{0}")]
    Shared(Arc<ReleaseError>),
}

/// Convenience type alias for Results in conventional-bump
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a version validation error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseError::Version(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        ReleaseError::Tag(msg.into())
    }
}

impl From<Arc<ReleaseError>> for ReleaseError {
    fn from(err: Arc<ReleaseError>) -> Self {
        ReleaseError::Shared(err)
    }
}
