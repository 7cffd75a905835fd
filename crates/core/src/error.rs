//! Error types for the upload flow.

use std::path::PathBuf;
use thiserror::Error;

/// Upload flow error type.
///
/// Every variant is terminal: the orchestrator aborts at the step that
/// produced it and nothing is retried.
#[derive(Debug, Error)]
pub enum Error {
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error(
        "unsupported file extension: {extension} (supported: {})",
        crate::mime::supported_extensions()
    )]
    UnsupportedExtension { extension: String },

    #[error("invalid repository reference: {0}")]
    InvalidReference(String),

    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("repository resolution failed: {0}")]
    RepositoryResolutionFailed(String),

    #[error("upload policy request failed: {0}")]
    PolicyRequestFailed(String),

    #[error("upload failed: {0}")]
    UploadFailed(String),
}

/// Result type alias for upload operations.
pub type Result<T> = std::result::Result<T, Error>;
