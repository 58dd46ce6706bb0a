use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all stagehand operations.
#[derive(Debug, Error, Diagnostic)]
pub enum StagehandError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Required metadata or credentials are missing or malformed.
    #[error("Configuration error: {message}")]
    #[diagnostic(help("Check your Publish.toml and .stagehand.env"))]
    Config { message: String },

    /// Producing the artifact set failed (javac, javadoc, or jar assembly).
    #[error("Packaging failed: {message}")]
    Packaging { message: String },

    /// Detached signature production failed (key material or gpg).
    #[error("Signing failed: {message}")]
    Signing { message: String },

    /// Network request or repository upload failed.
    #[error("Network error: {message}")]
    Network { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type StagehandResult<T> = miette::Result<T>;
