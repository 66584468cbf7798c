//! Error types for jrp-core

use std::path::PathBuf;

use thiserror::Error;

/// Core library error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Download error: {0}")]
    Download(#[from] reqwest::Error),

    /// The WordNet database is already present at the target path.
    #[error("WordNet database already downloaded: {0}")]
    AlreadyDownloaded(PathBuf),

    /// The WordNet database has not been downloaded yet.
    #[error("WordNet database not found at {0}")]
    WordnetMissing(PathBuf),

    /// An operation the user requested matched no rows. Rendered as a
    /// neutral notice by the CLI, not a failure.
    #[error("{0}")]
    NothingToDo(&'static str),
}

/// Result type alias using Error.
pub type Result<T> = std::result::Result<T, Error>;
