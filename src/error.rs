//! Library error type

use thiserror::Error;

/// Errors raised while reading content from the content source
#[derive(Error, Debug)]
pub enum BlogError {
    /// Transport error, non-success status or undecodable payload
    #[error("Fetch failed: {0}")]
    FetchFailure(String),

    /// The requested document does not exist
    #[error("Document not found: {0}")]
    NotFound(String),

    /// A `load_more` call is already in flight on this walker
    #[error("A page load is already in progress")]
    Busy,

    /// The feed has no further pages
    #[error("No more pages to load")]
    Exhausted,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for BlogError {
    fn from(err: reqwest::Error) -> Self {
        BlogError::FetchFailure(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BlogError>;
