//! Error types for climateclock-bot

use thiserror::Error;

/// Errors from fetching a Climate Clock snapshot.
///
/// Any of these makes the snapshot invalid as a whole; callers answer with silence.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status: {0}")]
    Status(u16),

    #[error("invalid body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("invalid deadline timestamp: {0}")]
    InvalidDeadline(String),
}

/// Errors from talking to Reddit.
#[derive(Debug, Error)]
pub enum RedditError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("authentication rejected: {0}")]
    Auth(String),

    #[error("unexpected status: {0}")]
    Status(u16),

    #[error("API error: {0}")]
    Api(String),
}
