//! Crate-level error returned by the client runners.

use thiserror::Error;

use crate::usecase::JoinError;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Options do not describe a usable session
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The page URL given for query-sourced identity could not be parsed
    #[error("Invalid page URL '{url}': {reason}")]
    InvalidPageUrl { url: String, reason: String },

    #[error("Failed to connect to {url}: {reason}")]
    Connect { url: String, reason: String },

    #[error(transparent)]
    Join(#[from] JoinError),

    #[error("Line editor error: {0}")]
    Readline(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<rustyline::error::ReadlineError> for ClientError {
    fn from(e: rustyline::error::ReadlineError) -> Self {
        ClientError::Readline(e.to_string())
    }
}
