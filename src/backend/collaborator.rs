use std::fmt;

use async_trait::async_trait;

use crate::core::state::ChatTurn;

/// Errors that can occur while talking to a collaborator.
#[derive(Debug)]
pub enum BackendError {
    /// Client misconfigured (bad base URL). Not retryable.
    Config(String),
    /// Network-level failure (DNS, connection refused, reset).
    Network(String),
    /// The function returned a non-success status.
    Api { status: u16, message: String },
    /// The body was not the JSON we expected.
    Parse(String),
    /// The function answered with an explicit `error` field.
    Rejected(String),
    /// The payload had no recognizable text.
    Empty,
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Config(msg) => write!(f, "config error: {msg}"),
            BackendError::Network(msg) => write!(f, "network error: {msg}"),
            BackendError::Api { status, message } => {
                write!(f, "function error (HTTP {status}): {message}")
            }
            BackendError::Parse(msg) => write!(f, "parse error: {msg}"),
            BackendError::Rejected(msg) => write!(f, "rejected: {msg}"),
            BackendError::Empty => write!(f, "no content found"),
        }
    }
}

impl std::error::Error for BackendError {}

/// Everything the answering function needs for one question.
pub struct AnswerRequest<'a> {
    /// Turns preceding `message`.
    pub history: &'a [ChatTurn],
    pub message: &'a str,
    /// The loaded regulations text.
    pub context: &'a str,
}

/// Fetches a page and returns it as markdown.
#[async_trait]
pub trait Scraper: Send + Sync {
    async fn scrape(&self, url: &str) -> Result<String, BackendError>;
}

/// Answers a question using the supplied context.
#[async_trait]
pub trait Answerer: Send + Sync {
    async fn answer(&self, request: AnswerRequest<'_>) -> Result<String, BackendError>;
}
