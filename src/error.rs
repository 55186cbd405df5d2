use crate::context::ContextError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForksError {
    #[error("repository fetch error: {0}")]
    ContextError(#[from] ContextError),

    #[error("repository fetch error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("repository fetch error: upstream returned {status}: {body}")]
    UpstreamError {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("repository fetch error: graphql: {0}")]
    GraphqlError(String),

    #[error("repository fetch error: {0}")]
    TaskError(#[from] tokio::task::JoinError),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("unexpected http status: {0}")]
    HttpStatusError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ForksError {
    /// True when the failure came from the fetch context being canceled or
    /// running past its deadline.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, ForksError::ContextError(_))
    }
}

pub type Result<T> = std::result::Result<T, ForksError>;
