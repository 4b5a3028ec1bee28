//! Error types for request validation and upstream provider calls.

use axum::http::StatusCode;
use thiserror::Error;

/// A query parameter was missing or could not be accepted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("missing required parameter '{0}'")]
    Missing(&'static str),

    #[error("parameter '{param}' must be a number, got '{value}'")]
    NotNumeric { param: &'static str, value: String },

    #[error("parameter '{param}' is out of range: {value}")]
    OutOfRange { param: &'static str, value: f64 },

    #[error("unknown rider profile '{0}'")]
    UnknownProfile(String),

    #[error("range must be a positive number of seconds, got {0}")]
    NonPositiveRange(f64),
}

/// A call to the routing or facility provider failed.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("routing provider API key is not configured")]
    MissingApiKey,

    #[error("request to upstream failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{service} returned status {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("{service} response could not be decoded: {message}")]
    Decode {
        service: &'static str,
        message: String,
    },
}

/// Everything a request handler can fail with.
#[derive(Debug, Error)]
pub enum ReachError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("worker task failed: {0}")]
    Task(String),
}

impl ReachError {
    /// HTTP status for this error: client mistakes are 400, everything else 500.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ReachError::Validation(_) => StatusCode::BAD_REQUEST,
            ReachError::Upstream(_) | ReachError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
