use contracts::admin::rules::RuleId;
use thiserror::Error;

/// Failure of one admin API call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request could not be sent or did not complete (includes timeouts)
    #[error("network error: {0}")]
    Network(String),

    /// The body was not the JSON we expected
    #[error("invalid response: {0}")]
    Parse(String),

    #[error("rule {0} not found")]
    NotFound(RuleId),

    /// The server answered but reported a failure
    #[error("backend error: {0}")]
    Backend(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Parse(e.to_string())
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(e: gloo_net::Error) -> Self {
        ApiError::Network(e.to_string())
    }
}
