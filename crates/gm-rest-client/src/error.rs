//! Error types for the REST API client

use gm_client_api::ClientApiError;
use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when using the REST API client
#[derive(Debug, Error)]
pub enum RestClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    #[error("server returned error status {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),
}

/// Result type alias for REST client operations
pub type RestClientResult<T> = Result<T, RestClientError>;

impl From<RestClientError> for ClientApiError {
    fn from(error: RestClientError) -> Self {
        match error {
            RestClientError::Status { status, message } => ClientApiError::Status {
                status: status.as_u16(),
                message,
            },
            RestClientError::Http(e) => ClientApiError::Transport(e.to_string()),
            other => ClientApiError::Unexpected(other.to_string()),
        }
    }
}
