use reqwest::StatusCode;
use thiserror::Error;

/// Failures reported by the users API
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    Unprocessable(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected response ({status}): {message}")]
    Unexpected { status: StatusCode, message: String },
}

impl ClientError {
    pub fn from_status(status: StatusCode, message: String) -> Self {
        let msg = if message.is_empty() {
            status.canonical_reason().unwrap_or("Unknown error").to_string()
        } else {
            message
        };

        match status {
            StatusCode::NOT_FOUND => ClientError::NotFound(msg),
            StatusCode::UNPROCESSABLE_ENTITY | StatusCode::BAD_REQUEST => {
                ClientError::Unprocessable(msg)
            }
            status if status.is_server_error() => ClientError::ServerError(msg),
            status => ClientError::Unexpected {
                status,
                message: msg,
            },
        }
    }
}
