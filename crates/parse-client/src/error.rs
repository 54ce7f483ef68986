use serde::{Deserialize, Serialize};

/// Machine-readable failure category reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCode {
    Network,
    Timeout,
    RateLimited,
    Unauthorized,
    InvalidInput,
    Server,
    Unknown,
}

impl ErrorCode {
    /// Map an HTTP status to a category.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => ErrorCode::Unauthorized,
            408 | 504 => ErrorCode::Timeout,
            429 => ErrorCode::RateLimited,
            400 | 413 | 415 | 422 => ErrorCode::InvalidInput,
            500..=599 => ErrorCode::Server,
            _ => ErrorCode::Unknown,
        }
    }

    /// Whether a single simplified retry is worth attempting.
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            ErrorCode::Network | ErrorCode::Timeout | ErrorCode::RateLimited | ErrorCode::Server
        )
    }

    /// Human-readable hint shown next to the failure.
    pub fn recovery_suggestion(self) -> &'static str {
        match self {
            ErrorCode::Network => "Check your internet connection and try again.",
            ErrorCode::Timeout => "The document took too long to parse. Try a smaller input or retry later.",
            ErrorCode::RateLimited => "Too many requests. Wait a moment before trying again.",
            ErrorCode::Unauthorized => "Check that your API key is set and still valid.",
            ErrorCode::InvalidInput => "Check the content and options you sent; the service rejected them.",
            ErrorCode::Server => "The parsing service is having trouble. Try again in a few minutes.",
            ErrorCode::Unknown => "Something unexpected happened. Try again, and contact support if it persists.",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl ClientError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ClientError::Transport(err) => {
                if err.is_timeout() {
                    ErrorCode::Timeout
                } else if let Some(status) = err.status() {
                    ErrorCode::from_status(status.as_u16())
                } else if err.is_connect() || err.is_request() {
                    ErrorCode::Network
                } else {
                    ErrorCode::Unknown
                }
            }
            ClientError::Status { status, .. } => ErrorCode::from_status(*status),
            ClientError::InvalidInput(_) => ErrorCode::InvalidInput,
            ClientError::Decode(_) | ClientError::Config(_) => ErrorCode::Unknown,
        }
    }
}
