//! Client Error Types
//!
//! Failures a backend call can produce, and how each one is presented to
//! the person looking at the dashboard.

use thiserror::Error;

/// Banner text for transport and HTTP failures
pub const GENERIC_FETCH_ERROR: &str =
    "データの取得に失敗しました。サーバーが起動しているか確認してください。";

/// Banner text for application failures without a backend message
pub const GENERIC_APPLICATION_ERROR: &str = "サーバーでエラーが発生しました。";

/// Errors returned by [`CareApi`](super::CareApi) implementations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Network unreachable, connection refused, aborted request
    #[error("Network error: {0}")]
    Transport(String),

    /// Non-2xx response
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Body did not match the expected shape
    #[error("Parse error: {0}")]
    Decode(String),

    /// Envelope came back with `status != "success"`
    #[error("Backend error: {}", .message.as_deref().unwrap_or("no message"))]
    Application { message: Option<String> },

    /// Request rejected before it was sent
    #[error("Invalid request: {0}")]
    Invalid(String),
}

impl ClientError {
    /// Whether offering a retry makes sense
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Transport(_)
            | ClientError::Http { .. }
            | ClientError::Decode(_)
            | ClientError::Application { .. } => true,
            ClientError::Invalid(_) => false,
        }
    }

    /// Message shown in the error banner
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Transport(_) | ClientError::Http { .. } => GENERIC_FETCH_ERROR.to_string(),
            ClientError::Decode(_) => "サーバーの応答を読み取れませんでした。".to_string(),
            ClientError::Application { message } => message
                .clone()
                .unwrap_or_else(|| GENERIC_APPLICATION_ERROR.to_string()),
            ClientError::Invalid(reason) => reason.clone(),
        }
    }
}

#[cfg(feature = "native")]
impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            ClientError::Http {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else {
            ClientError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}

/// Result type for backend calls
pub type ClientResult<T> = Result<T, ClientError>;
