//! Error types for backend calls and break lifecycle handling
//!
//! Errors are classified by origin:
//! - Transport: no response reached us (offline, timeout)
//! - Api: the backend answered with a non-success status
//! - Validation / State: client-side, raised before any network call

use thiserror::Error;

/// Errors surfaced by the client core.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (connectivity, DNS, timeout).
    #[error("Network error: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Input rejected client-side before any request was issued.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid break lifecycle transition.
    #[error("Invalid state: {0}")]
    State(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    /// Returns true if retrying the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Transport(_) => true,
            ClientError::Api { status, .. } => {
                *status == 408 || *status == 429 || *status >= 500
            }
            _ => false,
        }
    }

    /// Returns true when the caller can branch on "couldn't reach server"
    /// rather than "server rejected request".
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }

    pub fn state(msg: impl Into<String>) -> Self {
        ClientError::State(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ClientError::Validation(msg.into())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Transport(format!("request timed out: {}", err))
        } else if err.is_connect() {
            ClientError::Transport(format!("connection failed: {}", err))
        } else if let Some(status) = err.status() {
            ClientError::Api {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_is_retryable() {
        assert!(ClientError::Transport("timeout".into()).is_retryable());
    }

    #[test]
    fn test_server_errors_are_retryable() {
        let err = ClientError::Api {
            status: 503,
            message: "unavailable".into(),
        };
        assert!(err.is_retryable());
        let err = ClientError::Api {
            status: 429,
            message: "rate limited".into(),
        };
        assert!(err.is_retryable());
    }

    #[test]
    fn test_client_rejections_are_not_retryable() {
        let err = ClientError::Api {
            status: 400,
            message: "bad request".into(),
        };
        assert!(!err.is_retryable());
        assert!(!ClientError::validation("empty mood").is_retryable());
        assert!(!ClientError::state("already active").is_retryable());
    }

    #[test]
    fn test_is_transport_branches() {
        assert!(ClientError::Transport("offline".into()).is_transport());
        assert!(!ClientError::Api {
            status: 500,
            message: "boom".into()
        }
        .is_transport());
    }
}
