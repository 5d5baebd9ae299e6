//! Remote API failure taxonomy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error payload returned by the backend on every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// A failed call to the remote API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No response was received (connection refused, timeout, DNS...).
    #[error("Network error: {0}")]
    Transport(String),

    /// The server rejected the credential (HTTP 401).
    #[error("Unauthorized: {}", .message.as_deref().unwrap_or("authentication required"))]
    Unauthorized { message: Option<String> },

    /// The server answered with a non-success status.
    #[error("Server error ({status}): {}", .message.as_deref().unwrap_or("no details"))]
    Server { status: u16, message: Option<String> },

    /// The response body did not match the expected record type.
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Builds the error for a non-success response, extracting `{error}` from
    /// the body when the body is the standard error payload.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .map(|b| b.error)
            .filter(|m| !m.trim().is_empty());

        if status == 401 {
            Self::Unauthorized { message }
        } else {
            Self::Server { status, message }
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Message reported by the server, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message } | Self::Server { message, .. } => message.as_deref(),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// Human-readable message for the user: the server's own message when
    /// present, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_401_with_error_body() {
        let err = ApiError::from_response(401, r#"{"error": "Invalid email or password"}"#);
        assert!(err.is_unauthorized());
        assert_eq!(err.user_message("Login failed"), "Invalid email or password");
    }

    #[test]
    fn test_422_keeps_status_and_message() {
        let err = ApiError::from_response(
            422,
            r#"{"error": "page and per_page must be positive integers"}"#,
        );
        assert_eq!(
            err,
            ApiError::Server {
                status: 422,
                message: Some("page and per_page must be positive integers".into()),
            }
        );
    }

    #[test]
    fn test_non_json_body_falls_back() {
        let err = ApiError::from_response(500, "<html>Internal Server Error</html>");
        assert_eq!(err.server_message(), None);
        assert_eq!(err.user_message("Registration failed"), "Registration failed");
    }

    #[test]
    fn test_transport_error_uses_fallback() {
        let err = ApiError::Transport("connection refused".into());
        assert!(!err.is_unauthorized());
        assert_eq!(err.user_message("Login failed"), "Login failed");
    }
}
