//! Session domain model.
//!
//! A session is the in-memory view of "who is logged in". The token and the
//! identity travel together as [`Credentials`], so a session can only be empty
//! or fully populated.

use serde::{Deserialize, Serialize};

/// Identity record of the authenticated user, persisted under the `user` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// A bearer token paired with the identity it was issued for.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub user: UserIdentity,
}

impl Credentials {
    pub fn new(token: impl Into<String>, user: UserIdentity) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        bearer_value(&self.token)
    }
}

// Tokens must never end up in logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

/// Formats a token as an `Authorization` header value.
pub fn bearer_value(token: &str) -> String {
    format!("Bearer {token}")
}

/// Snapshot of the session owned by the session manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    credentials: Option<Credentials>,
    /// True until the initial restore from durable storage has finished.
    pub is_loading: bool,
    /// Message of the most recent failed login/register, if any.
    pub last_error: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            credentials: None,
            is_loading: true,
            last_error: None,
        }
    }
}

impl SessionState {
    pub fn token(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| c.token.as_str())
    }

    pub fn user(&self) -> Option<&UserIdentity> {
        self.credentials.as_ref().map(|c| &c.user)
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    /// Replaces the whole credential pair and clears the last error.
    pub fn sign_in(&mut self, credentials: Credentials) {
        self.credentials = Some(credentials);
        self.last_error = None;
    }

    pub fn sign_out(&mut self) {
        self.credentials = None;
    }
}

/// Result of a login or registration attempt.
///
/// Failures are values, not errors: the message is ready to show to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuthOutcome {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> UserIdentity {
        UserIdentity {
            id: 7,
            username: "lifter".into(),
            email: "lifter@example.com".into(),
        }
    }

    #[test]
    fn test_new_session_is_loading_and_empty() {
        let state = SessionState::default();
        assert!(state.is_loading);
        assert!(!state.is_authenticated());
        assert!(state.token().is_none());
        assert!(state.user().is_none());
    }

    #[test]
    fn test_sign_in_sets_token_and_user_together() {
        let mut state = SessionState {
            last_error: Some("Login failed".into()),
            ..SessionState::default()
        };
        state.sign_in(Credentials::new("abc", sample_user()));

        assert_eq!(state.token(), Some("abc"));
        assert_eq!(state.user().map(|u| u.id), Some(7));
        assert!(state.last_error.is_none());

        state.sign_out();
        assert!(state.token().is_none());
        assert!(state.user().is_none());
    }

    #[test]
    fn test_credentials_debug_redacts_token() {
        let creds = Credentials::new("super-secret", sample_user());
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("super-secret"));
        assert_eq!(creds.bearer(), "Bearer super-secret");
    }

    #[test]
    fn test_auth_outcome_serialization() {
        let ok = serde_json::to_value(AuthOutcome::succeeded()).unwrap();
        assert_eq!(ok, serde_json::json!({ "success": true }));

        let failed = serde_json::to_value(AuthOutcome::failed("Invalid credentials")).unwrap();
        assert_eq!(
            failed,
            serde_json::json!({ "success": false, "error": "Invalid credentials" })
        );
    }
}
