//! Authentication endpoint records and transport trait.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::ApiError;

/// Body of `POST /auth/login`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Success payload of `POST /auth/login`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user_id: i64,
    pub username: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("access_token", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .finish()
    }
}

/// Body of `POST /auth/register`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Serialized as `YYYY-MM-DD`.
    pub date_of_birth: NaiveDate,
    #[serde(default)]
    pub gender: Option<String>,
    /// Centimetres.
    #[serde(default)]
    pub height: Option<f64>,
    /// Kilograms.
    #[serde(default)]
    pub weight: Option<f64>,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("date_of_birth", &self.date_of_birth)
            .finish_non_exhaustive()
    }
}

/// Success payload of `POST /auth/register`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub access_token: String,
    pub user_id: i64,
    #[serde(default)]
    pub message: Option<String>,
}

impl std::fmt::Debug for RegisterResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterResponse")
            .field("access_token", &"<redacted>")
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// Transport for the unauthenticated auth endpoints.
///
/// Implemented by the shared HTTP client; the session manager only sees this
/// trait so it can be exercised without a server.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;

    async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ApiError>;
}
