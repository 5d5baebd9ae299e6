//! Login, restart and logout against the file-backed store.

use std::sync::Arc;

use async_trait::async_trait;
use evolvx_application::SessionManager;
use evolvx_core::api::{ApiError, AuthApi, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use evolvx_core::session::{AUTH_TOKEN_KEY, DefaultAuthorization, KeyValueStore, USER_KEY};
use evolvx_infrastructure::FileKeyValueStore;
use evolvx_interaction::{ApiClient, BearerTokenDecorator};
use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use tempfile::TempDir;

struct FixedAuth;

#[async_trait]
impl AuthApi for FixedAuth {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        if request.password == "correct" {
            Ok(LoginResponse {
                access_token: "T".into(),
                user_id: 42,
                username: "lifter".into(),
                message: None,
            })
        } else {
            Err(ApiError::from_response(401, r#"{"error": "Invalid credentials"}"#))
        }
    }

    async fn register(&self, _request: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        Err(ApiError::Server {
            status: 400,
            message: Some("Email already registered".into()),
        })
    }
}

struct App {
    session: SessionManager,
    client: ApiClient,
}

/// Wires a fresh process against the store at `dir`, like the CLI does.
fn start(dir: &TempDir) -> App {
    let store: Arc<dyn KeyValueStore> =
        Arc::new(FileKeyValueStore::with_path(dir.path().join("storage.toml")));
    let default_auth = DefaultAuthorization::new();
    let client = ApiClient::new(
        "http://localhost:5000/api",
        std::time::Duration::from_secs(5),
        Arc::new(BearerTokenDecorator::new(store.clone(), default_auth.clone())),
    )
    .unwrap();
    let session = SessionManager::new(Arc::new(FixedAuth), store, default_auth);
    App { session, client }
}

async fn next_request_authorization(client: &ApiClient) -> Option<String> {
    let request = client
        .request(Method::GET, "workouts")
        .await
        .build()
        .unwrap();
    request
        .headers()
        .get(AUTHORIZATION)
        .map(|v| v.to_str().unwrap().to_string())
}

#[tokio::test]
async fn test_login_survives_restart_then_logout_clears_it() {
    let dir = TempDir::new().unwrap();

    let first = start(&dir);
    first.session.restore().await;
    assert!(!first.session.is_authenticated().await);

    let outcome = first.session.login("lifter@example.com", "correct").await;
    assert!(outcome.success);
    assert_eq!(
        next_request_authorization(&first.client).await.as_deref(),
        Some("Bearer T")
    );
    drop(first);

    let second = start(&dir);
    second.session.restore().await;
    let user = second.session.user().await.unwrap();
    assert_eq!(user.id, 42);
    assert_eq!(user.email, "lifter@example.com");
    assert_eq!(
        second.session.default_authorization().get().as_deref(),
        Some("Bearer T")
    );

    second.session.logout().await;
    assert_eq!(next_request_authorization(&second.client).await, None);
    drop(second);

    let third = start(&dir);
    third.session.restore().await;
    assert!(!third.session.is_authenticated().await);
    assert!(!third.session.is_loading().await);
}

#[tokio::test]
async fn test_rejected_login_leaves_store_untouched() {
    let dir = TempDir::new().unwrap();
    let app = start(&dir);
    app.session.restore().await;

    let outcome = app.session.login("lifter@example.com", "wrong").await;

    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("Invalid credentials"));
    let store = FileKeyValueStore::with_path(dir.path().join("storage.toml"));
    assert_eq!(
        store.multi_get(&[AUTH_TOKEN_KEY, USER_KEY]).await.unwrap(),
        vec![None, None]
    );
    assert_eq!(next_request_authorization(&app.client).await, None);
}
