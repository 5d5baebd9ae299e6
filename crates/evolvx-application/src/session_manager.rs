//! Session manager implementation.
//!
//! This module provides the `SessionManager`, the single owner of the
//! authenticated session. It coordinates the auth endpoints, durable storage
//! and the shared client's default `Authorization` header so the three never
//! disagree for longer than one operation.

use std::future::Future;
use std::sync::Arc;

use evolvx_core::api::{ApiError, AuthApi, LoginRequest, RegisterRequest};
use evolvx_core::session::{
    AUTH_TOKEN_KEY, AuthOutcome, Credentials, DefaultAuthorization, KeyValueStore, SessionState,
    USER_KEY, UserIdentity,
};
use tokio::sync::RwLock;

const LOGIN_FAILED: &str = "Login failed";
const REGISTRATION_FAILED: &str = "Registration failed";

/// Owns the session state and every transition of it.
///
/// Share it as `Arc<SessionManager>`; readers take snapshots, and mutations
/// only happen through the named operations below.
///
/// # Consistency
///
/// - Login and register write the token and user record to durable storage
///   before the in-memory session changes, so a successful outcome means
///   the credentials survive a restart (unless the write itself failed,
///   which is logged).
/// - Storage failures never surface as errors; the session degrades to
///   in-memory only.
/// - Concurrent logins are not deduplicated; the last to finish wins.
pub struct SessionManager {
    state: RwLock<SessionState>,
    auth_api: Arc<dyn AuthApi>,
    store: Arc<dyn KeyValueStore>,
    default_auth: DefaultAuthorization,
}

impl SessionManager {
    /// Creates a manager with an empty, still-loading session.
    ///
    /// `default_auth` must be the same cell the HTTP client's decorator reads.
    pub fn new(
        auth_api: Arc<dyn AuthApi>,
        store: Arc<dyn KeyValueStore>,
        default_auth: DefaultAuthorization,
    ) -> Self {
        Self {
            state: RwLock::new(SessionState::default()),
            auth_api,
            store,
            default_auth,
        }
    }

    /// Restores a persisted session, if any.
    ///
    /// Both keys must be present, the token non-empty and the user record
    /// parseable; anything else leaves the session empty and storage
    /// untouched. Always clears the loading flag.
    pub async fn restore(&self) {
        let restored = self.load_credentials().await;

        let mut state = self.state.write().await;
        if let Some(credentials) = restored {
            tracing::info!(
                "[SessionManager] Restored session for user {}",
                credentials.user.id
            );
            self.default_auth.set(credentials.bearer());
            state.sign_in(credentials);
        }
        state.is_loading = false;
    }

    async fn load_credentials(&self) -> Option<Credentials> {
        let values = match self.store.multi_get(&[AUTH_TOKEN_KEY, USER_KEY]).await {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!("[SessionManager] Failed to read stored session: {}", e);
                return None;
            }
        };

        let mut values = values.into_iter();
        let token = values.next().flatten();
        let user_json = values.next().flatten();

        match (token, user_json) {
            (Some(token), Some(user_json)) if !token.is_empty() => {
                match serde_json::from_str::<UserIdentity>(&user_json) {
                    Ok(user) => Some(Credentials::new(token, user)),
                    Err(e) => {
                        tracing::warn!("[SessionManager] Stored user record is invalid: {}", e);
                        None
                    }
                }
            }
            (None, None) => {
                tracing::debug!("[SessionManager] No stored session");
                None
            }
            _ => {
                tracing::warn!("[SessionManager] Stored session is incomplete, ignoring it");
                None
            }
        }
    }

    /// Logs in with email and password.
    ///
    /// The stored user record carries the submitted email because the login
    /// response does not echo it.
    pub async fn login(&self, email: &str, password: &str) -> AuthOutcome {
        let request = LoginRequest::new(email, password);
        match self.auth_api.login(&request).await {
            Ok(response) => {
                let user = UserIdentity {
                    id: response.user_id,
                    username: response.username,
                    email: email.to_string(),
                };
                self.establish(Credentials::new(response.access_token, user))
                    .await;
                AuthOutcome::succeeded()
            }
            Err(err) => self.reject(&err, LOGIN_FAILED).await,
        }
    }

    /// Creates an account and logs it in.
    pub async fn register(&self, request: &RegisterRequest) -> AuthOutcome {
        match self.auth_api.register(request).await {
            Ok(response) => {
                let user = UserIdentity {
                    id: response.user_id,
                    username: request.username.clone(),
                    email: request.email.clone(),
                };
                self.establish(Credentials::new(response.access_token, user))
                    .await;
                AuthOutcome::succeeded()
            }
            Err(err) => self.reject(&err, REGISTRATION_FAILED).await,
        }
    }

    /// Persist first, then the default header, then memory.
    async fn establish(&self, credentials: Credentials) {
        self.persist(&credentials).await;
        self.default_auth.set(credentials.bearer());

        tracing::info!("[SessionManager] Signed in as user {}", credentials.user.id);
        self.state.write().await.sign_in(credentials);
    }

    async fn persist(&self, credentials: &Credentials) {
        let user_json = match serde_json::to_string(&credentials.user) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("[SessionManager] Failed to encode user record: {}", e);
                return;
            }
        };

        let entries = [
            (AUTH_TOKEN_KEY, credentials.token.clone()),
            (USER_KEY, user_json),
        ];
        if let Err(e) = self.store.multi_set(&entries).await {
            tracing::warn!(
                "[SessionManager] Failed to persist session, it will not survive a restart: {}",
                e
            );
        }
    }

    async fn reject(&self, err: &ApiError, fallback: &str) -> AuthOutcome {
        let message = err.user_message(fallback);
        tracing::warn!("[SessionManager] Authentication failed: {}", err);
        self.state.write().await.last_error = Some(message.clone());
        AuthOutcome::failed(message)
    }

    /// Ends the session. Never fails.
    ///
    /// If the combined removal fails, each key is removed on its own; every
    /// remaining failure is logged. Memory and the default header are
    /// cleared regardless.
    pub async fn logout(&self) {
        if let Err(e) = self.store.multi_remove(&[AUTH_TOKEN_KEY, USER_KEY]).await {
            tracing::warn!(
                "[SessionManager] Failed to clear stored session, retrying per key: {}",
                e
            );
            for key in [AUTH_TOKEN_KEY, USER_KEY] {
                if let Err(e) = self.store.remove_item(key).await {
                    tracing::error!("[SessionManager] Failed to remove '{}': {}", key, e);
                }
            }
        }

        self.default_auth.clear();
        self.state.write().await.sign_out();
        tracing::info!("[SessionManager] Signed out");
    }

    /// Reaction to a 401 from a protected endpoint: the token is no longer
    /// accepted, so the session ends.
    pub async fn handle_unauthorized(&self) {
        tracing::warn!("[SessionManager] Token rejected by server, signing out");
        self.logout().await;
    }

    /// Runs a protected call; a 401 result logs the user out before the
    /// error is returned to the caller.
    pub async fn guard<T, F>(&self, call: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        let result = call.await;
        if matches!(result, Err(ref err) if err.is_unauthorized()) {
            self.handle_unauthorized().await;
        }
        result
    }

    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    pub async fn user(&self) -> Option<UserIdentity> {
        self.state.read().await.user().cloned()
    }

    pub async fn token(&self) -> Option<String> {
        self.state.read().await.token().map(str::to_string)
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading
    }

    pub async fn last_error(&self) -> Option<String> {
        self.state.read().await.last_error.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_authenticated()
    }

    pub fn default_authorization(&self) -> &DefaultAuthorization {
        &self.default_auth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use evolvx_core::api::{LoginResponse, RegisterResponse};
    use evolvx_core::session::MemoryKeyValueStore;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ============================================================================
    // Mock AuthApi
    // ============================================================================

    struct MockAuthApi {
        login_result: Mutex<Result<LoginResponse, ApiError>>,
        register_result: Mutex<Result<RegisterResponse, ApiError>>,
        calls: AtomicUsize,
    }

    impl MockAuthApi {
        fn accepting() -> Self {
            Self {
                login_result: Mutex::new(Ok(LoginResponse {
                    access_token: "T".into(),
                    user_id: 7,
                    username: "lifter".into(),
                    message: Some("Login successful".into()),
                })),
                register_result: Mutex::new(Ok(RegisterResponse {
                    access_token: "R".into(),
                    user_id: 8,
                    message: None,
                })),
                calls: AtomicUsize::new(0),
            }
        }

        fn rejecting(error: ApiError) -> Self {
            let mock = Self::accepting();
            *mock.login_result.lock().unwrap() = Err(error.clone());
            *mock.register_result.lock().unwrap() = Err(error);
            mock
        }
    }

    #[async_trait]
    impl AuthApi for MockAuthApi {
        async fn login(&self, _request: &LoginRequest) -> Result<LoginResponse, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.login_result.lock().unwrap().clone()
        }

        async fn register(&self, _request: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.register_result.lock().unwrap().clone()
        }
    }

    fn manager(api: MockAuthApi, store: Arc<MemoryKeyValueStore>) -> SessionManager {
        SessionManager::new(Arc::new(api), store, DefaultAuthorization::new())
    }

    fn stored_user() -> String {
        r#"{"id":7,"username":"lifter","email":"lifter@example.com"}"#.to_string()
    }

    fn registration() -> RegisterRequest {
        RegisterRequest {
            username: "newbie".into(),
            email: "newbie@example.com".into(),
            password: "pw".into(),
            date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            gender: None,
            height: None,
            weight: None,
        }
    }

    // ============================================================================
    // restore
    // ============================================================================

    #[tokio::test]
    async fn test_restore_with_both_keys() {
        let store = Arc::new(MemoryKeyValueStore::with_entries([
            (AUTH_TOKEN_KEY, "T".to_string()),
            (USER_KEY, stored_user()),
        ]));
        let session = manager(MockAuthApi::accepting(), store);
        assert!(session.is_loading().await);

        session.restore().await;

        assert!(!session.is_loading().await);
        assert_eq!(session.token().await.as_deref(), Some("T"));
        assert_eq!(session.user().await.unwrap().email, "lifter@example.com");
        assert_eq!(
            session.default_authorization().get().as_deref(),
            Some("Bearer T")
        );
    }

    #[tokio::test]
    async fn test_restore_with_nothing_stored() {
        let session = manager(MockAuthApi::accepting(), Arc::new(MemoryKeyValueStore::new()));
        session.restore().await;

        assert!(!session.is_loading().await);
        assert!(!session.is_authenticated().await);
        assert!(!session.default_authorization().is_set());
    }

    #[tokio::test]
    async fn test_restore_with_token_only_stays_empty_and_keeps_storage() {
        let store = Arc::new(MemoryKeyValueStore::with_entries([(AUTH_TOKEN_KEY, "T")]));
        let session = manager(MockAuthApi::accepting(), store.clone());
        session.restore().await;

        assert!(!session.is_authenticated().await);
        assert_eq!(store.peek(AUTH_TOKEN_KEY).as_deref(), Some("T"));
    }

    #[tokio::test]
    async fn test_restore_with_corrupt_user_stays_empty() {
        let store = Arc::new(MemoryKeyValueStore::with_entries([
            (AUTH_TOKEN_KEY, "T"),
            (USER_KEY, "{not json"),
        ]));
        let session = manager(MockAuthApi::accepting(), store);
        session.restore().await;

        assert!(!session.is_authenticated().await);
        assert!(!session.is_loading().await);
    }

    #[tokio::test]
    async fn test_restore_with_empty_token_stays_empty() {
        let store = Arc::new(MemoryKeyValueStore::with_entries([
            (AUTH_TOKEN_KEY, String::new()),
            (USER_KEY, stored_user()),
        ]));
        let session = manager(MockAuthApi::accepting(), store);
        session.restore().await;

        assert!(!session.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_restore_absorbs_storage_failure() {
        let store = Arc::new(MemoryKeyValueStore::with_entries([
            (AUTH_TOKEN_KEY, "T".to_string()),
            (USER_KEY, stored_user()),
        ]));
        store.fail_reads(true);
        let session = manager(MockAuthApi::accepting(), store);
        session.restore().await;

        assert!(!session.is_loading().await);
        assert!(!session.is_authenticated().await);
    }

    // ============================================================================
    // login / register
    // ============================================================================

    #[tokio::test]
    async fn test_login_success_persists_and_sets_header() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let session = manager(MockAuthApi::accepting(), store.clone());

        let outcome = session.login("lifter@example.com", "pw").await;

        assert_eq!(outcome, AuthOutcome::succeeded());
        assert_eq!(store.peek(AUTH_TOKEN_KEY).as_deref(), Some("T"));
        let persisted: UserIdentity =
            serde_json::from_str(&store.peek(USER_KEY).unwrap()).unwrap();
        assert_eq!(
            persisted,
            UserIdentity {
                id: 7,
                username: "lifter".into(),
                email: "lifter@example.com".into(),
            }
        );
        assert_eq!(session.token().await.as_deref(), Some("T"));
        assert_eq!(
            session.default_authorization().get().as_deref(),
            Some("Bearer T")
        );
    }

    #[tokio::test]
    async fn test_login_with_invalid_credentials_changes_nothing() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let session = manager(
            MockAuthApi::rejecting(ApiError::from_response(
                401,
                r#"{"error": "Invalid credentials"}"#,
            )),
            store.clone(),
        );
        session.restore().await;
        let before = session.snapshot().await;

        let outcome = session.login("lifter@example.com", "wrong").await;

        assert_eq!(outcome, AuthOutcome::failed("Invalid credentials"));
        assert!(store.is_empty());
        assert_eq!(session.token().await, None);
        assert_eq!(session.user().await, None);
        assert_eq!(session.last_error().await.as_deref(), Some("Invalid credentials"));
        assert_eq!(session.snapshot().await.token(), before.token());
    }

    #[tokio::test]
    async fn test_login_failure_keeps_existing_session() {
        let store = Arc::new(MemoryKeyValueStore::with_entries([
            (AUTH_TOKEN_KEY, "OLD".to_string()),
            (USER_KEY, stored_user()),
        ]));
        let session = manager(
            MockAuthApi::rejecting(ApiError::Transport("connection refused".into())),
            store.clone(),
        );
        session.restore().await;

        let outcome = session.login("lifter@example.com", "pw").await;

        assert_eq!(outcome, AuthOutcome::failed("Login failed"));
        assert_eq!(session.token().await.as_deref(), Some("OLD"));
        assert_eq!(store.peek(AUTH_TOKEN_KEY).as_deref(), Some("OLD"));
    }

    #[tokio::test]
    async fn test_login_completes_in_memory_when_persist_fails() {
        let store = Arc::new(MemoryKeyValueStore::new());
        store.fail_writes(true);
        let session = manager(MockAuthApi::accepting(), store.clone());

        let outcome = session.login("lifter@example.com", "pw").await;

        assert!(outcome.success);
        assert!(store.is_empty());
        assert!(session.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_successful_login_clears_previous_error() {
        let api = MockAuthApi::rejecting(ApiError::Server {
            status: 400,
            message: Some("Email and password are required".into()),
        });
        let store = Arc::new(MemoryKeyValueStore::new());
        let api = Arc::new(api);
        let session = SessionManager::new(api.clone(), store, DefaultAuthorization::new());

        session.login("", "").await;
        assert!(session.last_error().await.is_some());

        *api.login_result.lock().unwrap() = MockAuthApi::accepting()
            .login_result
            .into_inner()
            .unwrap();
        session.login("lifter@example.com", "pw").await;
        assert_eq!(session.last_error().await, None);
        assert_eq!(api.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_register_success_builds_user_from_request() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let session = manager(MockAuthApi::accepting(), store.clone());

        let outcome = session.register(&registration()).await;

        assert!(outcome.success);
        let user = session.user().await.unwrap();
        assert_eq!(user.id, 8);
        assert_eq!(user.username, "newbie");
        assert_eq!(user.email, "newbie@example.com");
        assert_eq!(store.peek(AUTH_TOKEN_KEY).as_deref(), Some("R"));
    }

    #[tokio::test]
    async fn test_register_failure_uses_server_message_or_fallback() {
        let session = manager(
            MockAuthApi::rejecting(ApiError::from_response(
                400,
                r#"{"error": "Email already registered"}"#,
            )),
            Arc::new(MemoryKeyValueStore::new()),
        );
        assert_eq!(
            session.register(&registration()).await,
            AuthOutcome::failed("Email already registered")
        );

        let session = manager(
            MockAuthApi::rejecting(ApiError::Server {
                status: 500,
                message: None,
            }),
            Arc::new(MemoryKeyValueStore::new()),
        );
        assert_eq!(
            session.register(&registration()).await,
            AuthOutcome::failed("Registration failed")
        );
    }

    // ============================================================================
    // logout / unauthorized
    // ============================================================================

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let session = manager(MockAuthApi::accepting(), store.clone());
        session.login("lifter@example.com", "pw").await;

        session.logout().await;

        assert_eq!(store.peek(AUTH_TOKEN_KEY), None);
        assert_eq!(store.peek(USER_KEY), None);
        assert!(!session.default_authorization().is_set());
        assert!(!session.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_logout_falls_back_to_single_removals() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let session = manager(MockAuthApi::accepting(), store.clone());
        session.login("lifter@example.com", "pw").await;
        store.fail_multi_remove(true);

        session.logout().await;

        assert_eq!(store.peek(AUTH_TOKEN_KEY), None);
        assert_eq!(store.peek(USER_KEY), None);
        assert!(!session.default_authorization().is_set());
    }

    #[tokio::test]
    async fn test_logout_swallows_total_storage_failure() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let session = manager(MockAuthApi::accepting(), store.clone());
        session.login("lifter@example.com", "pw").await;
        store.fail_writes(true);
        store.fail_multi_remove(true);

        session.logout().await;

        assert!(!session.is_authenticated().await);
        assert!(!session.default_authorization().is_set());
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let session = manager(MockAuthApi::accepting(), Arc::new(MemoryKeyValueStore::new()));
        session.logout().await;
        session.logout().await;
        assert!(!session.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_guard_logs_out_on_401_only() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let session = manager(MockAuthApi::accepting(), store.clone());
        session.login("lifter@example.com", "pw").await;

        let result: Result<(), ApiError> = session
            .guard(async {
                Err(ApiError::Server {
                    status: 500,
                    message: None,
                })
            })
            .await;
        assert!(result.is_err());
        assert!(session.is_authenticated().await);

        let result: Result<(), ApiError> = session
            .guard(async { Err(ApiError::Unauthorized { message: None }) })
            .await;
        assert!(result.unwrap_err().is_unauthorized());
        assert!(!session.is_authenticated().await);
        assert_eq!(store.peek(AUTH_TOKEN_KEY), None);
    }

    #[tokio::test]
    async fn test_guard_passes_success_through() {
        let session = manager(MockAuthApi::accepting(), Arc::new(MemoryKeyValueStore::new()));
        let value = session.guard(async { Ok::<_, ApiError>(42) }).await;
        assert_eq!(value, Ok(42));
    }
}
