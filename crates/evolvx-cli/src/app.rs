//! Process wiring: one store, one client, one session manager.

use std::future::Future;
use std::sync::Arc;

use anyhow::{Result, anyhow, bail};
use evolvx_application::{DashboardUseCase, SessionManager};
use evolvx_core::api::ApiError;
use evolvx_core::config::ClientConfig;
use evolvx_core::session::{DefaultAuthorization, KeyValueStore, MemoryKeyValueStore, UserIdentity};
use evolvx_infrastructure::{EvolvxPaths, FileKeyValueStore};
use evolvx_interaction::{ApiClient, BearerTokenDecorator};

pub struct App {
    pub config: ClientConfig,
    pub session: Arc<SessionManager>,
    pub client: ApiClient,
    pub dashboard: DashboardUseCase,
}

impl App {
    /// Builds the object graph and restores any persisted session.
    ///
    /// With `ephemeral`, nothing is read from or written to disk.
    pub async fn start(paths: &EvolvxPaths, config: ClientConfig, ephemeral: bool) -> Result<Self> {
        let store: Arc<dyn KeyValueStore> = if ephemeral {
            tracing::info!("[Bootstrap] Using in-memory storage");
            Arc::new(MemoryKeyValueStore::new())
        } else {
            Arc::new(FileKeyValueStore::with_path(paths.storage_file()))
        };

        let default_auth = DefaultAuthorization::new();
        let decorator = Arc::new(BearerTokenDecorator::new(store.clone(), default_auth.clone()));
        let client = ApiClient::from_settings(&config.api, decorator)?;
        tracing::info!("[Bootstrap] API base URL: {}", client.base_url());

        let session = Arc::new(SessionManager::new(
            Arc::new(client.clone()),
            store,
            default_auth,
        ));
        session.restore().await;

        let dashboard = DashboardUseCase::new(
            Arc::new(client.clone()),
            session.clone(),
            config.api.page_size,
        );

        Ok(Self {
            config,
            session,
            client,
            dashboard,
        })
    }

    /// The signed-in user, or an error telling the user to log in.
    pub async fn require_user(&self) -> Result<UserIdentity> {
        match self.session.user().await {
            Some(user) => Ok(user),
            None => bail!("Not logged in. Run `evolvx login` first."),
        }
    }

    /// Runs a protected call for the signed-in user.
    pub async fn protected<T, F>(&self, call: F) -> Result<T>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        self.require_user().await?;
        self.session.guard(call).await.map_err(describe)
    }
}

/// User-facing message for a failed API call.
pub fn describe(err: ApiError) -> anyhow::Error {
    match err {
        ApiError::Unauthorized { .. } => anyhow!("Session expired. Please log in again."),
        ApiError::Transport(_) => anyhow!("Cannot reach the server ({err})"),
        other => anyhow!(other.user_message(&other.to_string())),
    }
}
