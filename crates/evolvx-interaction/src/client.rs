//! Shared HTTP client for the Evolvx REST API.

use std::sync::Arc;
use std::time::Duration;

use evolvx_core::api::ApiError;
use evolvx_core::config::{API_URL_ENV, ApiSettings};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::decorator::RequestDecorator;

/// The process-wide API client.
///
/// Cloning is cheap: the connection pool and the decorator are shared. Every
/// request built through [`ApiClient::request`] passes through the decorator.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    decorator: Arc<dyn RequestDecorator>,
}

impl ApiClient {
    /// Creates a client rooted at `base_url` (which already ends in `/api`).
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        decorator: Arc<dyn RequestDecorator>,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to build HTTP client: {e}")))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        tracing::debug!("[ApiClient] Base URL: {}", base_url);

        Ok(Self {
            http,
            base_url,
            decorator,
        })
    }

    /// Creates a client from configuration. `EVOLVX_API_URL` overrides the
    /// configured base URL.
    pub fn from_settings(
        settings: &ApiSettings,
        decorator: Arc<dyn RequestDecorator>,
    ) -> evolvx_core::Result<Self> {
        let override_url = std::env::var(API_URL_ENV).ok();
        let base_url = settings.resolve_base_url(override_url.as_deref())?;
        Self::new(base_url, Duration::from_secs(settings.timeout_secs), decorator)
            .map_err(|e| evolvx_core::EvolvxError::config(e.to_string()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Builds a decorated request for `path` under the base URL.
    pub async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        self.decorator.decorate(builder).await
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.request(Method::GET, path).await).await
    }

    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send(self.request(Method::GET, path).await.query(query))
            .await
    }

    pub(crate) async fn send_json<T, B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.request(method, path).await.json(body)).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.request(Method::DELETE, path).await).await
    }

    /// Dispatches a request and decodes the response.
    pub async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        let status = response.status().as_u16();
        let url = response.url().path().to_string();
        let body = response
            .bytes()
            .await
            .map_err(|err| ApiError::Transport(format!("Failed to read response body: {err}")))?;

        let result = decode_response(status, &body);
        if let Err(ref err) = result {
            tracing::debug!("[ApiClient] {} failed: {}", url, err);
        }
        result
    }
}

/// Maps a received response to the endpoint's record type or an [`ApiError`].
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        let body_text = String::from_utf8_lossy(body);
        return Err(ApiError::from_response(status, &body_text));
    }
    serde_json::from_slice(body).map_err(|err| ApiError::Decode(err.to_string()))
}

/// Masks failures of endpoints whose data is optional for the caller.
///
/// Anything except 401 becomes an empty list, logged as a warning naming the
/// endpoint. 401 always propagates so the caller can log the user out.
pub fn empty_unless_unauthorized<T>(
    endpoint: &str,
    result: Result<Vec<T>, ApiError>,
) -> Result<Vec<T>, ApiError> {
    match result {
        Err(err) if !err.is_unauthorized() => {
            tracing::warn!("[ApiClient] {} unavailable, showing empty list: {}", endpoint, err);
            Ok(Vec::new())
        }
        other => other,
    }
}
