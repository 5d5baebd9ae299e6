//! Hooks applied to every outgoing request before dispatch.

use std::sync::Arc;

use async_trait::async_trait;
use evolvx_core::session::{AUTH_TOKEN_KEY, DefaultAuthorization, KeyValueStore, bearer_value};
use reqwest::RequestBuilder;
use reqwest::header::AUTHORIZATION;

/// Transforms a request before it is sent.
#[async_trait]
pub trait RequestDecorator: Send + Sync {
    async fn decorate(&self, request: RequestBuilder) -> RequestBuilder;
}

/// Sends requests unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Undecorated;

#[async_trait]
impl RequestDecorator for Undecorated {
    async fn decorate(&self, request: RequestBuilder) -> RequestBuilder {
        request
    }
}

/// Attaches `Authorization: Bearer <token>` from durable storage.
///
/// The token is read fresh on every request, so a logout in another handle
/// takes effect immediately. When the store cannot be read, the session
/// manager's cached default header is used instead.
#[derive(Clone)]
pub struct BearerTokenDecorator {
    store: Arc<dyn KeyValueStore>,
    default_auth: DefaultAuthorization,
}

impl BearerTokenDecorator {
    pub fn new(store: Arc<dyn KeyValueStore>, default_auth: DefaultAuthorization) -> Self {
        Self {
            store,
            default_auth,
        }
    }
}

#[async_trait]
impl RequestDecorator for BearerTokenDecorator {
    async fn decorate(&self, request: RequestBuilder) -> RequestBuilder {
        match self.store.get_item(AUTH_TOKEN_KEY).await {
            Ok(Some(token)) if !token.is_empty() => {
                request.header(AUTHORIZATION, bearer_value(&token))
            }
            Ok(_) => request,
            Err(e) => {
                tracing::warn!("[ApiClient] Token lookup failed, using default header: {}", e);
                match self.default_auth.get() {
                    Some(header) => request.header(AUTHORIZATION, header),
                    None => request,
                }
            }
        }
    }
}
