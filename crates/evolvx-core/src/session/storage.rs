//! Durable key-value storage trait.
//!
//! Defines the interface the session manager uses to persist the token and
//! user record across restarts.

use async_trait::async_trait;

use crate::error::Result;

/// Storage key holding the raw bearer token.
pub const AUTH_TOKEN_KEY: &str = "auth_token";
/// Storage key holding the JSON-serialized [`super::UserIdentity`].
pub const USER_KEY: &str = "user";

/// A local persistent key-value store that survives process restarts.
///
/// The multi-key operations are the primitives: the session manager always
/// reads, writes and removes the token and user record together so that the
/// pair stays consistent. Implementations must apply a multi-key write or
/// removal as one unit.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads several keys at once. The result has one entry per key, in order.
    async fn multi_get(&self, keys: &[&str]) -> Result<Vec<Option<String>>>;

    /// Writes several entries at once.
    async fn multi_set(&self, entries: &[(&str, String)]) -> Result<()>;

    /// Removes several keys at once. Missing keys are not an error.
    async fn multi_remove(&self, keys: &[&str]) -> Result<()>;

    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let mut values = self.multi_get(&[key]).await?;
        Ok(values.pop().flatten())
    }

    async fn set_item(&self, key: &str, value: String) -> Result<()> {
        self.multi_set(&[(key, value)]).await
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        self.multi_remove(&[key]).await
    }
}
