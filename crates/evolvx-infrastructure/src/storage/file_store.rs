//! File-backed durable key-value store.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use evolvx_core::session::KeyValueStore;
use evolvx_core::{EvolvxError, Result};

use super::atomic_toml::AtomicTomlFile;

type Entries = BTreeMap<String, String>;

/// [`KeyValueStore`] kept in a single owner-only TOML file.
///
/// Every multi-key write or removal is one locked read-modify-write of the
/// whole document, so the token and user record always change together.
/// File I/O runs on tokio's blocking pool.
#[derive(Clone)]
pub struct FileKeyValueStore {
    file: Arc<AtomicTomlFile<Entries>>,
}

impl FileKeyValueStore {
    /// Opens the store at `path`, normally
    /// [`crate::paths::EvolvxPaths::storage_file`].
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicTomlFile::new(path).private()),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }

    async fn blocking<F, R>(&self, op: F) -> Result<R>
    where
        F: FnOnce(&AtomicTomlFile<Entries>) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let file = Arc::clone(&self.file);
        tokio::task::spawn_blocking(move || op(&file))
            .await
            .map_err(|e| EvolvxError::internal(format!("storage task failed: {}", e)))?
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn multi_get(&self, keys: &[&str]) -> Result<Vec<Option<String>>> {
        let keys: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        self.blocking(move |file| {
            let entries = file.load()?.unwrap_or_default();
            Ok(keys.iter().map(|k| entries.get(k).cloned()).collect())
        })
        .await
    }

    async fn multi_set(&self, entries: &[(&str, String)]) -> Result<()> {
        let owned: Vec<(String, String)> = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        let count = owned.len();
        self.blocking(move |file| {
            file.update(Entries::new(), |doc| {
                doc.extend(owned);
                Ok(())
            })?;
            Ok(())
        })
        .await?;
        tracing::debug!("[Storage] Wrote {} key(s)", count);
        Ok(())
    }

    async fn multi_remove(&self, keys: &[&str]) -> Result<()> {
        let keys: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        self.blocking(move |file| {
            if !file.path().exists() {
                return Ok(());
            }
            file.update(Entries::new(), |doc| {
                for key in &keys {
                    doc.remove(key);
                }
                Ok(())
            })?;
            Ok(())
        })
        .await
    }
}
