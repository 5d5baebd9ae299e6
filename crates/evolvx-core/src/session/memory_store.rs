//! In-memory [`KeyValueStore`], used for ephemeral runs and tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use super::storage::KeyValueStore;
use crate::error::{EvolvxError, Result};

/// Keeps entries in a `HashMap`. Nothing survives the process.
///
/// Failures can be injected per operation kind to exercise the session
/// manager's error absorption.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    fail_multi_remove: AtomicBool,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `entries`.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        {
            let mut map = store.lock();
            for (key, value) in entries {
                map.insert(key.into(), value.into());
            }
        }
        store
    }

    /// Makes every read fail.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes every write fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Makes multi-key removal fail while single-key removal still works.
    pub fn fail_multi_remove(&self, fail: bool) {
        self.fail_multi_remove.store(fail, Ordering::SeqCst);
    }

    /// Direct synchronous view, for assertions.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn multi_get(&self, keys: &[&str]) -> Result<Vec<Option<String>>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(EvolvxError::storage("injected read failure"));
        }
        let map = self.lock();
        Ok(keys.iter().map(|key| map.get(*key).cloned()).collect())
    }

    async fn multi_set(&self, entries: &[(&str, String)]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(EvolvxError::storage("injected write failure"));
        }
        let mut map = self.lock();
        for (key, value) in entries {
            map.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }

    async fn multi_remove(&self, keys: &[&str]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) || self.fail_multi_remove.load(Ordering::SeqCst)
        {
            return Err(EvolvxError::storage("injected remove failure"));
        }
        let mut map = self.lock();
        for key in keys {
            map.remove(*key);
        }
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(EvolvxError::storage("injected remove failure"));
        }
        self.lock().remove(key);
        Ok(())
    }
}
