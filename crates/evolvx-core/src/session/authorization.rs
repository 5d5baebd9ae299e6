//! Default `Authorization` header shared between the session manager and the
//! HTTP client.

use std::sync::{Arc, RwLock};

/// The shared client's default `Authorization` header value.
///
/// Cloning yields another handle to the same cell. Only the session manager
/// writes it; the request decorator reads it as a fallback when durable
/// storage cannot be read.
#[derive(Debug, Clone, Default)]
pub struct DefaultAuthorization {
    header: Arc<RwLock<Option<String>>>,
}

impl DefaultAuthorization {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current header value (e.g. `Bearer abc`), if any.
    pub fn get(&self) -> Option<String> {
        match self.header.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set(&self, value: impl Into<String>) {
        let value = value.into();
        match self.header.write() {
            Ok(mut guard) => *guard = Some(value),
            Err(poisoned) => *poisoned.into_inner() = Some(value),
        }
    }

    pub fn clear(&self) {
        match self.header.write() {
            Ok(mut guard) => *guard = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }

    pub fn is_set(&self) -> bool {
        self.get().is_some()
    }
}
