//! Configuration service implementation.
//!
//! Loads the client configuration from `config.toml` in the evolvx home.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use evolvx_core::Result;
use evolvx_core::config::ClientConfig;

use crate::paths::EvolvxPaths;
use crate::storage::AtomicTomlFile;

/// Loads and caches the client configuration.
///
/// A missing or empty file yields the defaults. A malformed file is an error
/// rather than a silent fallback, so a typo in `base_url` is not ignored.
#[derive(Clone)]
pub struct ConfigService {
    path: PathBuf,
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    /// Uses `config.toml` under the resolved evolvx home.
    pub fn new() -> Result<Self> {
        let paths = EvolvxPaths::resolve()?;
        Ok(Self::with_path(paths.config_file()))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<ClientConfig> {
        if let Ok(read_lock) = self.config.read() {
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = AtomicTomlFile::<ClientConfig>::new(self.path.clone())
            .load()?
            .unwrap_or_default();
        tracing::debug!("[Config] Loaded configuration from {}", self.path.display());

        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Writes `config` to disk and replaces the cached copy.
    pub fn save_config(&self, config: &ClientConfig) -> Result<()> {
        AtomicTomlFile::new(self.path.clone()).save(config)?;
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = Some(config.clone());
        }
        Ok(())
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evolvx_core::config::ApiEnvironment;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(dir.path().join("config.toml"));

        let config = service.get_config().unwrap();
        assert_eq!(config.api.environment, ApiEnvironment::Local);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_file_merges_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[api]\nenvironment = \"custom\"\nbase_url = \"https://evolvx.example/api\"\n",
        )
        .unwrap();

        let config = ConfigService::with_path(path).get_config().unwrap();
        assert_eq!(config.api.environment, ApiEnvironment::Custom);
        assert_eq!(config.api.timeout_secs, 15);
        assert_eq!(
            config.api.resolve_base_url(None).unwrap(),
            "https://evolvx.example/api"
        );
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\n").unwrap();

        assert!(ConfigService::with_path(path).get_config().is_err());
    }

    #[test]
    fn test_cache_until_invalidated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let service = ConfigService::with_path(path.clone());
        assert_eq!(service.get_config().unwrap().api.page_size, 10);

        std::fs::write(&path, "[api]\npage_size = 25\n").unwrap();
        assert_eq!(service.get_config().unwrap().api.page_size, 10);

        service.invalidate_cache();
        assert_eq!(service.get_config().unwrap().api.page_size, 25);
    }

    #[test]
    fn test_save_then_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let service = ConfigService::with_path(path.clone());

        let mut config = ClientConfig::default();
        config.api.environment = ApiEnvironment::AndroidEmulator;
        service.save_config(&config).unwrap();

        let fresh = ConfigService::with_path(path).get_config().unwrap();
        assert_eq!(fresh.api.environment, ApiEnvironment::AndroidEmulator);
    }
}
