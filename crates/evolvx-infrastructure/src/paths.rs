//! Unified path management for evolvx configuration files.
//!
//! The platform config directory comes from `dirs`; `EVOLVX_HOME` replaces it
//! entirely, which is how tests and throwaway profiles isolate themselves.

use std::path::PathBuf;

/// Environment variable that overrides the evolvx home directory.
pub const HOME_ENV: &str = "EVOLVX_HOME";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for evolvx_core::EvolvxError {
    fn from(e: PathError) -> Self {
        evolvx_core::EvolvxError::config(e.to_string())
    }
}

/// Path layout of an evolvx home.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/evolvx/          # Home (or $EVOLVX_HOME)
/// ├── config.toml            # Client configuration
/// ├── storage.toml           # Durable key-value store (auth_token, user), 0600
/// └── logs/
///     └── evolvx.log.YYYY-MM-DD
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvolvxPaths {
    home: PathBuf,
}

impl EvolvxPaths {
    /// Resolves the home from `EVOLVX_HOME`, else the platform config dir.
    pub fn resolve() -> Result<Self, PathError> {
        if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_home(PathBuf::from(home)));
        }
        dirs::config_dir()
            .map(|dir| Self::with_home(dir.join("evolvx")))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Uses an explicit home directory.
    pub fn with_home(home: PathBuf) -> Self {
        Self { home }
    }

    pub fn home(&self) -> &PathBuf {
        &self.home
    }

    pub fn config_file(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Path of the durable key-value store.
    ///
    /// Holds the bearer token; it is written with 600 permissions on Unix.
    pub fn storage_file(&self) -> PathBuf {
        self.home.join("storage.toml")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.home.join("logs")
    }
}
