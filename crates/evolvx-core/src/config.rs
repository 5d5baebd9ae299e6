//! Client configuration model.
//!
//! Loaded from `config.toml` by the infrastructure layer. Every field has a
//! default so a missing or partial file still yields a usable config.

use serde::{Deserialize, Serialize};

use crate::error::{EvolvxError, Result};

/// Environment variable that overrides the API base URL.
pub const API_URL_ENV: &str = "EVOLVX_API_URL";

const LOCAL_BASE_URL: &str = "http://localhost:5000/api";
const ANDROID_EMULATOR_BASE_URL: &str = "http://10.0.2.2:5000/api";

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Where the remote API lives.
///
/// The backend is reached through a different host depending on where the
/// client runs (a desktop shell sees `localhost`, an Android emulator sees the
/// host machine as `10.0.2.2`).
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ApiEnvironment {
    #[default]
    Local,
    AndroidEmulator,
    Custom,
}

impl ApiEnvironment {
    fn default_base_url(self) -> Option<&'static str> {
        match self {
            ApiEnvironment::Local => Some(LOCAL_BASE_URL),
            ApiEnvironment::AndroidEmulator => Some(ANDROID_EMULATOR_BASE_URL),
            ApiEnvironment::Custom => None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ApiSettings {
    #[serde(default)]
    pub environment: ApiEnvironment,
    /// Explicit base URL; wins over `environment`.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_page_size() -> u32 {
    10
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            environment: ApiEnvironment::default(),
            base_url: None,
            timeout_secs: default_timeout_secs(),
            page_size: default_page_size(),
        }
    }
}

impl ApiSettings {
    /// Resolves the base URL, honouring `override_url` (usually the value of
    /// [`API_URL_ENV`]) first, then `base_url`, then the environment default.
    ///
    /// The result never ends with a slash.
    pub fn resolve_base_url(&self, override_url: Option<&str>) -> Result<String> {
        let chosen = override_url
            .filter(|url| !url.trim().is_empty())
            .or(self.base_url.as_deref().filter(|url| !url.trim().is_empty()))
            .or(self.environment.default_base_url())
            .ok_or_else(|| {
                EvolvxError::config("api.environment is \"custom\" but api.base_url is not set")
            })?;

        let trimmed = chosen.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(EvolvxError::config(format!(
                "API base URL must start with http:// or https://, got '{trimmed}'"
            )));
        }
        Ok(trimmed.to_string())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Filter directive used when `EVOLVX_LOG` is unset (e.g. `info`,
    /// `evolvx_application=debug`).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Also write a daily-rolling log file under the config directory.
    #[serde(default = "default_true")]
    pub file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: true,
        }
    }
}
