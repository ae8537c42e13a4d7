//! Application configuration
//!
//! Loaded from a TOML file, then overridden by `PVT_*` environment
//! variables. A missing file yields the defaults.

use pvt_gateway::{EdgeFunctionClient, ServiceEndpoint};
use pvt_session::SessionConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "PVT_CONFIG";
/// Config file used when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "phrasal-table.toml";

/// Configuration failure
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File exists but could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        /// File path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// File is not valid TOML for [`AppConfig`]
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Required value missing
    #[error("missing setting: {0}")]
    Missing(&'static str),
}

/// Remote service settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Project base URL
    pub base_url: String,
    /// Public API key
    pub api_key: String,
    /// Signed-in user's access token
    pub access_token: Option<String>,
    /// Signed-in user id
    pub user_id: Option<String>,
    /// Row table name
    pub table: String,
    /// Translation function name
    pub translate_function: String,
    /// Example function name
    pub example_function: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            access_token: None,
            user_id: None,
            table: "phrasal_verbs".to_string(),
            translate_function: EdgeFunctionClient::TRANSLATE_FUNCTION.to_string(),
            example_function: EdgeFunctionClient::EXAMPLE_FUNCTION.to_string(),
        }
    }
}

impl ServiceConfig {
    /// Endpoint for the gateway adapters
    ///
    /// # Errors
    /// `ConfigError::Missing` when the base URL or API key is empty
    pub fn endpoint(&self) -> Result<ServiceEndpoint, ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::Missing("service.base_url"));
        }
        if self.api_key.is_empty() {
            return Err(ConfigError::Missing("service.api_key"));
        }
        let endpoint = ServiceEndpoint::new(&self.base_url, &self.api_key);
        Ok(match &self.access_token {
            Some(token) => endpoint.with_access_token(token),
            None => endpoint,
        })
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Remote services
    pub service: ServiceConfig,
    /// Session tunables
    pub session: SessionConfig,
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            session: SessionConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Parse TOML text
    ///
    /// # Errors
    /// `ConfigError::Parse` for malformed input
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load `path`, falling back to defaults when it does not exist
    ///
    /// # Errors
    /// `ConfigError::Read` or `ConfigError::Parse`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Apply overrides from `lookup`
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("PVT_BASE_URL") {
            self.service.base_url = v;
        }
        if let Some(v) = lookup("PVT_API_KEY") {
            self.service.api_key = v;
        }
        if let Some(v) = lookup("PVT_ACCESS_TOKEN") {
            self.service.access_token = Some(v);
        }
        if let Some(v) = lookup("PVT_USER_ID") {
            self.service.user_id = Some(v);
        }
        self
    }

    /// Apply overrides from the process environment
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
    }
}

/// Config path from the flag, then `PVT_CONFIG`, then the default file
#[must_use]
pub fn config_path(flag: Option<&str>) -> PathBuf {
    if let Some(path) = flag {
        return PathBuf::from(path);
    }
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    PathBuf::from(DEFAULT_CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            log_level = "debug"

            [service]
            base_url = "https://abc.example.co"
            api_key = "anon"

            [session]
            save_debounce_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.service.table, "phrasal_verbs");
        assert_eq!(config.service.translate_function, "translate-phrasal-verb");
        assert_eq!(config.session.save_debounce_ms, 250);
        assert_eq!(config.session.example_cache_capacity, 512);
    }

    #[test]
    fn overrides_win() {
        let env: HashMap<&str, &str> = [
            ("PVT_BASE_URL", "https://other.example.co"),
            ("PVT_USER_ID", "u-42"),
        ]
        .into_iter()
        .collect();

        let config = AppConfig::default()
            .with_overrides(|k| env.get(k).map(|v| (*v).to_string()));
        assert_eq!(config.service.base_url, "https://other.example.co");
        assert_eq!(config.service.user_id.as_deref(), Some("u-42"));
        assert_eq!(config.service.access_token, None);
    }

    #[test]
    fn endpoint_requires_url_and_key() {
        let mut service = ServiceConfig::default();
        assert!(matches!(
            service.endpoint(),
            Err(ConfigError::Missing("service.base_url"))
        ));
        service.base_url = "https://abc.example.co".into();
        assert!(matches!(
            service.endpoint(),
            Err(ConfigError::Missing("service.api_key"))
        ));
        service.api_key = "anon".into();
        service.access_token = Some("jwt".into());
        assert_eq!(service.endpoint().unwrap().access_token.as_deref(), Some("jwt"));
    }

    #[test]
    fn missing_file_is_default() {
        let config = AppConfig::load(Path::new("/nonexistent/phrasal-table.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(matches!(
            AppConfig::from_toml_str("service = 3"),
            Err(ConfigError::Parse(_))
        ));
    }
}
