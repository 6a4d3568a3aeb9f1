//! Storefront client configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::loading::LoadingIndicator;
use crate::slice::ResponseOrdering;

/// Environment variable overriding `api.base_url`.
pub const ENV_API_BASE_URL: &str = "SHOP_API_BASE_URL";
/// Environment variable overriding `api.platform_url`.
pub const ENV_PLATFORM_URL: &str = "SHOP_PLATFORM_URL";
/// Environment variable overriding `auth.token_file`.
pub const ENV_TOKEN_FILE: &str = "SHOP_TOKEN_FILE";

/// Client configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub sync: SyncConfig,

    #[serde(default)]
    pub loading: LoadingConfig,
}

impl StorefrontConfig {
    /// Load config from a TOML file, or JSON when the extension says so.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;

        let is_json = path.extension().is_some_and(|ext| ext == "json");
        let parsed = if is_json {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        } else {
            toml::from_str(&content).map_err(|e| e.to_string())
        };
        parsed.map_err(|message| ConfigError::Parse {
            path: display,
            message,
        })
    }

    /// Apply `SHOP_*` environment overrides from the process environment.
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup.
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let set = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = set(ENV_API_BASE_URL) {
            self.api.base_url = url;
        }
        if let Some(url) = set(ENV_PLATFORM_URL) {
            self.api.platform_url = Some(url);
        }
        if let Some(path) = set(ENV_TOKEN_FILE) {
            self.auth.token_file = Some(PathBuf::from(path));
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_http_url(&self.api.base_url) {
            return Err(ConfigError::Invalid(format!(
                "api.base_url must start with http:// or https://, got {:?}",
                self.api.base_url
            )));
        }
        if let Some(url) = &self.api.platform_url {
            if !is_http_url(url) {
                return Err(ConfigError::Invalid(format!(
                    "api.platform_url must start with http:// or https://, got {:?}",
                    url
                )));
            }
        }
        if self.sync.page_size <= 0 {
            return Err(ConfigError::Invalid(format!(
                "sync.page_size must be positive, got {}",
                self.sync.page_size
            )));
        }
        Ok(())
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Remote API endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every relative request path is joined to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Public storefront URL, used to build shareable links.
    #[serde(default)]
    pub platform_url: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:8000/api/v1".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            platform_url: None,
        }
    }
}

/// Credential persistence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// File holding the persisted access token. Without one the token lives
    /// only as long as the process.
    #[serde(default)]
    pub token_file: Option<PathBuf>,
}

/// Response handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default)]
    pub ordering: ResponseOrdering,

    /// Products per listing page.
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page_size() -> i64 {
    12
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            ordering: ResponseOrdering::default(),
            page_size: default_page_size(),
        }
    }
}

/// Loading indicator behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadingConfig {
    #[serde(default = "default_min_display_ms")]
    pub min_display_ms: u64,
}

fn default_min_display_ms() -> u64 {
    500
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            min_display_ms: default_min_display_ms(),
        }
    }
}

impl LoadingConfig {
    pub fn min_display(&self) -> Duration {
        Duration::from_millis(self.min_display_ms)
    }

    /// Loading indicator using the configured minimum display time.
    pub fn indicator(&self) -> LoadingIndicator {
        LoadingIndicator::new(self.min_display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.sync.page_size, 12);
        assert_eq!(config.sync.ordering, ResponseOrdering::LastSettled);
        assert_eq!(config.loading.min_display(), Duration::from_millis(500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[api]
base_url = "https://api.shop.test"

[sync]
ordering = "latest-issued"
"#
        )
        .unwrap();

        let config = StorefrontConfig::load(file.path()).unwrap();
        assert_eq!(config.api.base_url, "https://api.shop.test");
        assert_eq!(config.sync.ordering, ResponseOrdering::LatestIssued);
        assert_eq!(config.sync.page_size, 12);
    }

    #[test]
    fn test_load_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"loading": {{"min_display_ms": 250}}}}"#).unwrap();

        let config = StorefrontConfig::load(file.path()).unwrap();
        assert_eq!(config.loading.min_display_ms, 250);
        assert_eq!(
            config.loading.indicator().min_display(),
            Duration::from_millis(250)
        );
        assert_eq!(config.api, ApiConfig::default());
    }

    #[test]
    fn test_load_missing_file() {
        let err = StorefrontConfig::load("/nonexistent/shop.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_bad_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "[api\nbase_url = 1").unwrap();
        let err = StorefrontConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_API_BASE_URL, "https://staging.shop.test"),
            (ENV_TOKEN_FILE, "/tmp/token.json"),
            (ENV_PLATFORM_URL, "  "),
        ]
        .into_iter()
        .collect();

        let config = StorefrontConfig::default()
            .with_env_from(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.api.base_url, "https://staging.shop.test");
        assert_eq!(config.auth.token_file, Some(PathBuf::from("/tmp/token.json")));
        assert_eq!(config.api.platform_url, None);
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        let mut config = StorefrontConfig::default();
        config.api.base_url = "localhost:8000".into();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = StorefrontConfig::default();
        config.api.platform_url = Some("ftp://shop.test".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let mut config = StorefrontConfig::default();
        config.sync.page_size = 0;
        assert!(config.validate().is_err());
    }
}
