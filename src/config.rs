//! Notifier configuration.
//!
//! Loaded from a JSON file (`$INDEXNOW_CONFIG`, else
//! `~/.indexnow/config.json`), then overridden from the environment. A missing
//! file means defaults. Every field is optional in the file.
//!
//! # Example
//!
//! ```ignore
//! use indexnow::config::IndexNowConfig;
//!
//! let config = IndexNowConfig::default()
//!     .with_site_url("https://example.com")
//!     .with_provider("bing", "https://www.bing.com")
//!     .with_excluded_path("/members/");
//! config.validate()?;
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::adapters::FileKeyStore;
use crate::error::ConfigError;
use crate::key_manager::{KeyManager, DEFAULT_ROTATION_DAYS};
use crate::models::Provider;
use crate::notifier::ChangeNotifier;
use crate::traits::{Clock, HttpClient, KeyStore};
use crate::transport::{Transport, DEFAULT_REQUEST_TIMEOUT};

/// Env var pointing at the config file.
pub const CONFIG_PATH_ENV: &str = "INDEXNOW_CONFIG";
pub const ENABLED_ENV: &str = "INDEXNOW_ENABLED";
pub const SITE_URL_ENV: &str = "INDEXNOW_SITE_URL";
pub const BIND_ADDR_ENV: &str = "INDEXNOW_BIND_ADDR";
pub const KEY_STORE_ENV: &str = "INDEXNOW_KEY_STORE";

const CONFIG_DIR: &str = ".indexnow";
const CONFIG_FILE: &str = "config.json";

pub const DEFAULT_PROVIDER_NAME: &str = "indexnow";
pub const DEFAULT_PROVIDER_URL: &str = "https://api.indexnow.org";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_SITE_URL: &str = "http://localhost";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexNowConfig {
    /// Master switch. When off, nothing is submitted and no key is served.
    pub enabled: bool,
    /// Whether the site allows search engines at all.
    pub site_public: bool,
    /// Site root. Used for `host`, `keyLocation` and key file matching.
    pub site_url: String,
    /// Provider name to base URL. Submissions go out in name order.
    pub providers: BTreeMap<String, String>,
    /// Path prefixes never submitted.
    pub excluded_paths: Vec<String>,
    pub rotation_period_secs: u64,
    pub request_timeout_secs: u64,
    /// Key file; `~/.indexnow/key.json` when unset.
    pub key_store_path: Option<PathBuf>,
    /// Listen address of the verification server.
    pub bind_addr: String,
}

impl Default for IndexNowConfig {
    fn default() -> Self {
        let mut providers = BTreeMap::new();
        providers.insert(
            DEFAULT_PROVIDER_NAME.to_string(),
            DEFAULT_PROVIDER_URL.to_string(),
        );

        Self {
            enabled: true,
            site_public: true,
            site_url: DEFAULT_SITE_URL.to_string(),
            providers,
            excluded_paths: Vec::new(),
            rotation_period_secs: DEFAULT_ROTATION_DAYS as u64 * 24 * 60 * 60,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
            key_store_path: None,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl IndexNowConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_site_public(mut self, site_public: bool) -> Self {
        self.site_public = site_public;
        self
    }

    pub fn with_site_url(mut self, url: impl Into<String>) -> Self {
        self.site_url = url.into();
        self
    }

    /// Add or replace a provider.
    pub fn with_provider(mut self, name: impl Into<String>, base_url: impl Into<String>) -> Self {
        self.providers.insert(name.into(), base_url.into());
        self
    }

    /// Drop every provider, including the default one.
    pub fn without_providers(mut self) -> Self {
        self.providers.clear();
        self
    }

    pub fn with_excluded_path(mut self, prefix: impl Into<String>) -> Self {
        self.excluded_paths.push(prefix.into());
        self
    }

    /// Stored in whole seconds; a fractional second rounds up.
    pub fn with_rotation_period(mut self, period: Duration) -> Self {
        self.rotation_period_secs = whole_secs(period);
        self
    }

    /// Stored in whole seconds; a fractional second rounds up.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_secs = whole_secs(timeout);
        self
    }

    pub fn with_key_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.key_store_path = Some(path.into());
        self
    }

    pub fn with_bind_addr(mut self, addr: impl Into<String>) -> Self {
        self.bind_addr = addr.into();
        self
    }

    /// `$INDEXNOW_CONFIG`, else `~/.indexnow/config.json`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            if !path.trim().is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        dirs::home_dir()
            .map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
            .ok_or(ConfigError::NoHomeDirectory)
    }

    /// Load the default file, apply env overrides and validate.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::load_from(&Self::default_path()?)?.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse `path`, or defaults if it doesn't exist. Not validated.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config at {}; using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError::ReadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
        };

        serde_json::from_str(&contents).map_err(|e| ConfigError::ParseFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Apply `INDEXNOW_*` overrides from the process environment.
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, keyed by env var name.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENABLED_ENV) {
            self.enabled = parse_bool(ENABLED_ENV, &value)?;
        }
        if let Some(value) = lookup(SITE_URL_ENV) {
            self.site_url = value;
        }
        if let Some(value) = lookup(BIND_ADDR_ENV) {
            self.bind_addr = value;
        }
        if let Some(value) = lookup(KEY_STORE_ENV) {
            self.key_store_path = Some(PathBuf::from(value));
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let site = reqwest::Url::parse(&self.site_url).map_err(|e| ConfigError::InvalidSiteUrl {
            url: self.site_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(site.scheme(), "http" | "https") || site.host_str().is_none() {
            return Err(ConfigError::InvalidSiteUrl {
                url: self.site_url.clone(),
                reason: "expected an absolute http(s) URL".to_string(),
            });
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout_secs".to_string(),
                value: "0".to_string(),
            });
        }
        self.rotation_period()?;
        if self.bind_addr.parse::<std::net::SocketAddr>().is_err() {
            return Err(ConfigError::InvalidValue {
                key: "bind_addr".to_string(),
                value: self.bind_addr.clone(),
            });
        }

        self.build_providers().map(|_| ())
    }

    /// Validated providers in name order.
    pub fn build_providers(&self) -> Result<Vec<Provider>, ConfigError> {
        self.providers
            .iter()
            .map(|(name, url)| Provider::new(name.clone(), url))
            .collect()
    }

    /// Fails for zero and for periods chrono can't represent.
    pub fn rotation_period(&self) -> Result<chrono::Duration, ConfigError> {
        i64::try_from(self.rotation_period_secs)
            .ok()
            .filter(|secs| *secs > 0)
            .and_then(chrono::Duration::try_seconds)
            .ok_or_else(|| ConfigError::InvalidValue {
                key: "rotation_period_secs".to_string(),
                value: self.rotation_period_secs.to_string(),
            })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Configured key file, else the default location.
    pub fn resolved_key_store_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.key_store_path {
            Some(path) => Ok(path.clone()),
            None => FileKeyStore::default_path().ok_or(ConfigError::NoHomeDirectory),
        }
    }

    /// Wire a notifier from this configuration.
    pub fn build_notifier(
        &self,
        http: Arc<dyn HttpClient>,
        store: Arc<dyn KeyStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<ChangeNotifier, ConfigError> {
        let keys = KeyManager::new(store, Arc::clone(&clock))
            .with_rotation_period(self.rotation_period()?);
        let transport = Transport::new(http).with_timeout(self.request_timeout());

        Ok(
            ChangeNotifier::new(Arc::new(keys), transport, clock, self.site_url.clone())
                .with_providers(self.build_providers()?)
                .with_excluded_paths(&self.excluded_paths)
                .with_enabled(self.enabled)
                .with_site_public(self.site_public),
        )
    }
}

fn whole_secs(duration: Duration) -> u64 {
    duration.as_secs() + u64::from(duration.subsec_nanos() > 0)
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemoryKeyStore, MockClock, MockHttpClient};
    use serial_test::serial;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = IndexNowConfig::default();
        assert!(config.enabled);
        assert!(config.site_public);
        assert_eq!(
            config.providers.get("indexnow").map(String::as_str),
            Some("https://api.indexnow.org")
        );
        assert!(config.excluded_paths.is_empty());
        assert_eq!(config.rotation_period().unwrap(), chrono::Duration::days(7));
        assert_eq!(config.request_timeout(), Duration::from_secs(15));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = IndexNowConfig::new()
            .without_providers()
            .with_provider("bing", "https://www.bing.com")
            .with_site_url("https://example.com")
            .with_excluded_path("/members/")
            .with_request_timeout(Duration::from_secs(5))
            .with_enabled(false);

        assert_eq!(config.providers.len(), 1);
        assert_eq!(config.excluded_paths, vec!["/members/".to_string()]);
        assert_eq!(config.request_timeout_secs, 5);
        assert!(!config.enabled);
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = IndexNowConfig::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, IndexNowConfig::default());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{
                "site_url": "https://example.com",
                "providers": {"bing": "https://www.bing.com", "yandex": "https://yandex.com"},
                "excluded_paths": ["/private/"]
            }"#,
        )
        .unwrap();

        let config = IndexNowConfig::load_from(&path).unwrap();
        assert_eq!(config.site_url, "https://example.com");
        assert_eq!(config.excluded_paths, vec!["/private/".to_string()]);
        assert_eq!(config.request_timeout_secs, 15);

        let names: Vec<_> = config
            .build_providers()
            .unwrap()
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(names, vec!["bing", "yandex"]);
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ nope").unwrap();

        let err = IndexNowConfig::load_from(&path).unwrap_err();
        assert_eq!(err.error_code(), "E_CFG_PARSE");
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENABLED_ENV, "off"),
            (SITE_URL_ENV, "https://blog.example.com"),
            (BIND_ADDR_ENV, "0.0.0.0:9000"),
            (KEY_STORE_ENV, "/var/lib/indexnow/key.json"),
        ]
        .into_iter()
        .collect();

        let config = IndexNowConfig::default()
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert!(!config.enabled);
        assert_eq!(config.site_url, "https://blog.example.com");
        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(
            config.resolved_key_store_path().unwrap(),
            PathBuf::from("/var/lib/indexnow/key.json")
        );
    }

    #[test]
    fn test_invalid_bool_override() {
        let err = IndexNowConfig::default()
            .apply_overrides(|key| (key == ENABLED_ENV).then(|| "maybe".to_string()))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: ENABLED_ENV.to_string(),
                value: "maybe".to_string()
            }
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_site = IndexNowConfig::default().with_site_url("example.com");
        assert!(matches!(
            bad_site.validate(),
            Err(ConfigError::InvalidSiteUrl { .. })
        ));

        let bad_provider = IndexNowConfig::default().with_provider("bing", "not a url");
        assert!(matches!(
            bad_provider.validate(),
            Err(ConfigError::InvalidProviderUrl { .. })
        ));

        let zero_timeout = IndexNowConfig::default().with_request_timeout(Duration::ZERO);
        assert_eq!(zero_timeout.validate().unwrap_err().error_code(), "E_CFG_VALUE");

        let bad_bind = IndexNowConfig::default().with_bind_addr("localhost");
        assert_eq!(bad_bind.validate().unwrap_err().error_code(), "E_CFG_VALUE");
    }

    #[test]
    fn test_validate_rejects_unrepresentable_rotation_period() {
        let config: IndexNowConfig =
            serde_json::from_str(r#"{"rotation_period_secs": 18446744073709551615}"#).unwrap();
        let expected = ConfigError::InvalidValue {
            key: "rotation_period_secs".to_string(),
            value: "18446744073709551615".to_string(),
        };

        assert_eq!(config.validate().unwrap_err(), expected);
        assert_eq!(config.rotation_period().unwrap_err(), expected);

        // Fits in i64 but not in chrono's range.
        let config = IndexNowConfig {
            rotation_period_secs: i64::MAX as u64,
            ..IndexNowConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(config
            .build_notifier(
                Arc::new(MockHttpClient::new()),
                Arc::new(InMemoryKeyStore::new()),
                Arc::new(MockClock::default()),
            )
            .is_err());
    }

    #[test]
    fn test_zero_rotation_period_is_rejected() {
        let config = IndexNowConfig::default().with_rotation_period(Duration::ZERO);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { key, .. }) if key == "rotation_period_secs"
        ));
    }

    #[test]
    fn test_sub_second_durations_round_up() {
        let config = IndexNowConfig::default()
            .with_rotation_period(Duration::from_millis(500))
            .with_request_timeout(Duration::from_millis(1500));

        assert_eq!(config.rotation_period_secs, 1);
        assert_eq!(config.request_timeout_secs, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_default_path_from_env() {
        std::env::set_var(CONFIG_PATH_ENV, "/etc/indexnow/config.json");
        let path = IndexNowConfig::default_path().unwrap();
        std::env::remove_var(CONFIG_PATH_ENV);

        assert_eq!(path, PathBuf::from("/etc/indexnow/config.json"));
    }

    #[test]
    #[serial]
    fn test_load_reads_env_file_and_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"site_url": "https://example.com"}"#).unwrap();

        std::env::set_var(CONFIG_PATH_ENV, &path);
        std::env::set_var(BIND_ADDR_ENV, "127.0.0.1:0");
        let config = IndexNowConfig::load();
        std::env::remove_var(CONFIG_PATH_ENV);
        std::env::remove_var(BIND_ADDR_ENV);

        let config = config.unwrap();
        assert_eq!(config.site_url, "https://example.com");
        assert_eq!(config.bind_addr, "127.0.0.1:0");
    }

    #[tokio::test]
    async fn test_build_notifier() {
        let config = IndexNowConfig::default()
            .with_site_url("https://example.com")
            .with_provider("bing", "https://www.bing.com")
            .with_excluded_path("/private/")
            .with_site_public(false);

        let notifier = config
            .build_notifier(
                Arc::new(MockHttpClient::new()),
                Arc::new(InMemoryKeyStore::new()),
                Arc::new(MockClock::default()),
            )
            .unwrap();

        assert_eq!(notifier.providers().len(), 2);
        assert_eq!(notifier.providers()[0].name(), "bing");
        assert_eq!(notifier.excluded_paths(), vec!["/private/".to_string()]);
        assert!(!notifier.is_enabled());
        assert_eq!(notifier.site_url(), "https://example.com");
    }
}
