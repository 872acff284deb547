//! Configuration management for anypay.
//!
//! [`Credentials`] are what the API client needs; [`Config`] is the on-disk
//! form (`~/.anypay/config.toml`) that also carries endpoint and transport
//! overrides.

use crate::constants::{API_URL, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_USER_AGENT, MERCHANT_URL};
use crate::error::{AnypayError, Result};
use crate::http::HttpClientBuilder;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Account credentials shared by every call a client makes.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account (API) identifier, part of every request path
    pub account_id: String,
    /// API key used to sign requests
    pub api_key: String,
    /// Project (merchant) identifier
    pub project_id: Option<String>,
    /// Notification secret, used only for payment link signatures
    pub secret: Option<String>,
}

impl Credentials {
    pub fn new(account_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            api_key: api_key.into(),
            project_id: None,
            secret: None,
        }
    }

    #[must_use]
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    #[must_use]
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Project id, or a configuration error naming the operation that needs it.
    pub fn require_project_id(&self, operation: &str) -> Result<&str> {
        self.project_id.as_deref().ok_or_else(|| {
            AnypayError::configuration(format!(
                "'{operation}' requires a project id. Set project_id in the config file or pass --project-id."
            ))
        })
    }

    /// Notification secret, or a configuration error naming the operation.
    pub fn require_secret(&self, operation: &str) -> Result<&str> {
        self.secret.as_deref().ok_or_else(|| {
            AnypayError::configuration(format!(
                "'{operation}' requires the notification secret. Set secret in the config file or pass --secret."
            ))
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account_id", &self.account_id)
            .field("api_key", &"<redacted>")
            .field("project_id", &self.project_id)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub account_id: String,
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Notification secret for payment links
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    /// Override of the API base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    /// Override of the payment page base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Limit for establishing the connection, within `timeout_secs`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("credentials", &self.credentials())
            .field("api_url", &self.api_url)
            .field("merchant_url", &self.merchant_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Builder for creating Config instances
///
/// # Examples
///
/// ```
/// use anypay_lib::config::Config;
///
/// let config = Config::builder()
///     .account_id("1234")
///     .api_key("secret-key")
///     .project_id("42")
///     .build()
///     .unwrap();
/// assert_eq!(config.credentials().project_id.as_deref(), Some("42"));
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new config builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account_id(mut self, value: impl Into<String>) -> Self {
        self.config.account_id = value.into();
        self
    }

    pub fn api_key(mut self, value: impl Into<String>) -> Self {
        self.config.api_key = value.into();
        self
    }

    pub fn project_id(mut self, value: impl Into<String>) -> Self {
        self.config.project_id = Some(value.into());
        self
    }

    pub fn secret(mut self, value: impl Into<String>) -> Self {
        self.config.secret = Some(value.into());
        self
    }

    pub fn api_url(mut self, value: impl Into<String>) -> Self {
        self.config.api_url = Some(value.into());
        self
    }

    pub fn merchant_url(mut self, value: impl Into<String>) -> Self {
        self.config.merchant_url = Some(value.into());
        self
    }

    pub fn timeout_secs(mut self, value: u64) -> Self {
        self.config.timeout_secs = Some(value);
        self
    }

    pub fn connect_timeout_secs(mut self, value: u64) -> Self {
        self.config.connect_timeout_secs = Some(value);
        self
    }

    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.user_agent = Some(value.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Config {
    /// Create a new config builder
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Load config from the specified path or default location (~/.anypay/config.toml)
    pub fn load_from(config_path: Option<impl AsRef<Path>>) -> Result<Self> {
        let config_path = Self::resolve_path(config_path)?;

        if !config_path.exists() {
            return Err(AnypayError::InvalidConfig(format!(
                "Config file not found at {}. Run 'anypay config init' to create one.",
                config_path.display()
            )));
        }

        let config = Self::read(&config_path)?;

        config.validate().map_err(|e| {
            AnypayError::InvalidConfig(format!(
                "Invalid configuration in {}: {}",
                config_path.display(),
                e
            ))
        })?;

        Ok(config)
    }

    /// Load config from the default location (~/.anypay/config.toml)
    pub fn load() -> Result<Self> {
        Self::load_from(None::<&str>)
    }

    /// Load config, returning default if file doesn't exist.
    ///
    /// Errors for unreadable or invalid files are still propagated. The
    /// result is not validated, so callers can overlay missing fields first.
    pub fn load_or_default(config_path: Option<impl AsRef<Path>>) -> Result<Self> {
        let config_path = Self::resolve_path(config_path)?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::read(&config_path)
    }

    fn read(config_path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(config_path).map_err(|e| {
            AnypayError::InvalidConfig(format!(
                "Failed to read config file at {}: {}",
                config_path.display(),
                e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            AnypayError::InvalidConfig(format!(
                "Failed to parse config file at {}: {}",
                config_path.display(),
                e
            ))
        })
    }

    fn resolve_path(config_path: Option<impl AsRef<Path>>) -> Result<PathBuf> {
        match config_path {
            Some(path) => Ok(PathBuf::from(path.as_ref())),
            None => Self::default_config_path(),
        }
    }

    /// Get the default config file path (~/.anypay/config.toml)
    pub fn default_config_path() -> Result<PathBuf> {
        crate::constants::default_config_path().ok_or(AnypayError::NoConfigDir)
    }

    /// Save config to `path` (or the default location) with owner-only permissions.
    pub fn save_to(&self, config_path: Option<impl AsRef<Path>>) -> Result<PathBuf> {
        self.validate()?;

        let config_path = Self::resolve_path(config_path)?;

        if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        set_secure_file_permissions(&config_path)?;

        Ok(config_path)
    }

    /// Check that the credentials and URL overrides are usable.
    pub fn validate(&self) -> Result<()> {
        if self.account_id.trim().is_empty() {
            return Err(AnypayError::InvalidConfig(
                "account_id must not be empty".to_string(),
            ));
        }
        if self.api_key.trim().is_empty() {
            return Err(AnypayError::InvalidConfig(
                "api_key must not be empty".to_string(),
            ));
        }
        for url in [&self.api_url, &self.merchant_url].into_iter().flatten() {
            reqwest::Url::parse(url).map_err(|e| AnypayError::invalid_url(url.as_str(), e))?;
        }
        if self.timeout_secs == Some(0) {
            return Err(AnypayError::InvalidConfig(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.connect_timeout_secs == Some(0) {
            return Err(AnypayError::InvalidConfig(
                "connect_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Credentials for constructing a client.
    pub fn credentials(&self) -> Credentials {
        Credentials {
            account_id: self.account_id.clone(),
            api_key: self.api_key.clone(),
            project_id: self.project_id.clone(),
            secret: self.secret.clone(),
        }
    }

    /// Effective API base URL
    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(API_URL)
    }

    /// Effective payment page base URL
    pub fn merchant_url(&self) -> &str {
        self.merchant_url.as_deref().unwrap_or(MERCHANT_URL)
    }

    /// HTTP builder carrying the configured timeouts and user agent.
    pub fn http_client_builder(&self) -> HttpClientBuilder {
        let mut builder = HttpClientBuilder::new()
            .timeout(self.timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS))
            .user_agent(self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT));
        if let Some(seconds) = self.connect_timeout_secs {
            builder = builder.connect_timeout(seconds);
        }
        builder
    }
}

#[cfg(unix)]
fn set_secure_file_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_secure_file_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            account_id = "1234"
            api_key = "KEY"
            project_id = "42"
            secret = "s3cr3t"
            api_url = "http://127.0.0.1:8080/api"
            timeout_secs = 5
        "#;

        let config: Config = toml::from_str(toml).expect("should parse");
        config.validate().unwrap();
        assert_eq!(config.api_url(), "http://127.0.0.1:8080/api");
        assert_eq!(config.merchant_url(), MERCHANT_URL);
        assert_eq!(config.credentials().secret.as_deref(), Some("s3cr3t"));
    }

    #[test]
    fn test_parse_config_rejects_unknown_fields() {
        let toml = r#"
            account_id = "1234"
            api_key = "KEY"
            private_key = "abcdef"
        "#;

        let result: std::result::Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err(), "Should reject unknown field 'private_key'");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let cases = vec![
            Config::default(),
            Config {
                account_id: "1".into(),
                ..Default::default()
            },
            Config {
                account_id: "1".into(),
                api_key: "k".into(),
                api_url: Some("not a url".into()),
                ..Default::default()
            },
            Config {
                account_id: "1".into(),
                api_key: "k".into(),
                timeout_secs: Some(0),
                ..Default::default()
            },
        ];

        for config in cases {
            assert!(config.validate().is_err(), "{config:?} should be invalid");
        }
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let credentials = Credentials::new("1234", "topsecret").with_secret("hush");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("1234"));
        assert!(!debug.contains("topsecret"));
        assert!(!debug.contains("hush"));
    }

    #[test]
    fn test_require_project_id() {
        let credentials = Credentials::new("1", "k");
        let err = credentials.require_project_id("commissions").unwrap_err();
        assert!(matches!(err, AnypayError::Configuration(_)));
        assert!(err.to_string().contains("commissions"));

        let credentials = credentials.with_project_id("42");
        assert_eq!(credentials.require_project_id("commissions").unwrap(), "42");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");
        let config = Config::builder()
            .account_id("1234")
            .api_key("KEY")
            .project_id("42")
            .build()
            .unwrap();

        config.save_to(Some(&path)).unwrap();
        let loaded = Config::load_from(Some(&path)).unwrap();
        assert_eq!(loaded, config);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
            assert_eq!(mode, 0o600);
        }
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.toml");
        assert!(Config::load_from(Some(&path)).is_err());
        assert_eq!(Config::load_or_default(Some(&path)).unwrap(), Config::default());
    }
}
