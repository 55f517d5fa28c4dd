#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use std::env;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com/";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const API_KEY_PLACEHOLDER: &str = "YOUR_SPOONACULAR_API_KEY";
pub const API_KEY_ENV_VARS: [&str; 2] = ["SPOONACULAR_API_KEY", "YOUR_SPOONACULAR_API_KEY"];

/// Where the upstream credential may come from, in precedence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKeySource {
    pub env_vars: Vec<String>,
    pub placeholder: String,
}

impl Default for ApiKeySource {
    fn default() -> Self {
        Self {
            env_vars: API_KEY_ENV_VARS.iter().map(|s| s.to_string()).collect(),
            placeholder: API_KEY_PLACEHOLDER.to_string(),
        }
    }
}

impl ApiKeySource {
    /// First variable that is set to a non-empty value wins.
    pub fn resolve<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.env_vars
            .iter()
            .filter_map(|name| lookup(name.as_str()))
            .find(|value| !value.is_empty())
    }

    pub fn is_placeholder(&self, value: &str) -> bool {
        value == self.placeholder
    }
}

#[derive(Clone)]
pub struct ProxyConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub credentials: ApiKeySource,
    pub api_key: Option<String>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            credentials: ApiKeySource::default(),
            api_key: None,
        }
    }
}

impl fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("credentials", &self.credentials)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ProxyConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source, so tests never touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup_with(ApiKeySource::default(), lookup)
    }

    pub fn from_lookup_with<F>(credentials: ApiKeySource, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = credentials.resolve(&lookup);
        Self {
            base_url: lookup("RECIPE_API_BASE_URL")
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout_seconds: lookup("RECIPE_API_TIMEOUT_SECONDS")
                .and_then(|value| value.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            credentials,
            api_key,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// The credential, unless it is missing or still the placeholder.
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty() && !self.credentials.is_placeholder(key))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Validate for ProxyConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, 60)?;
        for name in &self.credentials.env_vars {
            validate_non_empty_string("credentials.env_vars", name)?;
        }

        tracing::debug!("Proxy configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_first_env_var_wins() {
        let config = ProxyConfig::from_lookup(lookup_from(&[
            ("SPOONACULAR_API_KEY", "primary"),
            ("YOUR_SPOONACULAR_API_KEY", "secondary"),
        ]));
        assert_eq!(config.usable_api_key(), Some("primary"));
    }

    #[test]
    fn test_falls_back_to_second_env_var() {
        let config = ProxyConfig::from_lookup(lookup_from(&[
            ("SPOONACULAR_API_KEY", ""),
            ("YOUR_SPOONACULAR_API_KEY", "secondary"),
        ]));
        assert_eq!(config.usable_api_key(), Some("secondary"));
    }

    #[test]
    fn test_placeholder_key_is_not_usable() {
        let config = ProxyConfig::from_lookup(lookup_from(&[(
            "YOUR_SPOONACULAR_API_KEY",
            "YOUR_SPOONACULAR_API_KEY",
        )]));
        assert_eq!(config.api_key.as_deref(), Some("YOUR_SPOONACULAR_API_KEY"));
        assert_eq!(config.usable_api_key(), None);
    }

    #[test]
    fn test_missing_key() {
        let config = ProxyConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.usable_api_key(), None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
    }

    #[test]
    fn test_upstream_overrides() {
        let config = ProxyConfig::from_lookup(lookup_from(&[
            ("RECIPE_API_BASE_URL", "http://localhost:9000/"),
            ("RECIPE_API_TIMEOUT_SECONDS", "3"),
        ]));
        assert_eq!(config.base_url, "http://localhost:9000/");
        assert_eq!(config.timeout(), Duration::from_secs(3));

        let bad_timeout =
            ProxyConfig::from_lookup(lookup_from(&[("RECIPE_API_TIMEOUT_SECONDS", "soon")]));
        assert_eq!(bad_timeout.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ProxyConfig::default().with_api_key("super-secret");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_validate() {
        assert!(ProxyConfig::default().validate().is_ok());
        assert!(ProxyConfig::default()
            .with_base_url("ftp://example.com")
            .validate()
            .is_err());
        assert!(ProxyConfig::default()
            .with_timeout_seconds(0)
            .validate()
            .is_err());
    }
}
