use crate::config::{ApiKeySource, ProxyConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECONDS};
use crate::utils::error::{ProxyError, Result};
use crate::utils::validation::Validate;
use serde::Deserialize;
use std::path::Path;

/// File form of the proxy settings. The API key itself is never read from the file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub upstream: Option<UpstreamConfig>,
    pub credentials: Option<CredentialsConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsConfig {
    pub env_vars: Option<Vec<String>>,
    pub placeholder: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ProxyError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ProxyError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn credentials(&self) -> ApiKeySource {
        let mut source = ApiKeySource::default();
        if let Some(credentials) = &self.credentials {
            if let Some(env_vars) = &credentials.env_vars {
                source.env_vars = env_vars.clone();
            }
            if let Some(placeholder) = &credentials.placeholder {
                source.placeholder = placeholder.clone();
            }
        }
        source
    }

    /// Settings from the file win; the credential is still resolved through `lookup`.
    pub fn into_proxy_config<F>(self, lookup: F) -> ProxyConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ProxyConfig::from_lookup_with(self.credentials(), lookup);
        if let Some(upstream) = self.upstream {
            if let Some(base_url) = upstream.base_url {
                config.base_url = base_url;
            }
            if let Some(timeout_seconds) = upstream.timeout_seconds {
                config.timeout_seconds = timeout_seconds;
            }
        }
        config
    }

    pub fn base_url(&self) -> &str {
        self.upstream
            .as_ref()
            .and_then(|u| u.base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.upstream
            .as_ref()
            .and_then(|u| u.timeout_seconds)
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        crate::utils::validation::validate_url("upstream.base_url", self.base_url())?;
        crate::utils::validation::validate_range(
            "upstream.timeout_seconds",
            self.timeout_seconds(),
            1,
            60,
        )?;

        let credentials = self.credentials();
        if credentials.env_vars.is_empty() {
            return Err(ProxyError::InvalidConfigValueError {
                field: "credentials.env_vars".to_string(),
                value: "[]".to_string(),
                reason: "At least one environment variable name is required".to_string(),
            });
        }
        for name in &credentials.env_vars {
            crate::utils::validation::validate_non_empty_string("credentials.env_vars", name)?;
        }

        Ok(())
    }
}
