use crate::config::{ProxyConfig, TomlConfig};
use crate::domain::model::ProxyRequest;
use crate::utils::error::Result;
use clap::Parser;
use std::env;

#[derive(Debug, Clone, Parser)]
#[command(name = "recipe-proxy")]
#[command(about = "Look up the top recipe for a query through the recipe proxy")]
pub struct CliConfig {
    #[arg(long, help = "Free-text recipe search")]
    pub query: Option<String>,

    #[arg(long, help = "Optional diet filter, e.g. vegan")]
    pub diet: Option<String>,

    #[arg(long, default_value = "GET", help = "HTTP method to simulate")]
    pub method: String,

    #[arg(long, help = "TOML file with [upstream] and [credentials] sections")]
    pub config: Option<String>,

    #[arg(long, help = "Override the upstream base URL")]
    pub base_url: Option<String>,

    #[arg(long, help = "Override the per-call timeout in seconds")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Layers: environment, then the TOML file, then explicit flags.
    pub fn proxy_config(&self) -> Result<ProxyConfig> {
        let lookup = |name: &str| env::var(name).ok();
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?.into_proxy_config(lookup),
            None => ProxyConfig::from_lookup(lookup),
        };

        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(timeout_seconds) = self.timeout_seconds {
            config.timeout_seconds = timeout_seconds;
        }
        Ok(config)
    }

    pub fn request(&self) -> ProxyRequest {
        let mut request = ProxyRequest::new(self.method.to_uppercase());
        if let Some(query) = &self.query {
            request = request.with_param("query", query.clone());
        }
        if let Some(diet) = &self.diet {
            request = request.with_param("diet", diet.clone());
        }
        request
    }
}
