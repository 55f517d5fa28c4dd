pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::SpoonacularClient;
pub use config::{ApiKeySource, ProxyConfig, TomlConfig};
pub use crate::core::handler::RecipeLookupHandler;
pub use domain::model::{ProxyRequest, ProxyResponse, SearchQuery, UpstreamResponse};
pub use domain::ports::RecipeApi;
pub use utils::error::{ProxyError, Result};
