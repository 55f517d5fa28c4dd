pub mod handler;
pub mod merge;

pub use crate::domain::model::{ProxyRequest, ProxyResponse, SearchQuery, UpstreamResponse};
pub use crate::domain::ports::RecipeApi;
pub use crate::utils::error::Result;
