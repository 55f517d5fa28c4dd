use crate::domain::model::{SearchQuery, UpstreamResponse};
use crate::utils::error::Result;
use async_trait::async_trait;

/// The recipe provider being proxied.
///
/// `Err` is reserved for transport failures (connection, timeout, body read);
/// a completed call with a non-2xx status is `Ok(UpstreamResponse::Failure)`.
#[async_trait]
pub trait RecipeApi: Send + Sync {
    async fn search(&self, api_key: &str, query: &SearchQuery) -> Result<UpstreamResponse>;

    async fn recipe_information(&self, api_key: &str, recipe_id: &str)
        -> Result<UpstreamResponse>;

    async fn analyzed_instructions(
        &self,
        api_key: &str,
        recipe_id: &str,
    ) -> Result<UpstreamResponse>;
}
