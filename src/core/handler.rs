use crate::config::ProxyConfig;
use crate::core::merge::{first_recipe_id, merge_recipe, replace_results};
use crate::domain::model::{ProxyRequest, ProxyResponse, SearchQuery, UpstreamResponse};
use crate::domain::ports::RecipeApi;
use crate::utils::error::{ErrorCategory, ProxyError, Result};
use serde_json::Value;
use std::future::Future;

pub struct RecipeLookupHandler<A: RecipeApi> {
    config: ProxyConfig,
    api: A,
}

impl<A: RecipeApi> RecipeLookupHandler<A> {
    pub fn new(config: ProxyConfig, api: A) -> Self {
        Self { config, api }
    }

    /// Never fails: every error becomes a JSON `{"error": ...}` response.
    pub async fn handle(&self, request: &ProxyRequest) -> ProxyResponse {
        match self.try_handle(request).await {
            Ok(response) => response,
            Err(e) => {
                match e.category() {
                    ErrorCategory::Validation => {
                        tracing::debug!("Rejected {} request: {}", request.method, e)
                    }
                    category => tracing::error!("Error fetching recipe ({:?}): {}", category, e),
                }
                ProxyResponse::error(e.status_code(), &e.client_message())
            }
        }
    }

    async fn try_handle(&self, request: &ProxyRequest) -> Result<ProxyResponse> {
        match request.method.as_str() {
            "OPTIONS" => return Ok(ProxyResponse::empty(200)),
            "GET" => {}
            other => {
                return Err(ProxyError::MethodNotAllowed {
                    method: other.to_string(),
                })
            }
        }

        let api_key = self
            .config
            .usable_api_key()
            .ok_or(ProxyError::ApiKeyNotConfigured)?;

        let query = request.param("query").ok_or(ProxyError::MissingQuery)?;
        let search = SearchQuery {
            query: query.to_string(),
            diet: request.param("diet").map(str::to_string),
        };

        let body = self.lookup(api_key, &search).await?;
        Ok(ProxyResponse::json(200, body))
    }

    /// Search, then enrich the top hit. Returns the response body.
    ///
    /// The search call is required; the detail and analyzed-instructions calls are
    /// best-effort and any failure there yields the search body untouched.
    pub async fn lookup(&self, api_key: &str, search: &SearchQuery) -> Result<String> {
        tracing::info!(
            "Searching recipes for {:?} (diet: {:?})",
            search.query,
            search.diet
        );

        let raw = match self
            .bounded("search", self.api.search(api_key, search))
            .await?
        {
            UpstreamResponse::Success { body } => body,
            UpstreamResponse::Failure { status, body } => {
                return Err(ProxyError::UpstreamStatus { status, body })
            }
        };

        let payload: Value = serde_json::from_str(&raw)?;
        let Some(recipe_id) = first_recipe_id(&payload) else {
            tracing::debug!("Search returned no results, passing payload through");
            return Ok(raw);
        };

        let (detail, analyzed) = tokio::join!(
            self.enrichment(
                "information",
                &recipe_id,
                self.api.recipe_information(api_key, &recipe_id)
            ),
            self.enrichment(
                "analyzedInstructions",
                &recipe_id,
                self.api.analyzed_instructions(api_key, &recipe_id)
            ),
        );

        let Some(detail) = detail else {
            tracing::warn!("Returning unmerged search results for recipe {}", recipe_id);
            return Ok(raw);
        };

        let merged = merge_recipe(&payload["results"][0], &detail, analyzed.as_ref());
        let body = serde_json::to_string(&replace_results(&payload, merged))?;
        tracing::debug!("Merged recipe {} ({} bytes)", recipe_id, body.len());
        Ok(body)
    }

    async fn bounded<F>(&self, operation: &str, call: F) -> Result<UpstreamResponse>
    where
        F: Future<Output = Result<UpstreamResponse>>,
    {
        tokio::time::timeout(self.config.timeout(), call)
            .await
            .map_err(|_| ProxyError::UpstreamTimeout {
                operation: operation.to_string(),
                seconds: self.config.timeout_seconds,
            })?
    }

    async fn enrichment<F>(&self, operation: &str, recipe_id: &str, call: F) -> Option<Value>
    where
        F: Future<Output = Result<UpstreamResponse>>,
    {
        let outcome = self.bounded(operation, call).await.and_then(|response| {
            match response {
                UpstreamResponse::Success { body } => Ok(serde_json::from_str::<Value>(&body)?),
                UpstreamResponse::Failure { status, body } => {
                    Err(ProxyError::UpstreamStatus { status, body })
                }
            }
        });

        match outcome {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Enrichment {} failed for recipe {}: {}", operation, recipe_id, e);
                None
            }
        }
    }
}
