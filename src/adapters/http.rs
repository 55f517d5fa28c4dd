use crate::config::ProxyConfig;
use crate::domain::model::{SearchQuery, UpstreamResponse};
use crate::domain::ports::RecipeApi;
use crate::utils::error::{ProxyError, Result};
use async_trait::async_trait;
use reqwest::Client;
use url::{form_urlencoded, Url};

/// `RecipeApi` over HTTPS against a Spoonacular-compatible base URL.
pub struct SpoonacularClient {
    client: Client,
    base_url: Url,
}

impl SpoonacularClient {
    pub fn new(config: &ProxyConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            base_url: Url::parse(&config.base_url)?,
        })
    }

    pub fn search_url(&self, api_key: &str, query: &SearchQuery) -> Result<Url> {
        let mut url = self.endpoint(&["recipes", "complexSearch"])?;

        // diet is forwarded as received; only the free-text query is encoded
        let diet = query
            .diet
            .as_deref()
            .map(|diet| format!("&diet={}", diet))
            .unwrap_or_default();
        url.set_query(Some(&format!(
            "query={}{}&apiKey={}&number=1&addRecipeInformation=true",
            encode(&query.query),
            diet,
            encode(api_key)
        )));
        Ok(url)
    }

    pub fn information_url(&self, api_key: &str, recipe_id: &str) -> Result<Url> {
        let mut url = self.endpoint(&["recipes", recipe_id, "information"])?;
        url.query_pairs_mut()
            .append_pair("apiKey", api_key)
            .append_pair("includeNutrition", "false");
        Ok(url)
    }

    pub fn analyzed_instructions_url(&self, api_key: &str, recipe_id: &str) -> Result<Url> {
        let mut url = self.endpoint(&["recipes", recipe_id, "analyzedInstructions"])?;
        url.query_pairs_mut().append_pair("apiKey", api_key);
        Ok(url)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProxyError::ConfigError {
                message: format!("Base URL cannot carry a path: {}", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch(&self, url: Url) -> Result<UpstreamResponse> {
        // the query string carries the API key, so neither logs nor errors include it
        tracing::debug!("Making API request to: {}", url.path());
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProxyError::ApiError(e.without_url()))?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        let body = response
            .text()
            .await
            .map_err(|e| ProxyError::ApiError(e.without_url()))?;
        if status.is_success() {
            Ok(UpstreamResponse::Success { body })
        } else {
            Ok(UpstreamResponse::Failure {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[async_trait]
impl RecipeApi for SpoonacularClient {
    async fn search(&self, api_key: &str, query: &SearchQuery) -> Result<UpstreamResponse> {
        self.fetch(self.search_url(api_key, query)?).await
    }

    async fn recipe_information(
        &self,
        api_key: &str,
        recipe_id: &str,
    ) -> Result<UpstreamResponse> {
        self.fetch(self.information_url(api_key, recipe_id)?).await
    }

    async fn analyzed_instructions(
        &self,
        api_key: &str,
        recipe_id: &str,
    ) -> Result<UpstreamResponse> {
        self.fetch(self.analyzed_instructions_url(api_key, recipe_id)?)
            .await
    }
}

fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> SpoonacularClient {
        SpoonacularClient::new(&ProxyConfig::default().with_base_url(base_url)).unwrap()
    }

    #[test]
    fn test_search_url() {
        let client = client("https://api.spoonacular.com/");
        let url = client
            .search_url(
                "k3y",
                &SearchQuery {
                    query: "mac & cheese".to_string(),
                    diet: None,
                },
            )
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://api.spoonacular.com/recipes/complexSearch?query=mac+%26+cheese&apiKey=k3y&number=1&addRecipeInformation=true"
        );
    }

    #[test]
    fn test_search_url_forwards_diet() {
        let client = client("https://api.spoonacular.com");
        let url = client
            .search_url(
                "k3y",
                &SearchQuery {
                    query: "curry".to_string(),
                    diet: Some("vegan".to_string()),
                },
            )
            .unwrap();

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("query".to_string(), "curry".to_string()));
        assert_eq!(pairs[1], ("diet".to_string(), "vegan".to_string()));
        assert_eq!(url.path(), "/recipes/complexSearch");
    }

    #[test]
    fn test_diet_is_not_percent_encoded() {
        let client = client("https://api.spoonacular.com/");
        for (diet, expected) in [("vegan,paleo", "diet=vegan,paleo"), ("a|b", "diet=a|b")] {
            let url = client
                .search_url(
                    "k3y",
                    &SearchQuery {
                        query: "curry".to_string(),
                        diet: Some(diet.to_string()),
                    },
                )
                .unwrap();

            assert_eq!(
                url.as_str(),
                format!(
                    "https://api.spoonacular.com/recipes/complexSearch?query=curry&{}&apiKey=k3y&number=1&addRecipeInformation=true",
                    expected
                )
            );
        }
    }

    #[test]
    fn test_detail_urls_keep_base_path() {
        let client = client("http://localhost:8080/proxy/");

        let info = client.information_url("k3y", "42").unwrap();
        assert_eq!(
            info.as_str(),
            "http://localhost:8080/proxy/recipes/42/information?apiKey=k3y&includeNutrition=false"
        );

        let analyzed = client.analyzed_instructions_url("k3y", "42").unwrap();
        assert_eq!(
            analyzed.as_str(),
            "http://localhost:8080/proxy/recipes/42/analyzedInstructions?apiKey=k3y"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = SpoonacularClient::new(&ProxyConfig::default().with_base_url("not a url"));
        assert!(matches!(result, Err(ProxyError::UrlError(_))));
    }
}
