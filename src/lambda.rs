#[cfg(feature = "lambda")]
use lambda_http::{run, service_fn, Body, Error, Request, Response};
#[cfg(feature = "lambda")]
use recipe_proxy::adapters::lambda::{http_response, proxy_request};
#[cfg(feature = "lambda")]
use recipe_proxy::utils::logger;
#[cfg(feature = "lambda")]
use recipe_proxy::utils::validation::Validate;
#[cfg(feature = "lambda")]
use recipe_proxy::{ProxyConfig, RecipeLookupHandler, SpoonacularClient};

#[cfg(feature = "lambda")]
async fn function_handler(
    handler: &RecipeLookupHandler<SpoonacularClient>,
    event: Request,
) -> Result<Response<Body>, Error> {
    let request = proxy_request(&event);
    tracing::info!(method = %request.method, "Handling recipe lookup");

    let response = handler.handle(&request).await;
    tracing::info!(status = response.status, "Recipe lookup finished");
    Ok(http_response(response)?)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let config = ProxyConfig::from_env();
    config
        .validate()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    if config.usable_api_key().is_none() {
        tracing::warn!("No usable API key found; lookups will answer 500");
    }

    let client = SpoonacularClient::new(&config)
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    let handler = RecipeLookupHandler::new(config, client);
    let shared = &handler;

    run(service_fn(move |event: Request| async move {
        function_handler(shared, event).await
    }))
    .await
}
