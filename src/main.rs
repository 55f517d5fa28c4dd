use clap::Parser;
use recipe_proxy::utils::{logger, validation::Validate};
use recipe_proxy::{CliConfig, RecipeLookupHandler, SpoonacularClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting recipe-proxy CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = cli.proxy_config()?;
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
    tracing::debug!("Proxy config: {:?}", config);

    let client = SpoonacularClient::new(&config)?;
    let handler = RecipeLookupHandler::new(config, client);

    let response = handler.handle(&cli.request()).await;
    tracing::info!("Responded with status {}", response.status);

    println!("{}", response.body);
    if response.status >= 400 {
        std::process::exit(1);
    }

    Ok(())
}
