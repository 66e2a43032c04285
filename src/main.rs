use anyhow::Result;
use clap::Parser;
use creator_proxy::cli::CliOptions;
use creator_proxy::config::{setup_logging, ProviderConfig, BASE_URL_VAR};
use creator_proxy::storage::UploadStore;
use creator_proxy::web::{setup_server, AppState};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = CliOptions::parse();
    setup_logging(cli.debug);

    info!("Starting creator-proxy");

    let config = ProviderConfig::from_env();
    match (config.has_api_key(), config.base_url.as_deref()) {
        (true, _) => info!("Image generation: OpenAI SDK"),
        (false, Some(base_url)) => info!("Image generation: proxy via {}", base_url),
        (false, None) => warn!("No provider configured; generation endpoints will fail"),
    }
    if config.base_url.is_none() {
        warn!("{} not set; comment replies are unavailable", BASE_URL_VAR);
    }

    let state = AppState::new(config, UploadStore::new(cli.uploads_dir.clone()));

    if let Err(e) = setup_server(&cli.listen_address, cli.port, state).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
    Ok(())
}
