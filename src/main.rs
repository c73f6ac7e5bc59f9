use anyhow::Context;
use clap::Parser;
use customization_catalog::cli::Cli;
use customization_catalog::config::CatalogConfig;
use customization_catalog::deployment;
use customization_catalog::error::Result;
use customization_catalog::fetch::DocumentFetcher;
use customization_catalog::loader::CatalogLoader;
use customization_catalog::logging;
use customization_catalog::manifest::Manifest;
use customization_catalog::server::CatalogServer;
use customization_catalog::state::CatalogState;
use rmcp::{ServiceExt, transport::stdio};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays free for the MCP protocol
    logging::init();

    let cli = Cli::parse();
    let config = CatalogConfig::discover(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_overrides(cli.site_url, cli.root);

    let location = config.site_location()?;
    let context = deployment::resolve(location.as_ref(), &config);
    let mode = context.name();

    let fetcher =
        DocumentFetcher::new(config.loader.timeout()).context("Failed to build HTTP client")?;
    let loader = CatalogLoader::new(Manifest::default(), context, fetcher)
        .with_concurrency(config.loader.concurrency);

    let catalog = loader.load_all().await.inspect_err(|e| {
        tracing::error!("Catalog load failed: {}", e);
    })?;

    let state = CatalogState::new(
        catalog,
        mode,
        loader.fetcher().clone(),
        config.server.source_cache_size,
    );

    tracing::info!("Starting customization-catalog MCP server");

    let server = CatalogServer::new(state);
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    service.waiting().await?;

    Ok(())
}
