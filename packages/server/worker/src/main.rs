use clap::Parser;
use dotenv::dotenv;
use infrastructure::Settings;
use outlet_indexer::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env()?;
    let collection = cli.collection(&settings);

    tracing::info!(collection = collection.as_str(), "Outlet indexer starting");
    let report = outlet_indexer::run(&settings, collection).await?;
    tracing::info!(
        collection = report.collection.as_str(),
        indexed = report.indexed,
        "Outlet indexer finished"
    );

    Ok(())
}
