use anyhow::Context;
use application::{IndexReport, IndexingService};
use clap::Parser;
use database::sqlx::PgPool;
use database::{Database, OutletRepository};
use infrastructure::{OpenAiClient, QdrantIndex, Settings};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "outlet-indexer")]
#[command(about = "Rebuild the outlet vector collection from the database", long_about = None)]
pub struct Cli {
    /// Collection to rebuild, overriding QDRANT_COLLECTION
    #[arg(short, long)]
    pub collection: Option<String>,
}

impl Cli {
    pub fn collection(&self, settings: &Settings) -> String {
        self.collection
            .clone()
            .unwrap_or_else(|| settings.collection.clone())
    }
}

/// One indexing run against the configured database and Qdrant.
pub async fn run(settings: &Settings, collection: String) -> anyhow::Result<IndexReport> {
    let db = Database::connect(&settings.database_url).await?;

    let store = Arc::new(OutletRepository::new(
        db.pool.clone(),
        settings.outlet_table.clone(),
        settings.db_query_timeout,
    ));
    let embedder = Arc::new(OpenAiClient::new(
        &settings.openai_base_url,
        &settings.openai_api_key,
        &settings.embedding_model,
        settings.provider_timeout,
    )?);
    let index = Arc::new(QdrantIndex::new(
        &settings.qdrant_url,
        settings.qdrant_api_key.clone(),
        settings.provider_timeout,
    )?);

    let job = IndexingService::new(store, embedder, index, collection.clone());
    reindex_and_close(&job, &db.pool)
        .await
        .with_context(|| format!("Indexing into `{}` failed; the collection may be empty", collection))
}

/// Runs the job, then closes the pool whether or not the job succeeded.
pub async fn reindex_and_close(
    job: &IndexingService,
    pool: &PgPool,
) -> domain::Result<IndexReport> {
    let result = job.reindex().await;
    pool.close().await;
    result
}
