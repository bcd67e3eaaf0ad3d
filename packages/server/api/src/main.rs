use anyhow::Context;
use application::{IndexingService, OverlapService, RetrievalService, RetrievalSettings};
use database::{Database, OutletRepository};
use domain::ports::{OutletStore, VectorIndex};
use dotenv::dotenv;
use infrastructure::{MemoryVectorIndex, OpenAiClient, QdrantIndex, Settings, VectorBackend};
use outlet_api::AppState;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::from_env().context("Invalid configuration")?;

    // Lazy, so an unreachable database surfaces per request.
    let db = Database::connect_lazy(&settings.database_url)?;
    if settings.run_migrations {
        db.migrate().await?;
    }

    let store: Arc<dyn OutletStore> = Arc::new(OutletRepository::new(
        db.pool.clone(),
        settings.outlet_table.clone(),
        settings.db_query_timeout,
    ));

    let openai = Arc::new(OpenAiClient::new(
        &settings.openai_base_url,
        &settings.openai_api_key,
        &settings.embedding_model,
        settings.provider_timeout,
    )?);

    let index: Arc<dyn VectorIndex> = match settings.vector_backend {
        VectorBackend::Qdrant => Arc::new(QdrantIndex::new(
            &settings.qdrant_url,
            settings.qdrant_api_key.clone(),
            settings.provider_timeout,
        )?),
        VectorBackend::Memory => {
            let index: Arc<dyn VectorIndex> = Arc::new(MemoryVectorIndex::default());
            let report = IndexingService::new(
                store.clone(),
                openai.clone(),
                index.clone(),
                settings.collection.clone(),
            )
            .reindex()
            .await
            .context("Populating in-memory index failed")?;
            tracing::info!(indexed = report.indexed, "In-memory index ready");
            index
        }
    };

    let retrieval = RetrievalService::new(
        store.clone(),
        openai.clone(),
        index,
        openai,
        RetrievalSettings {
            collection: settings.collection.clone(),
            chat_model: settings.chat_model.clone(),
            top_k: settings.top_k,
        },
    );

    let state = AppState {
        overlaps: Arc::new(OverlapService::new(store)),
        retrieval: Arc::new(retrieval),
    };

    let app = outlet_api::app(state, settings.cors_origin.as_deref())?;

    tracing::info!("Outlet API listening on {}", settings.bind_addr);
    let listener = tokio::net::TcpListener::bind(settings.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
