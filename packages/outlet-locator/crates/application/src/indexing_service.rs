use domain::ports::{DistanceMetric, Embedder, IndexedVector, OutletStore, VectorIndex};
use domain::{prompt, LocatorError, Result};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexReport {
    pub collection: String,
    pub indexed: usize,
}

/// Rebuilds the outlet vector collection from scratch.
///
/// The collection is dropped before anything is embedded, so a failed run
/// leaves it empty. Do not run this while queries hit the same collection.
pub struct IndexingService {
    store: Arc<dyn OutletStore>,
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
    collection: String,
}

impl IndexingService {
    pub fn new(
        store: Arc<dyn OutletStore>,
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            store,
            embedder,
            index,
            collection: collection.into(),
        }
    }

    pub async fn reindex(&self) -> Result<IndexReport> {
        let name = self.collection.as_str();

        if self.index.collection_exists(name).await? {
            tracing::info!(collection = name, "Dropping existing collection");
            self.index.delete_collection(name).await?;
        }

        self.index
            .create_collection(name, self.embedder.dimension(), DistanceMetric::Cosine)
            .await?;

        let outlets = self.store.fetch_all_outlets().await?;
        tracing::info!(collection = name, outlets = outlets.len(), "Embedding outlets");

        // Nothing is written until every outlet has been embedded.
        let mut staged = Vec::with_capacity(outlets.len());
        for (idx, outlet) in outlets.iter().enumerate() {
            let text = prompt::canonical_text(outlet);
            let vector = self.embedder.embed(&text).await.inspect_err(|e| {
                tracing::error!(
                    collection = name,
                    outlet = outlet.id,
                    "Embedding failed, collection left empty: {}",
                    e
                );
            })?;

            let payload = serde_json::to_value(outlet).map_err(|e| {
                LocatorError::ProviderFailure(format!("Cannot serialise outlet {}: {}", outlet.id, e))
            })?;

            staged.push(IndexedVector {
                id: idx as u64,
                vector,
                payload,
            });
        }

        let indexed = staged.len();
        if staged.is_empty() {
            tracing::warn!(collection = name, "Repository has no outlets, collection left empty");
        } else {
            self.index.upsert(name, staged).await?;
        }

        tracing::info!(collection = name, indexed, "Reindex complete");
        Ok(IndexReport {
            collection: self.collection.clone(),
            indexed,
        })
    }
}
