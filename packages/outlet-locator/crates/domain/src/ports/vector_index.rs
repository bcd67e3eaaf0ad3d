use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceMetric {
    Cosine,
    Dot,
    Euclid,
}

/// A record staged for the vector index. `payload` is a snapshot of the
/// outlet row at indexing time and is not resynced afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedVector {
    pub id: u64,
    pub vector: Vec<f32>,
    pub payload: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPayload {
    pub payload: serde_json::Value,
    pub score: f32,
}

/// Approximate nearest-neighbour search over named collections.
#[async_trait::async_trait]
pub trait VectorIndex: Send + Sync {
    async fn collection_exists(&self, name: &str) -> Result<bool>;

    async fn delete_collection(&self, name: &str) -> Result<()>;

    async fn create_collection(
        &self,
        name: &str,
        dimension: usize,
        metric: DistanceMetric,
    ) -> Result<()>;

    async fn upsert(&self, name: &str, records: Vec<IndexedVector>) -> Result<()>;

    /// Up to `top_k` payloads, best match first, in the index's own order.
    async fn search(&self, name: &str, query: &[f32], top_k: usize)
        -> Result<Vec<ScoredPayload>>;
}
