use domain::ports::{DistanceMetric, IndexedVector, ScoredPayload, VectorIndex};
use domain::{LocatorError, Result};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

/// In-process vector index for development and testing.
///
/// Brute-force scoring over every stored point. Suitable for the small
/// outlet collections this service deals with; use Qdrant in production.
#[derive(Default)]
pub struct MemoryVectorIndex {
    collections: RwLock<HashMap<String, Collection>>,
}

struct Collection {
    dimension: usize,
    metric: DistanceMetric,
    points: BTreeMap<u64, (Vec<f32>, serde_json::Value)>,
}

impl MemoryVectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of points in a collection, `None` if it does not exist.
    pub async fn len(&self, name: &str) -> Option<usize> {
        self.collections
            .read()
            .await
            .get(name)
            .map(|c| c.points.len())
    }
}

fn missing(name: &str) -> LocatorError {
    LocatorError::ProviderFailure(format!("Collection `{}` does not exist", name))
}

#[async_trait::async_trait]
impl VectorIndex for MemoryVectorIndex {
    async fn collection_exists(&self, name: &str) -> Result<bool> {
        Ok(self.collections.read().await.contains_key(name))
    }

    async fn delete_collection(&self, name: &str) -> Result<()> {
        self.collections.write().await.remove(name);
        Ok(())
    }

    async fn create_collection(
        &self,
        name: &str,
        dimension: usize,
        metric: DistanceMetric,
    ) -> Result<()> {
        let mut collections = self.collections.write().await;
        if collections.contains_key(name) {
            return Err(LocatorError::ProviderFailure(format!(
                "Collection `{}` already exists",
                name
            )));
        }
        collections.insert(
            name.to_string(),
            Collection {
                dimension,
                metric,
                points: BTreeMap::new(),
            },
        );
        Ok(())
    }

    async fn upsert(&self, name: &str, records: Vec<IndexedVector>) -> Result<()> {
        let mut collections = self.collections.write().await;
        let collection = collections.get_mut(name).ok_or_else(|| missing(name))?;

        // Validate the whole batch before touching the collection.
        if let Some(bad) = records.iter().find(|r| r.vector.len() != collection.dimension) {
            return Err(LocatorError::ProviderFailure(format!(
                "Point {} has dimension {}, collection expects {}",
                bad.id,
                bad.vector.len(),
                collection.dimension
            )));
        }

        for record in records {
            collection
                .points
                .insert(record.id, (record.vector, record.payload));
        }
        Ok(())
    }

    async fn search(&self, name: &str, query: &[f32], top_k: usize) -> Result<Vec<ScoredPayload>> {
        let collections = self.collections.read().await;
        let collection = collections.get(name).ok_or_else(|| missing(name))?;

        if query.len() != collection.dimension {
            return Err(LocatorError::ProviderFailure(format!(
                "Query has dimension {}, collection expects {}",
                query.len(),
                collection.dimension
            )));
        }

        let mut scored: Vec<ScoredPayload> = collection
            .points
            .values()
            .map(|(vector, payload)| ScoredPayload {
                payload: payload.clone(),
                score: score(collection.metric, query, vector),
            })
            .collect();

        // Stable sort: equal scores keep point-id order.
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(top_k);
        Ok(scored)
    }
}

/// Higher is closer for every metric.
fn score(metric: DistanceMetric, a: &[f32], b: &[f32]) -> f32 {
    match metric {
        DistanceMetric::Cosine => cosine_similarity(a, b),
        DistanceMetric::Dot => a.iter().zip(b).map(|(x, y)| x * y).sum(),
        DistanceMetric::Euclid => -a
            .iter()
            .zip(b)
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f32>()
            .sqrt(),
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
