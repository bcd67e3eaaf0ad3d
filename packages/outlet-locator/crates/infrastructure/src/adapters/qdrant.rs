use domain::ports::{DistanceMetric, IndexedVector, ScoredPayload, VectorIndex};
use domain::{LocatorError, Result};
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, Query, QueryPointsBuilder, ScoredPoint,
    UpsertPointsBuilder, VectorParamsBuilder,
};
use qdrant_client::{Payload, Qdrant, QdrantError};
use std::time::Duration;

/// Qdrant vector index over the official gRPC client.
pub struct QdrantIndex {
    client: Qdrant,
}

impl QdrantIndex {
    pub fn new(url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Qdrant::from_url(url)
            .api_key(api_key)
            .timeout(timeout)
            .build()
            .map_err(|e| qdrant_error("client setup", e))?;

        Ok(Self { client })
    }
}

fn qdrant_error(operation: &str, err: QdrantError) -> LocatorError {
    LocatorError::ProviderFailure(format!("Vector index {} failed: {}", operation, err))
}

fn distance(metric: DistanceMetric) -> Distance {
    match metric {
        DistanceMetric::Cosine => Distance::Cosine,
        DistanceMetric::Dot => Distance::Dot,
        DistanceMetric::Euclid => Distance::Euclid,
    }
}

fn to_point(record: IndexedVector) -> Result<PointStruct> {
    let payload = Payload::try_from(record.payload).map_err(|e| {
        LocatorError::ProviderFailure(format!("Point {} payload is not an object: {}", record.id, e))
    })?;
    Ok(PointStruct::new(record.id, record.vector, payload))
}

fn to_scored(hit: ScoredPoint) -> Result<ScoredPayload> {
    if hit.payload.is_empty() {
        return Err(LocatorError::ProviderFailure(
            "Search hit is missing its payload".into(),
        ));
    }

    let payload = hit
        .payload
        .into_iter()
        .map(|(key, value)| (key, value.into_json()))
        .collect::<serde_json::Map<_, _>>();

    Ok(ScoredPayload {
        payload: serde_json::Value::Object(payload),
        score: hit.score,
    })
}

#[async_trait::async_trait]
impl VectorIndex for QdrantIndex {
    async fn collection_exists(&self, name: &str) -> Result<bool> {
        self.client
            .collection_exists(name)
            .await
            .map_err(|e| qdrant_error("collection lookup", e))
    }

    async fn delete_collection(&self, name: &str) -> Result<()> {
        self.client
            .delete_collection(name)
            .await
            .map_err(|e| qdrant_error("collection delete", e))?;
        Ok(())
    }

    async fn create_collection(
        &self,
        name: &str,
        dimension: usize,
        metric: DistanceMetric,
    ) -> Result<()> {
        self.client
            .create_collection(
                CreateCollectionBuilder::new(name)
                    .vectors_config(VectorParamsBuilder::new(dimension as u64, distance(metric))),
            )
            .await
            .map_err(|e| qdrant_error("collection create", e))?;
        Ok(())
    }

    async fn upsert(&self, name: &str, records: Vec<IndexedVector>) -> Result<()> {
        tracing::debug!(collection = name, points = records.len(), "Upserting points");
        let points = records
            .into_iter()
            .map(to_point)
            .collect::<Result<Vec<_>>>()?;

        self.client
            .upsert_points(UpsertPointsBuilder::new(name, points).wait(true))
            .await
            .map_err(|e| qdrant_error("upsert", e))?;
        Ok(())
    }

    async fn search(&self, name: &str, query: &[f32], top_k: usize) -> Result<Vec<ScoredPayload>> {
        tracing::debug!(collection = name, top_k, "Searching collection");
        let response = self
            .client
            .query(
                QueryPointsBuilder::new(name)
                    .query(Query::new_nearest(query.to_vec()))
                    .limit(top_k as u64)
                    .with_payload(true),
            )
            .await
            .map_err(|e| qdrant_error("search", e))?;

        response.result.into_iter().map(to_scored).collect()
    }
}
