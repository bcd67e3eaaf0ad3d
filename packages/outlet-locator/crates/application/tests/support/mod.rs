#![allow(dead_code)]

use domain::ports::{
    ChatProvider, DistanceMetric, Embedder, IndexedVector, OutletStore, ScoredPayload, VectorIndex,
};
use domain::{
    compute_overlaps, ChatMessage, Distance, GeoPoint, LocatorError, Outlet, OutletSite,
    OverlapFlags, Result,
};
use infrastructure::MemoryVectorIndex;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub fn outlet(id: i64, name: &str, address: &str, lat: f64, lon: f64, categories: &[&str]) -> Outlet {
    Outlet {
        id,
        name: name.to_string(),
        address: address.to_string(),
        telephone: None,
        location: GeoPoint::new(lat, lon).unwrap(),
        categories: categories.iter().map(|c| c.to_string()).collect(),
    }
}

pub fn kl_outlets() -> Vec<Outlet> {
    vec![
        outlet(11, "McDonald's KLCC", "Suria KLCC, Jalan Ampang", 3.1579, 101.7116, &["WiFi", "McCafe"]),
        outlet(12, "McDonald's Bukit Bintang", "Jalan Bukit Bintang", 3.1466, 101.7101, &["24 Hours"]),
        outlet(13, "McDonald's Cheras", "Jalan Cheras, Taman Connaught", 3.0826, 101.7397, &["Drive-Thru", "Birthday Party"]),
        outlet(14, "McDonald's Kepong", "Jalan Kepong Baru", 3.2107, 101.6368, &[]),
    ]
}

/// Outlet repository held in memory. Its overlap predicate reuses the
/// geodesic engine, standing in for PostGIS.
#[derive(Default)]
pub struct FakeStore {
    pub outlets: Vec<Outlet>,
    pub sites: Option<Vec<OutletSite>>,
    /// Overrides the predicate, e.g. to mimic PostGIS on a NULL `geom`.
    pub flags: Option<OverlapFlags>,
    pub fail: Option<LocatorError>,
    pub calls: AtomicUsize,
}

impl FakeStore {
    pub fn with(outlets: Vec<Outlet>) -> Self {
        Self {
            outlets,
            ..Default::default()
        }
    }

    pub fn failing(err: LocatorError) -> Self {
        Self {
            fail: Some(err),
            ..Default::default()
        }
    }

    fn check(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.fail {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn site_list(&self) -> Vec<OutletSite> {
        self.sites
            .clone()
            .unwrap_or_else(|| self.outlets.iter().map(OutletSite::from).collect())
    }
}

#[async_trait::async_trait]
impl OutletStore for FakeStore {
    async fn fetch_all_outlets(&self) -> Result<Vec<Outlet>> {
        self.check()?;
        Ok(self.outlets.clone())
    }

    async fn fetch_outlet_sites(&self) -> Result<Vec<OutletSite>> {
        self.check()?;
        Ok(self.site_list())
    }

    async fn fetch_overlap_flags(&self, threshold: Distance) -> Result<OverlapFlags> {
        self.check()?;
        if let Some(flags) = &self.flags {
            return Ok(flags.clone());
        }
        compute_overlaps(&self.site_list(), threshold)
    }
}

/// Deterministic bag-of-words embedder: each token is hashed into one of
/// `dimension` buckets, so identical texts embed identically.
pub struct HashEmbedder {
    pub dimension: usize,
    pub calls: AtomicUsize,
    pub fail_on_call: Option<usize>,
}

impl HashEmbedder {
    pub fn new() -> Self {
        Self {
            dimension: domain::ports::embedder::EMBEDDING_DIMENSION,
            calls: AtomicUsize::new(0),
            fail_on_call: None,
        }
    }

    pub fn failing_on(call: usize) -> Self {
        Self {
            fail_on_call: Some(call),
            ..Self::new()
        }
    }

    pub fn vector_for(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0; self.dimension];
        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let mut hasher = DefaultHasher::new();
            token.to_lowercase().hash(&mut hasher);
            vector[(hasher.finish() % self.dimension as u64) as usize] += 1.0;
        }
        vector
    }
}

#[async_trait::async_trait]
impl Embedder for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if Some(call) == self.fail_on_call {
            return Err(LocatorError::ProviderFailure("embedding quota exceeded".into()));
        }
        Ok(self.vector_for(text))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Wraps the in-memory index and records every operation in order.
#[derive(Default)]
pub struct RecordingIndex {
    pub inner: MemoryVectorIndex,
    pub log: Mutex<Vec<String>>,
    pub fail_search: bool,
}

impl RecordingIndex {
    pub fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn record(&self, entry: String) {
        self.log.lock().unwrap().push(entry);
    }
}

#[async_trait::async_trait]
impl VectorIndex for RecordingIndex {
    async fn collection_exists(&self, name: &str) -> Result<bool> {
        self.record(format!("exists {}", name));
        self.inner.collection_exists(name).await
    }

    async fn delete_collection(&self, name: &str) -> Result<()> {
        self.record(format!("delete {}", name));
        self.inner.delete_collection(name).await
    }

    async fn create_collection(
        &self,
        name: &str,
        dimension: usize,
        metric: DistanceMetric,
    ) -> Result<()> {
        self.record(format!("create {} {} {:?}", name, dimension, metric));
        self.inner.create_collection(name, dimension, metric).await
    }

    async fn upsert(&self, name: &str, records: Vec<IndexedVector>) -> Result<()> {
        self.record(format!("upsert {} {}", name, records.len()));
        self.inner.upsert(name, records).await
    }

    async fn search(&self, name: &str, query: &[f32], top_k: usize) -> Result<Vec<ScoredPayload>> {
        self.record(format!("search {} {}", name, top_k));
        if self.fail_search {
            return Err(LocatorError::ProviderFailure("vector index unreachable".into()));
        }
        self.inner.search(name, query, top_k).await
    }
}

/// Chat provider that records what it was sent and answers with a fixed text.
pub struct FakeChat {
    pub answer: Result<String>,
    pub received: Mutex<Vec<(String, Vec<ChatMessage>)>>,
}

impl FakeChat {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Ok(answer.to_string()),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: LocatorError) -> Self {
        Self {
            answer: Err(err),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, Vec<ChatMessage>)> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ChatProvider for FakeChat {
    async fn complete(&self, model: &str, messages: &[ChatMessage]) -> Result<String> {
        self.received
            .lock()
            .unwrap()
            .push((model.to_string(), messages.to_vec()));
        self.answer.clone()
    }
}
