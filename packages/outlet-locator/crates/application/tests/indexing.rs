mod support;

use application::IndexingService;
use domain::ports::VectorIndex;
use domain::{prompt, LocatorError};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use support::{kl_outlets, FakeStore, HashEmbedder, RecordingIndex};

fn service(
    store: FakeStore,
    embedder: HashEmbedder,
    index: Arc<RecordingIndex>,
) -> (IndexingService, Arc<HashEmbedder>) {
    let embedder = Arc::new(embedder);
    let service = IndexingService::new(Arc::new(store), embedder.clone(), index, "mcd_outlet");
    (service, embedder)
}

#[tokio::test]
async fn test_fresh_index_creates_then_upserts_once() {
    let index = Arc::new(RecordingIndex::default());
    let (service, embedder) = service(FakeStore::with(kl_outlets()), HashEmbedder::new(), index.clone());

    let report = service.reindex().await.unwrap();
    assert_eq!(report.collection, "mcd_outlet");
    assert_eq!(report.indexed, 4);
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 4);

    assert_eq!(
        index.log(),
        vec![
            "exists mcd_outlet".to_string(),
            "create mcd_outlet 1536 Cosine".to_string(),
            "upsert mcd_outlet 4".to_string(),
        ]
    );
    assert_eq!(index.inner.len("mcd_outlet").await, Some(4));
}

#[tokio::test]
async fn test_existing_collection_is_replaced() {
    let index = Arc::new(RecordingIndex::default());
    let (service, _) = service(FakeStore::with(kl_outlets()), HashEmbedder::new(), index.clone());

    service.reindex().await.unwrap();
    service.reindex().await.unwrap();

    let log = index.log();
    assert_eq!(&log[3..5], &["exists mcd_outlet".to_string(), "delete mcd_outlet".to_string()]);
    // Full replace, not accumulation.
    assert_eq!(index.inner.len("mcd_outlet").await, Some(4));
}

#[tokio::test]
async fn test_points_use_sequence_ids_and_full_row_payloads() {
    let index = Arc::new(RecordingIndex::default());
    let embedder = HashEmbedder::new();
    let outlets = kl_outlets();
    let probe = embedder.vector_for(&prompt::canonical_text(&outlets[2]));
    let (service, _) = service(FakeStore::with(outlets.clone()), embedder, index.clone());

    service.reindex().await.unwrap();

    let hits = index.inner.search("mcd_outlet", &probe, 1).await.unwrap();
    let payload = &hits[0].payload;
    assert_eq!(payload["id"], outlets[2].id);
    assert_eq!(payload["name"], "McDonald's Cheras");
    assert_eq!(payload["latitude"], 3.0826);
    assert_eq!(payload["categories"][0], "Drive-Thru");
    assert!((hits[0].score - 1.0).abs() < 1e-5);
}

#[tokio::test]
async fn test_embedding_failure_upserts_nothing() {
    let index = Arc::new(RecordingIndex::default());
    let (service, embedder) = service(FakeStore::with(kl_outlets()), HashEmbedder::failing_on(2), index.clone());

    let err = service.reindex().await.unwrap_err();
    assert!(matches!(err, LocatorError::ProviderFailure(_)));
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 3);

    assert!(!index.log().iter().any(|entry| entry.starts_with("upsert")));
    // The collection was already recreated, and stays empty.
    assert_eq!(index.inner.len("mcd_outlet").await, Some(0));
}

#[tokio::test]
async fn test_empty_repository_leaves_empty_collection() {
    let index = Arc::new(RecordingIndex::default());
    let (service, _) = service(FakeStore::with(vec![]), HashEmbedder::new(), index.clone());

    let report = service.reindex().await.unwrap();
    assert_eq!(report.indexed, 0);
    assert!(!index.log().iter().any(|entry| entry.starts_with("upsert")));
    assert_eq!(index.inner.len("mcd_outlet").await, Some(0));
}

#[tokio::test]
async fn test_repository_failure_is_reported() {
    let index = Arc::new(RecordingIndex::default());
    let (service, embedder) = service(
        FakeStore::failing(LocatorError::RepositoryQueryFailed("relation does not exist".into())),
        HashEmbedder::new(),
        index,
    );

    let err = service.reindex().await.unwrap_err();
    assert!(matches!(err, LocatorError::RepositoryQueryFailed(_)));
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 0);
}
