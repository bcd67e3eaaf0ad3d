use application::{OverlapService, RetrievalService};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub overlaps: Arc<OverlapService>,
    pub retrieval: Arc<RetrievalService>,
}
