//! Services wiring the outlet repository, the overlap engine and the
//! embedding/vector/chat providers together.

pub mod indexing_service;
pub mod overlap_service;
pub mod retrieval_service;

pub use indexing_service::{IndexReport, IndexingService};
pub use overlap_service::{OutletOverlap, OverlapMode, OverlapService};
pub use retrieval_service::{Query, RetrievalService, RetrievalSettings};
