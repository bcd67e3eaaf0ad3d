//! Capability interfaces for the external collaborators.
//!
//! The overlap and retrieval logic only talks to these traits, so tests can
//! swap in deterministic fakes for the database and the network services.

pub mod chat;
pub mod embedder;
pub mod outlet_store;
pub mod vector_index;

pub use chat::ChatProvider;
pub use embedder::Embedder;
pub use outlet_store::OutletStore;
pub use vector_index::{DistanceMetric, IndexedVector, ScoredPayload, VectorIndex};
