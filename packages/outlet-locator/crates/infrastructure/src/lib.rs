pub mod adapters;
pub mod config;

pub use adapters::memory_index::MemoryVectorIndex;
pub use adapters::openai::OpenAiClient;
pub use adapters::qdrant::QdrantIndex;
pub use config::{Settings, VectorBackend};
