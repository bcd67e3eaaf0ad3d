use crate::error::Result;

/// Dimensionality of `text-embedding-3-small`, and of the outlet collection.
pub const EMBEDDING_DIMENSION: usize = 1536;

#[async_trait::async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single text into a vector of `dimension()` floats.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    fn dimension(&self) -> usize {
        EMBEDDING_DIMENSION
    }
}
