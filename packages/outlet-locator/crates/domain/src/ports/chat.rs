use crate::entities::message::ChatMessage;
use crate::error::Result;

#[async_trait::async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send the ordered transcript and return the generated text verbatim.
    async fn complete(&self, model: &str, messages: &[ChatMessage]) -> Result<String>;
}
