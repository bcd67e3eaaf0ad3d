use domain::ports::{ChatProvider, Embedder, OutletStore, VectorIndex};
use domain::{prompt, ChatMessage, LocatorError, OutletSummary, Result};
use std::sync::Arc;

pub const DEFAULT_TOP_K: usize = 30;

#[derive(Debug, Clone)]
pub struct RetrievalSettings {
    pub collection: String,
    pub chat_model: String,
    pub top_k: usize,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            collection: "mcd_outlet".to_string(),
            chat_model: "gpt-3.5-turbo".to_string(),
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// A question for the pipeline, in one of its two modes.
#[derive(Debug, Clone)]
pub enum Query {
    /// Single free-text question answered from the top-k similar outlets.
    Semantic(String),
    /// Caller transcript answered with every outlet as context.
    FullContext(Vec<ChatMessage>),
}

/// Retrieval-augmented question answering over the outlet set.
///
/// Every provider or repository failure aborts the call with that error;
/// nothing is retried and no partial answer is returned.
pub struct RetrievalService {
    store: Arc<dyn OutletStore>,
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
    chat: Arc<dyn ChatProvider>,
    settings: RetrievalSettings,
}

impl RetrievalService {
    pub fn new(
        store: Arc<dyn OutletStore>,
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
        chat: Arc<dyn ChatProvider>,
        settings: RetrievalSettings,
    ) -> Self {
        Self {
            store,
            embedder,
            index,
            chat,
            settings,
        }
    }

    pub async fn answer(&self, query: Query) -> Result<String> {
        match query {
            Query::Semantic(text) => self.semantic_answer(&text).await,
            Query::FullContext(messages) => self.full_context_answer(messages).await,
        }
    }

    pub async fn semantic_answer(&self, query: &str) -> Result<String> {
        if query.trim().is_empty() {
            return Err(LocatorError::InvalidInput("Missing 'query' in request body".into()));
        }

        let vector = self.embedder.embed(query).await?;
        let hits = self
            .index
            .search(&self.settings.collection, &vector, self.settings.top_k)
            .await?;

        let retrieved = hits
            .into_iter()
            .map(|hit| {
                serde_json::from_value::<OutletSummary>(hit.payload).map_err(|e| {
                    LocatorError::ProviderFailure(format!("Malformed outlet payload in index: {}", e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(retrieved = retrieved.len(), "Answering semantic query");

        let context = prompt::semantic_context(&retrieved);
        let messages = [ChatMessage::system(prompt::semantic_system_prompt(
            query, &context,
        ))];

        self.chat
            .complete(&self.settings.chat_model, &messages)
            .await
    }

    pub async fn full_context_answer(&self, conversation: Vec<ChatMessage>) -> Result<String> {
        if conversation.is_empty() {
            return Err(LocatorError::InvalidInput(
                "Missing 'messages' in request body".into(),
            ));
        }

        let outlets = self.store.fetch_all_outlets().await?;
        tracing::info!(
            outlets = outlets.len(),
            turns = conversation.len(),
            "Answering full-context conversation"
        );

        let context = prompt::full_context(&outlets);
        let mut messages = Vec::with_capacity(conversation.len() + 1);
        messages.push(ChatMessage::system(prompt::full_context_system_prompt(
            &context,
        )));
        messages.extend(conversation);

        self.chat
            .complete(&self.settings.chat_model, &messages)
            .await
    }
}
