use super::{ensure_success, transport_error};
use domain::ports::embedder::EMBEDDING_DIMENSION;
use domain::ports::{ChatProvider, Embedder};
use domain::{ChatMessage, LocatorError, Result};
use serde::Deserialize;
use std::time::Duration;

/// OpenAI-compatible client serving both embeddings and chat completions.
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    embedding_model: String,
    dimension: usize,
}

impl OpenAiClient {
    pub fn new(
        base_url: &str,
        api_key: &str,
        embedding_model: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LocatorError::ProviderFailure(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            embedding_model: embedding_model.to_string(),
            dimension: EMBEDDING_DIMENSION,
        })
    }

    async fn post(&self, service: &str, path: &str, body: serde_json::Value) -> Result<serde_json::Value> {
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, path))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(service, e))?;

        ensure_success(service, response)
            .await?
            .json()
            .await
            .map_err(|e| LocatorError::ProviderFailure(format!("{} returned malformed JSON: {}", service, e)))
    }
}

#[async_trait::async_trait]
impl Embedder for OpenAiClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let body = self
            .post(
                "Embedding provider",
                "embeddings",
                serde_json::json!({
                    "model": self.embedding_model,
                    "input": text,
                }),
            )
            .await?;

        parse_embedding(body, self.dimension)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[async_trait::async_trait]
impl ChatProvider for OpenAiClient {
    async fn complete(&self, model: &str, messages: &[ChatMessage]) -> Result<String> {
        let body = self
            .post(
                "Chat provider",
                "chat/completions",
                serde_json::json!({
                    "model": model,
                    "messages": messages,
                }),
            )
            .await?;

        parse_completion(body)
    }
}

fn parse_embedding(body: serde_json::Value, dimension: usize) -> Result<Vec<f32>> {
    #[derive(Deserialize)]
    struct EmbeddingResponse {
        data: Vec<EmbeddingData>,
    }

    #[derive(Deserialize)]
    struct EmbeddingData {
        embedding: Vec<f32>,
    }

    let response: EmbeddingResponse = serde_json::from_value(body).map_err(|e| {
        LocatorError::ProviderFailure(format!("Unexpected embedding response: {}", e))
    })?;

    let embedding = response
        .data
        .into_iter()
        .next()
        .map(|d| d.embedding)
        .ok_or_else(|| LocatorError::ProviderFailure("No embedding returned".into()))?;

    if embedding.len() != dimension {
        return Err(LocatorError::ProviderFailure(format!(
            "Embedding dimension mismatch: expected {}, got {}",
            dimension,
            embedding.len()
        )));
    }

    Ok(embedding)
}

fn parse_completion(body: serde_json::Value) -> Result<String> {
    body.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| LocatorError::ProviderFailure("Chat provider returned no message".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_embedding_takes_first_vector() {
        let body = json!({ "data": [ { "embedding": [0.5, -0.25, 1.0] } ] });
        assert_eq!(parse_embedding(body, 3).unwrap(), vec![0.5, -0.25, 1.0]);
    }

    #[test]
    fn test_parse_embedding_rejects_wrong_dimension() {
        let body = json!({ "data": [ { "embedding": [0.5, 0.5] } ] });
        let err = parse_embedding(body, 1536).unwrap_err();
        assert!(matches!(err, LocatorError::ProviderFailure(msg) if msg.contains("expected 1536, got 2")));
    }

    #[test]
    fn test_parse_embedding_rejects_empty_data() {
        let err = parse_embedding(json!({ "data": [] }), 3).unwrap_err();
        assert!(matches!(err, LocatorError::ProviderFailure(_)));
    }

    #[test]
    fn test_parse_completion() {
        let body = json!({
            "choices": [ { "message": { "role": "assistant", "content": "KLCC, Sentral" } } ]
        });
        assert_eq!(parse_completion(body).unwrap(), "KLCC, Sentral");
        assert!(parse_completion(json!({ "choices": [] })).is_err());
    }
}
