//! Embedding encoder implementations.
//!
//! Concrete backends for the core [`Encoder`] trait:
//! - **[`OpenAiEncoder`]** — calls the OpenAI embeddings API with batching,
//!   retry, and backoff. Requires `OPENAI_API_KEY`.
//! - **[`OllamaEncoder`]** — calls a local Ollama instance's `/api/embed`
//!   endpoint.
//!
//! # Retry strategy
//!
//! Both backends use exponential backoff for transient errors:
//! - HTTP 429 (rate limited) and 5xx (server error) → retry
//! - HTTP 4xx (client error, not 429) → fail immediately
//! - Network errors → retry
//! - Backoff: 1s, 2s, 4s, 8s, 16s, 32s (capped at 2^5)
//!
//! All failures cross the trait boundary as
//! [`RecommendError::Encoding`] — the recommendation pipeline never sees
//! transport details.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;

use eventide_core::{Encoder, RecommendError};

use crate::config::EmbeddingConfig;

/// Instantiate the encoder named by `embedding.provider`.
///
/// # Errors
///
/// Fails for `"disabled"` (recommendations need an encoder), an unknown
/// provider name, or a provider whose prerequisites (model, dims, API
/// key) are missing.
pub fn create_encoder(config: &EmbeddingConfig) -> Result<Arc<dyn Encoder>> {
    match config.provider.as_str() {
        "openai" => Ok(Arc::new(OpenAiEncoder::new(config)?)),
        "ollama" => Ok(Arc::new(OllamaEncoder::new(config)?)),
        "disabled" => bail!("Embedding provider is disabled; recommendations require one"),
        other => bail!("Unknown embedding provider: {}", other),
    }
}

// ============ OpenAI ============

/// Encoder backed by the OpenAI embeddings API (`POST /v1/embeddings`).
pub struct OpenAiEncoder {
    model: String,
    dims: usize,
    max_retries: u32,
    timeout_secs: u64,
}

impl OpenAiEncoder {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let model = config
            .model
            .clone()
            .ok_or_else(|| anyhow::anyhow!("embedding.model required for OpenAI provider"))?;
        let dims = config
            .dims
            .ok_or_else(|| anyhow::anyhow!("embedding.dims required for OpenAI provider"))?;

        if std::env::var("OPENAI_API_KEY").is_err() {
            bail!("OPENAI_API_KEY environment variable not set");
        }

        Ok(Self {
            model,
            dims,
            max_retries: config.max_retries,
            timeout_secs: config.timeout_secs,
        })
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY not set"))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()?;

        let body = serde_json::json!({
            "model": self.model,
            "input": texts,
        });

        let mut last_err = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = Duration::from_secs(1 << (attempt - 1).min(5));
                tokio::time::sleep(delay).await;
            }

            let resp = client
                .post("https://api.openai.com/v1/embeddings")
                .header("Authorization", format!("Bearer {}", api_key))
                .header("Content-Type", "application/json")
                .json(&body)
                .send()
                .await;

            match resp {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        let json: serde_json::Value = response.json().await?;
                        return parse_openai_response(&json);
                    }

                    if status.as_u16() == 429 || status.is_server_error() {
                        let body_text = response.text().await.unwrap_or_default();
                        last_err =
                            Some(anyhow::anyhow!("OpenAI API error {}: {}", status, body_text));
                        continue;
                    }

                    let body_text = response.text().await.unwrap_or_default();
                    bail!("OpenAI API error {}: {}", status, body_text);
                }
                Err(e) => {
                    last_err = Some(e.into());
                    continue;
                }
            }
        }

        Err(last_err.unwrap_or_else(|| anyhow::anyhow!("Embedding failed after retries")))
    }
}

#[async_trait]
impl Encoder for OpenAiEncoder {
    fn model_name(&self) -> &str {
        &self.model
    }

    fn dims(&self) -> usize {
        self.dims
    }

    async fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RecommendError> {
        self.embed(texts)
            .await
            .map_err(|e| RecommendError::Encoding {
                message: e.to_string(),
            })
    }
}

fn parse_openai_response(json: &serde_json::Value) -> Result<Vec<Vec<f32>>> {
    let data = json
        .get("data")
        .and_then(|d| d.as_array())
        .ok_or_else(|| anyhow::anyhow!("Invalid OpenAI response: missing data array"))?;

    let mut embeddings = Vec::with_capacity(data.len());

    for item in data {
        let embedding = item
            .get("embedding")
            .and_then(|e| e.as_array())
            .ok_or_else(|| anyhow::anyhow!("Invalid OpenAI response: missing embedding"))?;

        let vec: Vec<f32> = embedding
            .iter()
            .map(|v| v.as_f64().unwrap_or(0.0) as f32)
            .collect();

        embeddings.push(vec);
    }

    Ok(embeddings)
}

// ============ Ollama ============

/// Encoder backed by a local Ollama instance (`POST /api/embed`).
pub struct OllamaEncoder {
    model: String,
    dims: usize,
    url: String,
    max_retries: u32,
    timeout_secs: u64,
}

impl OllamaEncoder {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let model = config
            .model
            .clone()
            .ok_or_else(|| anyhow::anyhow!("embedding.model required for Ollama provider"))?;
        let dims = config
            .dims
            .ok_or_else(|| anyhow::anyhow!("embedding.dims required for Ollama provider"))?;
        let url = config
            .url
            .clone()
            .unwrap_or_else(|| "http://localhost:11434".to_string());

        Ok(Self {
            model,
            dims,
            url,
            max_retries: config.max_retries,
            timeout_secs: config.timeout_secs,
        })
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()?;

        let body = serde_json::json!({
            "model": self.model,
            "input": texts,
        });

        let mut last_err = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = Duration::from_secs(1 << (attempt - 1).min(5));
                tokio::time::sleep(delay).await;
            }

            let resp = client
                .post(format!("{}/api/embed", self.url))
                .header("Content-Type", "application/json")
                .json(&body)
                .send()
                .await;

            match resp {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        let json: serde_json::Value = response.json().await?;
                        return parse_ollama_response(&json);
                    }

                    if status.as_u16() == 429 || status.is_server_error() {
                        let body_text = response.text().await.unwrap_or_default();
                        last_err =
                            Some(anyhow::anyhow!("Ollama API error {}: {}", status, body_text));
                        continue;
                    }

                    let body_text = response.text().await.unwrap_or_default();
                    bail!("Ollama API error {}: {}", status, body_text);
                }
                Err(e) => {
                    last_err = Some(anyhow::anyhow!(
                        "Ollama connection error (is Ollama running at {}?): {}",
                        self.url,
                        e
                    ));
                    continue;
                }
            }
        }

        Err(last_err.unwrap_or_else(|| anyhow::anyhow!("Ollama embedding failed after retries")))
    }
}

#[async_trait]
impl Encoder for OllamaEncoder {
    fn model_name(&self) -> &str {
        &self.model
    }

    fn dims(&self) -> usize {
        self.dims
    }

    async fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RecommendError> {
        self.embed(texts)
            .await
            .map_err(|e| RecommendError::Encoding {
                message: e.to_string(),
            })
    }
}

fn parse_ollama_response(json: &serde_json::Value) -> Result<Vec<Vec<f32>>> {
    let embeddings = json
        .get("embeddings")
        .and_then(|e| e.as_array())
        .ok_or_else(|| anyhow::anyhow!("Invalid Ollama response: missing embeddings array"))?;

    let mut result = Vec::with_capacity(embeddings.len());

    for embedding in embeddings {
        let vec: Vec<f32> = embedding
            .as_array()
            .ok_or_else(|| anyhow::anyhow!("Invalid Ollama response: embedding is not an array"))?
            .iter()
            .map(|v| v.as_f64().unwrap_or(0.0) as f32)
            .collect();
        result.push(vec);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_openai_response() {
        let json = serde_json::json!({
            "data": [
                { "embedding": [0.1, 0.2, 0.3] },
                { "embedding": [0.4, 0.5, 0.6] }
            ]
        });
        let vecs = parse_openai_response(&json).unwrap();
        assert_eq!(vecs.len(), 2);
        assert_eq!(vecs[0].len(), 3);
        assert!((vecs[1][0] - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_parse_openai_response_missing_data() {
        let json = serde_json::json!({ "error": "nope" });
        assert!(parse_openai_response(&json).is_err());
    }

    #[test]
    fn test_parse_ollama_response() {
        let json = serde_json::json!({
            "embeddings": [[1.0, 0.0], [0.0, 1.0]]
        });
        let vecs = parse_ollama_response(&json).unwrap();
        assert_eq!(vecs.len(), 2);
        assert_eq!(vecs[0], vec![1.0, 0.0]);
    }

    #[test]
    fn test_parse_ollama_response_malformed() {
        let json = serde_json::json!({ "embeddings": "not an array" });
        assert!(parse_ollama_response(&json).is_err());
    }

    #[test]
    fn test_create_encoder_rejects_disabled() {
        let config = EmbeddingConfig::default();
        assert!(create_encoder(&config).is_err());
    }
}
