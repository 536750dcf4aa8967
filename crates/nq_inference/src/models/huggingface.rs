use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use nq_core::{Embedding, Error, InferenceModel, Result};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;

use crate::decode::{decode_embedding, decode_generated_text, provider_error};
use crate::Config;

#[derive(Serialize)]
struct FeatureExtractionRequest<'a> {
    inputs: &'a str,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

/// Hugging Face inference router: feature extraction for embeddings and the
/// OpenAI-compatible chat endpoint for answers.
pub struct HuggingFaceModel {
    client: Client,
    api_key: String,
    router_url: String,
    embedding_model: String,
    chat_model: String,
    max_new_tokens: u32,
    chat_timeout: Duration,
}

impl HuggingFaceModel {
    pub fn new(config: Config) -> Result<Self> {
        let api_key = config
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::Config("Hugging Face API key is required".to_string()))?;

        Ok(Self {
            client: Client::builder().build()?,
            api_key,
            router_url: config.router_url.trim_end_matches('/').to_string(),
            embedding_model: config.embedding_model,
            chat_model: config.chat_model,
            max_new_tokens: config.max_new_tokens,
            chat_timeout: config.chat_timeout,
        })
    }

    fn embeddings_url(&self) -> String {
        format!(
            "{}/hf-inference/models/{}/pipeline/feature-extraction",
            self.router_url, self.embedding_model
        )
    }

    fn chat_url(&self) -> String {
        format!("{}/v1/chat/completions", self.router_url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let response = request.bearer_auth(&self.api_key).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(provider_error(status.as_u16(), &body));
        }
        Ok(response.json::<Value>().await?)
    }
}

impl fmt::Debug for HuggingFaceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("router_url", &self.router_url)
            .field("embedding_model", &self.embedding_model)
            .field("chat_model", &self.chat_model)
            .finish()
    }
}

#[async_trait]
impl InferenceModel for HuggingFaceModel {
    fn name(&self) -> &str {
        "HuggingFace"
    }

    async fn generate_embeddings(&self, text: &str) -> Result<Embedding> {
        let request = self
            .client
            .post(self.embeddings_url())
            .json(&FeatureExtractionRequest { inputs: text });

        let value = self.send(request).await.map_err(|e| {
            tracing::warn!(model = %self.embedding_model, "Embedding error: {}", e);
            e
        })?;
        decode_embedding(value)
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = self
            .client
            .post(self.chat_url())
            .timeout(self.chat_timeout)
            .json(&ChatRequest {
                model: &self.chat_model,
                messages: vec![ChatMessage {
                    role: "user",
                    content: prompt,
                }],
                max_tokens: self.max_new_tokens,
            });

        let value = self.send(request).await?;
        let text = decode_generated_text(value);
        tracing::debug!(model = %self.chat_model, "Generated {} chars", text.len());
        Ok(text)
    }
}
