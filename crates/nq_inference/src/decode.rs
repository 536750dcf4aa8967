//! Decoders for the loosely shaped payloads returned by inference providers.

use nq_core::{Embedding, Error, Result};
use serde::Deserialize;
use serde_json::Value;

/// Shapes a feature-extraction endpoint may answer with.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum EmbeddingPayload {
    /// One vector per input: `[[0.1, 0.2, ...]]`
    Nested(Vec<Vec<f32>>),
    /// A single vector: `[0.1, 0.2, ...]`
    Flat(Vec<f32>),
    /// Anything else that is still a list, e.g. per-token vectors.
    Other(Vec<Value>),
}

impl EmbeddingPayload {
    pub fn into_embedding(self) -> Result<Embedding> {
        match self {
            EmbeddingPayload::Nested(vectors) => Ok(vectors.into_iter().next().unwrap_or_default()),
            EmbeddingPayload::Flat(vector) => Ok(vector),
            EmbeddingPayload::Other(values) => match values.into_iter().next() {
                Some(first) => decode_embedding(first),
                None => Ok(Vec::new()),
            },
        }
    }
}

pub fn decode_embedding(value: Value) -> Result<Embedding> {
    serde_json::from_value::<EmbeddingPayload>(value)
        .map_err(|e| Error::Inference(format!("Unexpected embedding response: {}", e)))?
        .into_embedding()
}

#[derive(Debug, Deserialize)]
pub struct GeneratedText {
    #[serde(default)]
    pub generated_text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Shapes a text-generation or chat endpoint may answer with.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum GenerationPayload {
    Chat { choices: Vec<ChatChoice> },
    List(Vec<GeneratedText>),
    Single(GeneratedText),
    Text(String),
}

impl GenerationPayload {
    pub fn into_text(self) -> String {
        match self {
            GenerationPayload::Chat { choices } => choices
                .into_iter()
                .next()
                .and_then(|c| c.message.content)
                .unwrap_or_default(),
            GenerationPayload::List(items) => items
                .into_iter()
                .next()
                .and_then(|g| g.generated_text)
                .unwrap_or_default(),
            GenerationPayload::Single(g) => g.generated_text.unwrap_or_default(),
            GenerationPayload::Text(text) => text,
        }
    }
}

/// Generated text, or an empty string when the payload has none.
pub fn decode_generated_text(value: Value) -> String {
    serde_json::from_value::<GenerationPayload>(value)
        .map(GenerationPayload::into_text)
        .unwrap_or_default()
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorField {
    Message(String),
    Detailed {
        message: String,
        #[serde(default)]
        code: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorField,
}

/// Builds an [`Error::Provider`] from a non-success response body.
pub fn provider_error(status: u16, body: &str) -> Error {
    let (message, code) = match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { error: ErrorField::Message(message) }) => (message, None),
        Ok(ErrorBody { error: ErrorField::Detailed { message, code } }) => (message, code),
        Err(_) if body.trim().is_empty() => (format!("HTTP {}", status), None),
        Err(_) => (body.trim().chars().take(500).collect(), None),
    };
    Error::Provider {
        status: Some(status),
        message,
        code,
    }
}
