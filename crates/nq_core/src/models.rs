use async_trait::async_trait;
use std::fmt;
use crate::types::Embedding;
use crate::Result;

/// Remote (or local) model used for ranking and answering.
#[async_trait]
pub trait InferenceModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Generate embeddings for a piece of text
    async fn generate_embeddings(&self, text: &str) -> Result<Embedding>;

    /// Run a single, non-streaming completion for the given prompt
    async fn complete(&self, prompt: &str) -> Result<String>;
}
