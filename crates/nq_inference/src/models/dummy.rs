use std::fmt;

use nq_core::{Embedding, InferenceModel, Result};

const DIMENSIONS: usize = 384;

/// Offline model: bag-of-words embeddings and a canned answer.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

fn fnv1a(word: &str) -> u64 {
    word.bytes().fold(0xcbf29ce484222325, |hash, byte| {
        (hash ^ byte as u64).wrapping_mul(0x100000001b3)
    })
}

#[async_trait::async_trait]
impl InferenceModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn generate_embeddings(&self, text: &str) -> Result<Embedding> {
        let mut embedding = vec![0.0; DIMENSIONS];
        for word in text.split_whitespace() {
            let word = word.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase();
            if word.is_empty() {
                continue;
            }
            embedding[(fnv1a(&word) % DIMENSIONS as u64) as usize] += 1.0;
        }
        Ok(embedding)
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let question = prompt
            .lines()
            .rev()
            .find_map(|line| line.trim().strip_prefix("Question:"))
            .map(str::trim)
            .unwrap_or_default();
        let sources = prompt.lines().filter(|l| l.trim_start().starts_with("Title:")).count();
        Ok(format!(
            "Based on {} recent articles, here is what I found about: {}",
            sources, question
        ))
    }
}
