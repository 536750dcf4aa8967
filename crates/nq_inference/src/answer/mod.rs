use std::sync::Arc;
use std::time::Duration;

use futures::stream::BoxStream;
use nq_core::{InferenceModel, NewsArticle};

pub mod errors;
pub mod prompt;

pub use errors::llm_error_message;
pub use prompt::build_prompt;

/// Turns a question and its supporting articles into a paced stream of text.
pub struct AnswerGenerator {
    model: Arc<dyn InferenceModel>,
    token_delay: Duration,
}

impl AnswerGenerator {
    pub fn new(model: Arc<dyn InferenceModel>, token_delay: Duration) -> Self {
        Self { model, token_delay }
    }

    /// Asks the model once, then replays the answer word by word, each
    /// followed by a space, with `token_delay` between words.
    ///
    /// Failures never surface as errors: an empty answer or a provider error
    /// becomes a single explanatory fragment.
    pub fn generate(&self, question: &str, articles: &[NewsArticle]) -> BoxStream<'static, String> {
        let prompt = build_prompt(question, articles);
        let model = Arc::clone(&self.model);
        let delay = self.token_delay;

        Box::pin(async_stream::stream! {
            match model.complete(&prompt).await {
                Ok(text) if !text.trim().is_empty() => {
                    for (i, word) in text.split_whitespace().enumerate() {
                        if i > 0 && !delay.is_zero() {
                            tokio::time::sleep(delay).await;
                        }
                        yield format!("{} ", word);
                    }
                }
                Ok(_) => {
                    tracing::warn!(model = model.name(), "Model returned an empty answer");
                    yield errors::EMPTY_ANSWER.to_string();
                }
                Err(e) => {
                    tracing::error!(model = model.name(), status = ?e.status(), "LLM error: {}", e);
                    yield llm_error_message(&e).to_string();
                }
            }
        })
    }
}
