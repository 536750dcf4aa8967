use std::time::Duration;

pub mod answer;
pub mod decode;
pub mod models;
pub mod search;

pub use answer::AnswerGenerator;
pub use models::create_model;
pub use search::Ranker;

pub const DEFAULT_ROUTER_URL: &str = "https://router.huggingface.co";
pub const DEFAULT_EMBEDDING_MODEL: &str = "BAAI/bge-small-en-v1.5";
pub const DEFAULT_CHAT_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.2:featherless-ai";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    /// Which backend `create_model` builds: `huggingface` or `dummy`.
    pub model_name: Option<String>,
    pub router_url: String,
    pub embedding_model: String,
    pub chat_model: String,
    pub max_new_tokens: u32,
    pub chat_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model_name: None,
            router_url: DEFAULT_ROUTER_URL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            max_new_tokens: 512,
            chat_timeout: Duration::from_secs(60),
        }
    }
}

pub mod prelude {
    pub use super::models::create_model;
    pub use super::{AnswerGenerator, Config, Ranker};
    pub use nq_core::{ArticleMetadata, Error, InferenceModel, NewsArticle, Result};
}
