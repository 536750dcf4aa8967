pub mod error;
pub mod fetch;
pub mod logging;
pub mod models;
pub mod sse;
pub mod types;

pub use error::Error;
pub use fetch::{FeedFetcher, PageFetcher};
pub use models::InferenceModel;
pub use types::{ArticleMetadata, Embedding, NewsArticle, NewsSource, StreamMessage};

pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use crate::{ArticleMetadata, Error, InferenceModel, NewsArticle, NewsSource, Result, StreamMessage};
}
