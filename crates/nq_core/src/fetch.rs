use async_trait::async_trait;
use crate::types::{ArticleMetadata, NewsSource};
use crate::Result;

/// Pulls article metadata out of a news source.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Never fails: a broken source yields no articles.
    async fn fetch(&self, source: &NewsSource) -> Vec<ArticleMetadata>;
}

/// Downloads raw HTML for an article page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<String>;
}
