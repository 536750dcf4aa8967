use std::time::Duration;

pub mod content;
pub mod html;
pub mod rss;
pub mod sources;

pub use content::{ContentFetcher, FetchedArticle, HttpPageFetcher};
pub use rss::RssFeedFetcher;
pub use sources::default_sources;

/// Browser-like user agent; several publishers refuse obvious bots.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Items kept per feed, in feed order.
    pub max_items_per_feed: usize,
    /// Timeout for a single article page download.
    pub crawl_timeout: Duration,
    /// Characters kept from an extracted article body.
    pub max_content_chars: usize,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_items_per_feed: 30,
            crawl_timeout: Duration::from_secs(5),
            max_content_chars: 5000,
            user_agent: BROWSER_USER_AGENT.to_string(),
        }
    }
}

pub mod prelude {
    pub use super::{ContentFetcher, FetchConfig, HttpPageFetcher, RssFeedFetcher};
    pub use nq_core::{ArticleMetadata, FeedFetcher, NewsArticle, NewsSource, PageFetcher, Result};
}
