use async_trait::async_trait;
use chrono::{DateTime, Utc};
use feed_rs::model::Entry;
use nq_core::{ArticleMetadata, Error, FeedFetcher, NewsSource, Result};
use reqwest::Client;

use crate::html::strip_tags;
use crate::FetchConfig;

/// Reads RSS/Atom feeds over HTTP.
#[derive(Debug, Clone)]
pub struct RssFeedFetcher {
    client: Client,
    config: FetchConfig,
}

impl RssFeedFetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder().user_agent(config.user_agent.clone()).build()?;
        Ok(Self { client, config })
    }

    async fn try_fetch(&self, source: &NewsSource) -> Result<Vec<ArticleMetadata>> {
        let bytes = self
            .client
            .get(&source.rss_url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        parse_feed(source, &bytes, self.config.max_items_per_feed, Utc::now())
    }
}

#[async_trait]
impl FeedFetcher for RssFeedFetcher {
    async fn fetch(&self, source: &NewsSource) -> Vec<ArticleMetadata> {
        match self.try_fetch(source).await {
            Ok(articles) => {
                tracing::debug!("{}: {} feed items", source.name, articles.len());
                articles
            }
            Err(e) => {
                tracing::error!(source = %source.name, "Error fetching metadata: {}", e);
                Vec::new()
            }
        }
    }
}

/// Maps the first `max_items` entries of a feed document, in feed order.
/// Entries without a usable date are stamped with `now`.
pub fn parse_feed(
    source: &NewsSource,
    body: &[u8],
    max_items: usize,
    now: DateTime<Utc>,
) -> Result<Vec<ArticleMetadata>> {
    // items without a guid are identified by their link
    let feed = feed_rs::parser::Builder::new()
        .id_generator(|links, _, _| links.first().map(|l| l.href.clone()).unwrap_or_default())
        .build()
        .parse(body)
        .map_err(|e| Error::Feed(format!("Failed to parse feed {}: {}", source.rss_url, e)))?;

    Ok(feed
        .entries
        .iter()
        .take(max_items)
        .map(|entry| entry_to_metadata(source, entry, now))
        .collect())
}

fn entry_to_metadata(source: &NewsSource, entry: &Entry, now: DateTime<Utc>) -> ArticleMetadata {
    let url = entry.links.first().map(|l| l.href.clone()).unwrap_or_default();
    let guid = if entry.id.is_empty() { url.as_str() } else { entry.id.as_str() };

    let description = match (&entry.summary, &entry.content) {
        (Some(summary), _) => strip_tags(&summary.content),
        (None, Some(content)) => content.body.clone().unwrap_or_default(),
        (None, None) => String::new(),
    };

    ArticleMetadata {
        id: ArticleMetadata::make_id(&source.name, guid),
        title: entry.title.as_ref().map(|t| t.content.trim().to_string()).unwrap_or_default(),
        description,
        url,
        source: source.name.clone(),
        published_at: entry.published.or(entry.updated).unwrap_or(now),
        content: None,
    }
}
