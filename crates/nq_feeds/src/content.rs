use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use nq_core::{ArticleMetadata, Error, NewsArticle, PageFetcher, Result};
use reqwest::Client;
use url::Url;

use crate::html::extract_article_text;
use crate::FetchConfig;

/// Plain `GET` with a browser user agent and a short timeout.
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.crawl_timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        let url = Url::parse(url).map_err(|e| Error::Scraping(format!("Failed to parse URL {}: {}", url, e)))?;
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

/// Result of resolving one article's full text.
#[derive(Debug, Clone)]
pub struct FetchedArticle {
    pub article: NewsArticle,
    /// Set only when this call crawled the page successfully: the metadata
    /// record with `content` filled in, ready to replace the cached one.
    pub populated: Option<ArticleMetadata>,
}

pub struct ContentFetcher {
    pages: Arc<dyn PageFetcher>,
    max_content_chars: usize,
}

impl ContentFetcher {
    pub fn new(pages: Arc<dyn PageFetcher>, config: &FetchConfig) -> Self {
        Self {
            pages,
            max_content_chars: config.max_content_chars,
        }
    }

    /// Full text for one article. Reuses cached content without touching the
    /// network; falls back to the description when the crawl fails.
    pub async fn fetch_one(&self, metadata: &ArticleMetadata) -> FetchedArticle {
        if let Some(content) = &metadata.content {
            return FetchedArticle {
                article: metadata.to_news_article(content.clone()),
                populated: None,
            };
        }

        match self.crawl(&metadata.url).await {
            Ok(content) => FetchedArticle {
                article: metadata.to_news_article(content.clone()),
                populated: Some(metadata.with_content(content)),
            },
            Err(e) => {
                tracing::warn!(url = %metadata.url, "Error fetching content: {}", e);
                FetchedArticle {
                    article: metadata.to_news_article(metadata.description.clone()),
                    populated: None,
                }
            }
        }
    }

    /// Fetches all articles concurrently; output order follows input order.
    pub async fn fetch_many(&self, articles: &[ArticleMetadata]) -> Vec<FetchedArticle> {
        join_all(articles.iter().map(|article| self.fetch_one(article))).await
    }

    async fn crawl(&self, url: &str) -> Result<String> {
        let html = self.pages.fetch_page(url).await?;
        extract_article_text(&html, self.max_content_chars)
            .ok_or_else(|| Error::Scraping(format!("No readable text at {}", url)))
    }
}
