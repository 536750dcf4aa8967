use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed-length vector produced by an embedding model.
pub type Embedding = Vec<f32>;

/// A configured RSS source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsSource {
    pub name: String,
    pub rss_url: String,
    pub base_url: String,
}

impl NewsSource {
    pub fn new(name: impl Into<String>, rss_url: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rss_url: rss_url.into(),
            base_url: base_url.into(),
        }
    }
}

/// Lightweight per-article record taken from a feed entry.
///
/// `content` starts out empty and is populated at most once, the first time
/// the linked page is crawled successfully.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleMetadata {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub source: String,
    pub published_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ArticleMetadata {
    /// Id derived from the source name and the feed's guid or link.
    pub fn make_id(source: &str, guid_or_link: &str) -> String {
        format!("{}-{}", source, guid_or_link)
    }

    /// Text used for relevance ranking. Never includes the crawled body.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }

    pub fn with_content(&self, content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..self.clone()
        }
    }

    pub fn to_news_article(&self, content: impl Into<String>) -> NewsArticle {
        NewsArticle {
            id: self.id.clone(),
            title: self.title.clone(),
            content: content.into(),
            url: self.url.clone(),
            source: self.source.clone(),
            published_at: self.published_at,
        }
    }
}

/// Article with its full text, ready to be handed to the answer generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub id: String,
    pub title: String,
    pub content: String,
    pub url: String,
    pub source: String,
    pub published_at: DateTime<Utc>,
}

/// Messages sent to the browser over the answer stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamMessage {
    Chunk { content: String },
    Error { message: String },
    Done,
}

impl StreamMessage {
    pub fn chunk(content: impl Into<String>) -> Self {
        StreamMessage::Chunk { content: content.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        StreamMessage::Error { message: message.into() }
    }

    /// `Done` and `Error` both end a stream.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StreamMessage::Chunk { .. })
    }
}
