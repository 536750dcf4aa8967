#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use chrono::{TimeZone, Utc};
use nq_core::sse::SseParser;
use nq_core::{
    ArticleMetadata, Embedding, Error, FeedFetcher, InferenceModel, NewsSource, PageFetcher, Result, StreamMessage,
};
use nq_feeds::{ContentFetcher, FetchConfig};
use nq_inference::{AnswerGenerator, Ranker};
use nq_storage::{CacheConfig, MetadataCache, SystemClock};
use nq_web::{create_app, AppState, AskPipeline, ModerationPolicy};
use tower::ServiceExt;

#[derive(Default)]
pub struct FakeFeeds {
    pub articles: Vec<ArticleMetadata>,
    pub calls: AtomicUsize,
    /// Blow up instead of answering, like a fetcher with a bug in it.
    pub panics: bool,
}

#[async_trait]
impl FeedFetcher for FakeFeeds {
    async fn fetch(&self, _source: &NewsSource) -> Vec<ArticleMetadata> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.panics {
            panic!("feed fetcher exploded");
        }
        self.articles.clone()
    }
}

#[derive(Default)]
pub struct FakePages {
    pub pages: HashMap<String, String>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl PageFetcher for FakePages {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| Error::provider(Some(404), "not found"))
    }
}

/// Embeddings always fail; completions return `answer` and record the prompt.
#[derive(Debug)]
pub struct FakeModel {
    pub answer: String,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeModel {
    pub fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl InferenceModel for FakeModel {
    fn name(&self) -> &str {
        "Fake"
    }

    async fn generate_embeddings(&self, _text: &str) -> Result<Embedding> {
        Err(Error::provider(Some(503), "Model is currently loading"))
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.answer.clone())
    }
}

pub fn article(title: &str, description: &str, hour: u32) -> ArticleMetadata {
    let url = format!("https://thedefiant.io/news/{}", title.to_lowercase().replace(' ', "-"));
    ArticleMetadata {
        id: ArticleMetadata::make_id("The Defiant", &url),
        title: title.to_string(),
        description: description.to_string(),
        url,
        source: "The Defiant".to_string(),
        published_at: Utc.with_ymd_and_hms(2025, 1, 6, hour, 0, 0).unwrap(),
        content: None,
    }
}

pub struct TestApp {
    pub router: Router,
    pub feeds: Arc<FakeFeeds>,
    pub pages: Arc<FakePages>,
    pub model: Arc<FakeModel>,
    pub pipeline: Arc<AskPipeline>,
}

pub fn test_app(articles: Vec<ArticleMetadata>, pages: HashMap<String, String>, answer: &str) -> TestApp {
    test_app_with_feeds(
        FakeFeeds {
            articles,
            ..FakeFeeds::default()
        },
        pages,
        answer,
    )
}

pub fn test_app_with_feeds(feeds: FakeFeeds, pages: HashMap<String, String>, answer: &str) -> TestApp {
    let feeds = Arc::new(feeds);
    let pages = Arc::new(FakePages {
        pages,
        ..FakePages::default()
    });
    let model = Arc::new(FakeModel::new(answer));

    let cache = Arc::new(MetadataCache::new(
        vec![NewsSource::new("The Defiant", "https://thedefiant.io/feed", "https://thedefiant.io")],
        feeds.clone(),
        Arc::new(SystemClock),
        CacheConfig::default(),
    ));
    let pipeline = Arc::new(AskPipeline::new(
        cache,
        Ranker::new(model.clone()),
        ContentFetcher::new(pages.clone(), &FetchConfig::default()),
        AnswerGenerator::new(model.clone(), Duration::ZERO),
        5,
    ));
    let router = create_app(AppState::new(pipeline.clone(), ModerationPolicy::default()));

    TestApp {
        router,
        feeds,
        pages,
        model,
        pipeline,
    }
}

pub async fn get(router: &Router, uri: &str) -> Response<Body> {
    router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub fn parse_frames(body: &[u8]) -> Vec<StreamMessage> {
    SseParser::new().push(body)
}

pub fn content_of(frames: &[StreamMessage]) -> String {
    frames
        .iter()
        .filter_map(|f| match f {
            StreamMessage::Chunk { content } => Some(content.as_str()),
            _ => None,
        })
        .collect()
}
