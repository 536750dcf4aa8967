use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use nq_core::{ArticleMetadata, Error, FeedFetcher, NewsSource, Result};
use tokio::sync::{Mutex, RwLock};

use crate::{CacheConfig, Clock};

#[derive(Debug, Default)]
struct Snapshot {
    articles: Vec<ArticleMetadata>,
    fetched_at: Option<DateTime<Utc>>,
}

/// Process-wide store of the latest feed fetch.
///
/// Holds one snapshot at a time, newest article first. A refresh replaces the
/// whole snapshot; only one refresh runs at a time.
pub struct MetadataCache {
    sources: Vec<NewsSource>,
    fetcher: Arc<dyn FeedFetcher>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    snapshot: RwLock<Snapshot>,
    refresh_lock: Mutex<()>,
}

impl MetadataCache {
    pub fn new(
        sources: Vec<NewsSource>,
        fetcher: Arc<dyn FeedFetcher>,
        clock: Arc<dyn Clock>,
        config: CacheConfig,
    ) -> Self {
        Self {
            sources,
            fetcher,
            clock,
            ttl: config.ttl,
            snapshot: RwLock::new(Snapshot::default()),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Refreshes the snapshot if it is empty or older than the TTL.
    ///
    /// The refresh runs on its own task: callers that go away mid-refresh do
    /// not cancel it for the others waiting on it.
    pub async fn ensure_fresh(self: &Arc<Self>) -> Result<()> {
        if !self.is_stale().await {
            return Ok(());
        }
        let cache = Arc::clone(self);
        tokio::spawn(async move { cache.refresh_if_stale().await })
            .await
            .map_err(|e| Error::Feed(format!("Metadata refresh task failed: {}", e)))
    }

    /// Current snapshot, newest first.
    pub async fn current(&self) -> Vec<ArticleMetadata> {
        self.snapshot.read().await.articles.clone()
    }

    pub async fn len(&self) -> usize {
        self.snapshot.read().await.articles.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn last_fetched(&self) -> Option<DateTime<Utc>> {
        self.snapshot.read().await.fetched_at
    }

    /// Records crawled content for an article still in the snapshot.
    /// Content already present is never overwritten.
    pub async fn store_content(&self, updated: ArticleMetadata) -> bool {
        let Some(content) = updated.content else {
            return false;
        };
        let mut snapshot = self.snapshot.write().await;
        match snapshot
            .articles
            .iter_mut()
            .find(|a| a.id == updated.id && a.content.is_none())
        {
            Some(existing) => {
                existing.content = Some(content);
                true
            }
            None => false,
        }
    }

    /// Fetches every source and swaps in the result unconditionally.
    pub async fn force_refresh(&self) -> usize {
        let _guard = self.refresh_lock.lock().await;
        self.refresh().await
    }

    async fn refresh_if_stale(&self) {
        let _guard = self.refresh_lock.lock().await;
        // another caller may have refreshed while we waited
        if self.is_stale().await {
            self.refresh().await;
        }
    }

    async fn is_stale(&self) -> bool {
        let snapshot = self.snapshot.read().await;
        match snapshot.fetched_at {
            _ if snapshot.articles.is_empty() => true,
            None => true,
            Some(fetched_at) => match (self.clock.now() - fetched_at).to_std() {
                Ok(elapsed) => elapsed > self.ttl,
                Err(_) => false,
            },
        }
    }

    async fn refresh(&self) -> usize {
        let started_at = self.clock.now();
        tracing::info!("Fetching article metadata from {} feeds", self.sources.len());

        let batches = join_all(self.sources.iter().map(|source| self.fetcher.fetch(source))).await;
        let mut articles: Vec<ArticleMetadata> = batches.into_iter().flatten().collect();
        articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        let count = articles.len();
        *self.snapshot.write().await = Snapshot {
            articles,
            fetched_at: Some(started_at),
        };
        tracing::info!("Fetched metadata for {} articles", count);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;

    struct ManualClock(StdMutex<DateTime<Utc>>);

    impl ManualClock {
        fn new() -> Self {
            Self(StdMutex::new(Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()))
        }

        fn advance(&self, by: chrono::Duration) {
            let mut now = self.0.lock().unwrap();
            *now = *now + by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    #[derive(Default)]
    struct FakeFeeds {
        items: HashMap<String, Vec<(String, i64)>>,
        calls: AtomicUsize,
        delay_ms: u64,
    }

    impl FakeFeeds {
        fn with(mut self, source: &str, items: &[(&str, i64)]) -> Self {
            self.items.insert(
                source.to_string(),
                items.iter().map(|(t, h)| (t.to_string(), *h)).collect(),
            );
            self
        }
    }

    #[async_trait]
    impl FeedFetcher for FakeFeeds {
        async fn fetch(&self, source: &NewsSource) -> Vec<ArticleMetadata> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
            }
            let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
            self.items
                .get(&source.name)
                .map(|items| {
                    items
                        .iter()
                        .map(|(title, hour)| ArticleMetadata {
                            id: ArticleMetadata::make_id(&source.name, title),
                            title: title.clone(),
                            description: String::new(),
                            url: format!("{}/{}", source.base_url, title),
                            source: source.name.clone(),
                            published_at: base + chrono::Duration::hours(*hour),
                            content: None,
                        })
                        .collect()
                })
                .unwrap_or_default()
        }
    }

    fn sources() -> Vec<NewsSource> {
        vec![
            NewsSource::new("alpha", "https://alpha.test/feed", "https://alpha.test"),
            NewsSource::new("beta", "https://beta.test/feed", "https://beta.test"),
            NewsSource::new("dead", "https://dead.test/feed", "https://dead.test"),
        ]
    }

    fn feeds() -> FakeFeeds {
        FakeFeeds::default()
            .with("alpha", &[("a1", 1), ("a2", 5)])
            .with("beta", &[("b1", 3)])
    }

    fn cache(feeds: Arc<FakeFeeds>, clock: Arc<ManualClock>) -> Arc<MetadataCache> {
        Arc::new(MetadataCache::new(sources(), feeds, clock, CacheConfig::default()))
    }

    #[tokio::test]
    async fn test_refresh_merges_sources_newest_first() {
        let feeds = Arc::new(feeds());
        let cache = cache(feeds.clone(), Arc::new(ManualClock::new()));

        cache.ensure_fresh().await.unwrap();
        let titles: Vec<_> = cache.current().await.into_iter().map(|a| a.title).collect();
        assert_eq!(titles, vec!["a2", "b1", "a1"]);
        // the dead source is tolerated
        assert_eq!(feeds.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_ensure_fresh_within_ttl_fetches_once() {
        let feeds = Arc::new(feeds());
        let clock = Arc::new(ManualClock::new());
        let cache = cache(feeds.clone(), clock.clone());

        cache.ensure_fresh().await.unwrap();
        clock.advance(chrono::Duration::minutes(29));
        cache.ensure_fresh().await.unwrap();
        assert_eq!(feeds.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_ensure_fresh_after_ttl_fetches_again() {
        let feeds = Arc::new(feeds());
        let clock = Arc::new(ManualClock::new());
        let cache = cache(feeds.clone(), clock.clone());

        cache.ensure_fresh().await.unwrap();
        let first = cache.last_fetched().await.unwrap();
        clock.advance(chrono::Duration::minutes(31));
        cache.ensure_fresh().await.unwrap();
        assert_eq!(feeds.calls.load(Ordering::SeqCst), 6);
        assert_eq!(cache.last_fetched().await.unwrap(), first + chrono::Duration::minutes(31));
    }

    #[tokio::test]
    async fn test_empty_snapshot_is_always_stale() {
        let feeds = Arc::new(FakeFeeds::default());
        let cache = cache(feeds.clone(), Arc::new(ManualClock::new()));

        cache.ensure_fresh().await.unwrap();
        cache.ensure_fresh().await.unwrap();
        assert!(cache.is_empty().await);
        assert_eq!(feeds.calls.load(Ordering::SeqCst), 6);
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_refresh() {
        let feeds = Arc::new(FakeFeeds {
            delay_ms: 30,
            ..feeds()
        });
        let cache = cache(feeds.clone(), Arc::new(ManualClock::new()));

        let results = join_all((0..5).map(|_| cache.ensure_fresh())).await;
        assert!(results.iter().all(|r| r.is_ok()));
        assert_eq!(feeds.calls.load(Ordering::SeqCst), 3);
        assert_eq!(cache.len().await, 3);
    }

    #[tokio::test]
    async fn test_store_content_is_one_way() {
        let cache = cache(Arc::new(feeds()), Arc::new(ManualClock::new()));
        cache.ensure_fresh().await.unwrap();

        let article = cache.current().await[0].clone();
        assert!(cache.store_content(article.with_content("first")).await);
        assert!(!cache.store_content(article.with_content("second")).await);
        assert!(!cache.store_content(article.clone()).await);

        let stored = cache.current().await[0].clone();
        assert_eq!(stored.content.as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn test_refresh_replaces_snapshot() {
        let cache = cache(Arc::new(feeds()), Arc::new(ManualClock::new()));
        cache.ensure_fresh().await.unwrap();
        let article = cache.current().await[0].clone();
        cache.store_content(article.with_content("body")).await;

        assert_eq!(cache.force_refresh().await, 3);
        assert!(cache.current().await.iter().all(|a| a.content.is_none()));
    }
}
