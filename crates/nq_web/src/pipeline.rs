use std::sync::Arc;

use futures::stream::BoxStream;
use futures::StreamExt;
use nq_core::{NewsArticle, Result, StreamMessage};
use nq_feeds::{ContentFetcher, FetchedArticle};
use nq_inference::{AnswerGenerator, Ranker};
use nq_storage::MetadataCache;

pub const NO_RESULTS_MESSAGE: &str = "No relevant news articles found";
pub const PIPELINE_FAILURE_MESSAGE: &str = "An error occurred while generating the answer";

/// Default number of articles handed to the answer generator.
pub const DEFAULT_LIMIT: usize = 5;

/// Question in, answer stream out: refresh metadata, rank it, crawl only the
/// winners, then stream the generated answer.
pub struct AskPipeline {
    cache: Arc<MetadataCache>,
    ranker: Ranker,
    content: ContentFetcher,
    generator: AnswerGenerator,
    limit: usize,
}

impl AskPipeline {
    pub fn new(
        cache: Arc<MetadataCache>,
        ranker: Ranker,
        content: ContentFetcher,
        generator: AnswerGenerator,
        limit: usize,
    ) -> Self {
        Self {
            cache,
            ranker,
            content,
            generator,
            limit,
        }
    }

    pub fn cache(&self) -> &Arc<MetadataCache> {
        &self.cache
    }

    /// Always ends with exactly one `Done` or one `Error` message.
    /// Dropping the stream cancels whatever stage is in flight.
    pub fn answer(self: &Arc<Self>, question: String) -> BoxStream<'static, StreamMessage> {
        let pipeline = Arc::clone(self);

        Box::pin(async_stream::stream! {
            let articles = match pipeline.select_articles(&question).await {
                Ok(articles) => articles,
                Err(e) => {
                    tracing::error!("Error answering {:?}: {}", question, e);
                    yield StreamMessage::error(PIPELINE_FAILURE_MESSAGE);
                    return;
                }
            };

            if articles.is_empty() {
                yield StreamMessage::error(NO_RESULTS_MESSAGE);
                return;
            }

            let mut chunks = pipeline.generator.generate(&question, &articles);
            while let Some(chunk) = chunks.next().await {
                yield StreamMessage::chunk(chunk);
            }
            yield StreamMessage::Done;
        })
    }

    async fn select_articles(&self, question: &str) -> Result<Vec<NewsArticle>> {
        self.cache.ensure_fresh().await?;
        let metadata = self.cache.current().await;

        let relevant = self.ranker.rank(question, &metadata, self.limit).await;
        tracing::info!("Found {} relevant articles", relevant.len());
        if relevant.is_empty() {
            return Ok(Vec::new());
        }

        let mut articles = Vec::with_capacity(relevant.len());
        for FetchedArticle { article, populated } in self.content.fetch_many(&relevant).await {
            if let Some(updated) = populated {
                self.cache.store_content(updated).await;
            }
            articles.push(article);
        }
        Ok(articles)
    }
}
