use std::cmp::Ordering;
use std::sync::Arc;

use futures::future::try_join_all;
use nq_core::{ArticleMetadata, InferenceModel, Result};

pub mod keyword;
pub mod vector;

pub use keyword::keyword_search;
pub use vector::cosine_similarity;

/// Orders candidates by embedding similarity to the query, falling back to
/// keyword hits when the embedding model is unavailable.
pub struct Ranker {
    model: Arc<dyn InferenceModel>,
}

impl Ranker {
    pub fn new(model: Arc<dyn InferenceModel>) -> Self {
        Self { model }
    }

    /// Returns at most `limit` candidates, most relevant first. Never fails.
    pub async fn rank(&self, query: &str, candidates: &[ArticleMetadata], limit: usize) -> Vec<ArticleMetadata> {
        if candidates.is_empty() || limit == 0 {
            return Vec::new();
        }

        match self.semantic_scores(query, candidates).await {
            Ok(scores) => top_k(candidates, scores, limit),
            Err(e) => {
                tracing::warn!(model = self.model.name(), "Semantic search failed, using keywords: {}", e);
                keyword_search(query, candidates, limit)
            }
        }
    }

    async fn semantic_scores(&self, query: &str, candidates: &[ArticleMetadata]) -> Result<Vec<f32>> {
        let query_embedding = self.model.generate_embeddings(query).await?;

        let embeddings = try_join_all(candidates.iter().map(|candidate| {
            let text = candidate.search_text();
            async move { self.model.generate_embeddings(&text).await }
        }))
        .await?;

        Ok(embeddings
            .iter()
            .map(|embedding| cosine_similarity(&query_embedding, embedding))
            .collect())
    }
}

/// Relevance score with a total order.
pub(crate) trait Score {
    fn rank_cmp(&self, other: &Self) -> Ordering;
}

impl Score for f32 {
    fn rank_cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl Score for usize {
    fn rank_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

/// Highest scores first; equal scores keep their input order.
pub(crate) fn top_k<S: Score>(candidates: &[ArticleMetadata], scores: Vec<S>, limit: usize) -> Vec<ArticleMetadata> {
    let mut scored: Vec<(&ArticleMetadata, S)> = candidates.iter().zip(scores).collect();
    scored.sort_by(|a, b| b.1.rank_cmp(&a.1));
    scored.into_iter().take(limit).map(|(article, _)| article.clone()).collect()
}
