use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{
        sse::{Event, Sse},
        IntoResponse, Response,
    },
    Json,
};
use futures::StreamExt;
use nq_core::ArticleMetadata;
use serde::Deserialize;
use serde_json::json;

use crate::AppState;

pub const QUESTION_REQUIRED: &str = "Question parameter \"q\" is required";
pub const INAPPROPRIATE_QUESTION: &str = "Your question contains inappropriate content";

#[derive(Debug, Deserialize)]
pub struct AskParams {
    q: Option<String>,
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

/// `GET /ask?q=...`: validates the question, then streams the answer as SSE.
pub async fn ask(State(state): State<Arc<AppState>>, Query(params): Query<AskParams>) -> Response {
    let question = params.q.as_deref().unwrap_or_default().trim().to_string();
    tracing::info!("Question: {:?}", question);

    if question.is_empty() {
        return bad_request(QUESTION_REQUIRED);
    }
    if state.moderation.is_offensive(&question) {
        return bad_request(INAPPROPRIATE_QUESTION);
    }

    let events = state
        .pipeline
        .answer(question)
        .map(|message| Event::default().json_data(message));

    ([(header::CONNECTION, "keep-alive")], Sse::new(events)).into_response()
}

/// `GET /api/articles`: the current metadata snapshot, without crawled bodies.
pub async fn list_articles(State(state): State<Arc<AppState>>) -> Response {
    let cache = state.pipeline.cache();
    if let Err(e) = cache.ensure_fresh().await {
        tracing::error!("Failed to refresh metadata: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to load articles" })),
        )
            .into_response();
    }

    let articles: Vec<ArticleMetadata> = cache
        .current()
        .await
        .into_iter()
        .map(|article| ArticleMetadata {
            content: None,
            ..article
        })
        .collect();
    Json(articles).into_response()
}
