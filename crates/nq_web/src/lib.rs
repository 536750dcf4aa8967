use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod handlers;
pub mod moderation;
pub mod pipeline;
pub mod state;

pub use moderation::ModerationPolicy;
pub use pipeline::AskPipeline;
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/ask", get(handlers::ask))
        .route("/api/articles", get(handlers::list_articles))
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Binds `addr` and serves the app until the process is stopped.
pub async fn serve(addr: &str, state: AppState) -> nq_core::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::{create_app, serve, AppState, AskPipeline, ModerationPolicy};
    pub use nq_core::{Error, Result, StreamMessage};
}
