use std::sync::Arc;

use crate::{AskPipeline, ModerationPolicy};

pub struct AppState {
    pub pipeline: Arc<AskPipeline>,
    pub moderation: ModerationPolicy,
}

impl AppState {
    pub fn new(pipeline: Arc<AskPipeline>, moderation: ModerationPolicy) -> Self {
        Self { pipeline, moderation }
    }
}
