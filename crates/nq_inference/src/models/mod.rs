use std::sync::Arc;

use nq_core::{Error, InferenceModel, Result};

use crate::Config;

pub mod dummy;
pub mod huggingface;

pub use dummy::DummyModel;
pub use huggingface::HuggingFaceModel;

/// Builds the model named by `config.model_name` (Hugging Face by default).
pub fn create_model(config: Config) -> Result<Arc<dyn InferenceModel>> {
    let name = config
        .model_name
        .clone()
        .unwrap_or_else(|| "huggingface".to_string())
        .to_lowercase();

    match name.as_str() {
        "huggingface" | "hf" => Ok(Arc::new(HuggingFaceModel::new(config)?)),
        "dummy" => Ok(Arc::new(DummyModel::new())),
        other => Err(Error::Config(format!(
            "Unknown model: {}. Available models: huggingface, dummy",
            other
        ))),
    }
}
