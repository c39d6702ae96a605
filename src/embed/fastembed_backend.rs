//! Local embedding backend built on `fastembed`.

use std::sync::Arc;

use fastembed::{InitOptions, TextEmbedding};

use super::TextEmbedder;
use crate::error::{Error, Result};

/// A `fastembed` model running in-process.
pub struct FastEmbedder {
    model: TextEmbedding,
}

impl FastEmbedder {
    /// Load a model by its Hugging Face code (e.g. `BAAI/bge-small-en-v1.5`).
    ///
    /// The weights are downloaded on first use.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Embedding`] if the model is not supported by
    /// `fastembed` or fails to initialize.
    pub fn load(model_code: &str) -> Result<Self> {
        let info = TextEmbedding::list_supported_models()
            .into_iter()
            .find(|m| m.model_code.eq_ignore_ascii_case(model_code))
            .ok_or_else(|| Error::Embedding(format!("unsupported model: {}", model_code)))?;

        let model = TextEmbedding::try_new(InitOptions::new(info.model))
            .map_err(|e| Error::Embedding(e.to_string()))?;
        Ok(Self { model })
    }
}

impl TextEmbedder for FastEmbedder {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.model
            .embed(texts.to_vec(), None)
            .map_err(|e| Error::Embedding(e.to_string()))
    }
}

/// [`EmbedderLoader`](super::EmbedderLoader) for `fastembed` models.
pub fn fastembed_loader(model_code: &str) -> Result<Arc<dyn TextEmbedder>> {
    Ok(Arc::new(FastEmbedder::load(model_code)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_model_rejected() {
        let err = FastEmbedder::load("no-such/model").err().unwrap();
        assert!(matches!(err, Error::Embedding(ref msg) if msg.contains("no-such/model")));
    }

    #[test]
    #[ignore] // Requires model download
    fn test_default_model_dimension() {
        let embedder = FastEmbedder::load(super::super::DEFAULT_MODEL).unwrap();
        let vectors = embedder.embed(&["hello world".to_string()]).unwrap();
        assert_eq!(vectors[0].len(), 384);
    }
}
