//! Text embedding.
//!
//! Vector computation is delegated to a [`TextEmbedder`], created per model
//! name by an [`EmbedderLoader`] and kept in a process-wide [`ModelCache`].
//! This module validates requests, normalizes vectors and shapes the
//! response.
//!
//! With the `fastembed` feature, [`fastembed_loader`] provides a local
//! ONNX backend.

mod cache;
#[cfg(feature = "fastembed")]
mod fastembed_backend;

pub use cache::ModelCache;
#[cfg(feature = "fastembed")]
pub use fastembed_backend::{fastembed_loader, FastEmbedder};

use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Model used when a request names none.
pub const DEFAULT_MODEL: &str = "BAAI/bge-small-en-v1.5";

/// Computes one vector per input text.
pub trait TextEmbedder: Send + Sync {
    /// Embed `texts`, returning vectors in input order.
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Creates embedders by model name.
pub trait EmbedderLoader: Send + Sync {
    /// Load the named model.
    fn load(&self, model: &str) -> Result<Arc<dyn TextEmbedder>>;
}

impl<F> EmbedderLoader for F
where
    F: Fn(&str) -> Result<Arc<dyn TextEmbedder>> + Send + Sync,
{
    fn load(&self, model: &str) -> Result<Arc<dyn TextEmbedder>> {
        self(model)
    }
}

/// An embedding request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    /// Texts to embed
    #[serde(default)]
    pub texts: Vec<String>,

    /// Model name; [`DEFAULT_MODEL`] when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Whether to L2-normalize vectors; true when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalize: Option<bool>,
}

impl EmbeddingRequest {
    /// Create a request for `texts` with default model and normalization.
    pub fn new<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            texts: texts.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Enable or disable normalization.
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = Some(normalize);
        self
    }

    /// Model name in effect.
    pub fn model_name(&self) -> &str {
        self.model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_MODEL)
    }

    /// Normalization in effect.
    pub fn should_normalize(&self) -> bool {
        self.normalize.unwrap_or(true)
    }
}

/// Vectors for an [`EmbeddingRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    /// Model that produced the vectors
    pub model: String,

    /// One vector per input text
    pub vectors: Vec<Vec<f32>>,

    /// Vector dimension
    pub dim: usize,
}

/// Serves embedding requests through a loader and a model cache.
pub struct EmbeddingService<'a> {
    loader: &'a dyn EmbedderLoader,
    cache: &'a ModelCache,
}

impl<'a> EmbeddingService<'a> {
    /// Create a service backed by the process-wide cache.
    pub fn new(loader: &'a dyn EmbedderLoader) -> Self {
        Self::with_cache(loader, ModelCache::global())
    }

    /// Create a service backed by a specific cache.
    pub fn with_cache(loader: &'a dyn EmbedderLoader, cache: &'a ModelCache) -> Self {
        Self { loader, cache }
    }

    /// Embed the request's texts.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] if `texts` is empty; nothing is loaded.
    /// - [`Error::Embedding`] if the model cannot be loaded, the backend
    ///   fails, or the vectors do not line up with the texts.
    pub fn embed(&self, request: &EmbeddingRequest) -> Result<EmbeddingResponse> {
        if request.texts.is_empty() {
            return Err(Error::EmptyInput("texts"));
        }

        let model = request.model_name();
        let embedder = self.cache.get_or_load(model, self.loader).map_err(into_embedding)?;
        let mut vectors = embedder.embed(&request.texts).map_err(into_embedding)?;

        if vectors.len() != request.texts.len() {
            return Err(Error::Embedding(format!(
                "expected {} vectors, got {}",
                request.texts.len(),
                vectors.len()
            )));
        }
        let dim = vectors.first().map_or(0, Vec::len);
        if let Some(bad) = vectors.iter().find(|v| v.len() != dim) {
            return Err(Error::Embedding(format!(
                "inconsistent vector dimensions: {} and {}",
                dim,
                bad.len()
            )));
        }

        if request.should_normalize() {
            vectors.iter_mut().for_each(|v| l2_normalize(v));
        }

        debug!("embedded {} texts with {} (dim {})", vectors.len(), model, dim);
        Ok(EmbeddingResponse {
            model: model.to_string(),
            vectors,
            dim,
        })
    }
}

/// Embed `texts` through the process-wide cache.
pub fn embed(
    loader: &dyn EmbedderLoader,
    texts: Vec<String>,
    model: Option<&str>,
    normalize: bool,
) -> Result<EmbeddingResponse> {
    let request = EmbeddingRequest {
        texts,
        model: model.map(str::to_string),
        normalize: Some(normalize),
    };
    EmbeddingService::new(loader).embed(&request)
}

/// Scale a vector to unit length; zero vectors are left alone.
pub fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        vector.iter_mut().for_each(|x| *x /= norm);
    }
}

fn into_embedding(e: Error) -> Error {
    match e {
        Error::Embedding(_) => e,
        other => Error::Embedding(other.to_string()),
    }
}
