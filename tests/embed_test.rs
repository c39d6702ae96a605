//! Integration tests for the embedding service and model cache.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use docstruct::embed::{embed, EmbeddingService, ModelCache, TextEmbedder};
use docstruct::error::{Error, Result};
use docstruct::EmbeddingRequest;

/// Embeds each text as `[len, 1]`.
struct LengthEmbedder;

impl TextEmbedder for LengthEmbedder {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| vec![t.len() as f32, 1.0]).collect())
    }
}

/// Returns vectors of different lengths.
struct RaggedEmbedder;

impl TextEmbedder for RaggedEmbedder {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().enumerate().map(|(i, _)| vec![1.0; i + 1]).collect())
    }
}

/// Drops the last vector.
struct ShortEmbedder;

impl TextEmbedder for ShortEmbedder {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().skip(1).map(|_| vec![1.0]).collect())
    }
}

#[test]
fn test_empty_request_never_loads() {
    let cache = ModelCache::new();
    let loader = |_: &str| -> Result<Arc<dyn TextEmbedder>> { panic!("loader must not be called") };
    let service = EmbeddingService::with_cache(&loader, &cache);

    let err = service.embed(&EmbeddingRequest::default()).unwrap_err();
    assert!(matches!(err, Error::EmptyInput("texts")));
    assert!(err.is_input_error());
    assert!(cache.is_empty());
}

#[test]
fn test_global_cache_memoizes_by_model() {
    let loads = AtomicUsize::new(0);
    let loader = |_: &str| -> Result<Arc<dyn TextEmbedder>> {
        loads.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(LengthEmbedder))
    };
    let model = "test/global-memo";

    let first = embed(&loader, vec!["ab".into()], Some(model), false).unwrap();
    let second = embed(&loader, vec!["abcd".into(), "x".into()], Some(model), false).unwrap();

    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert!(ModelCache::global().contains(model));
    assert_eq!(first.vectors, vec![vec![2.0, 1.0]]);
    assert_eq!(second.vectors, vec![vec![4.0, 1.0], vec![1.0, 1.0]]);
    assert_eq!(second.dim, 2);
    assert_eq!(second.model, model);
}

#[test]
fn test_normalized_vectors_have_unit_length() {
    let cache = ModelCache::new();
    let loader = |_: &str| -> Result<Arc<dyn TextEmbedder>> { Ok(Arc::new(LengthEmbedder)) };
    let service = EmbeddingService::with_cache(&loader, &cache);

    let response = service
        .embed(&EmbeddingRequest::new(["a", "a much longer sentence"]))
        .unwrap();
    for vector in &response.vectors {
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }
}

#[test]
fn test_ragged_vectors_rejected() {
    let cache = ModelCache::new();
    let loader = |_: &str| -> Result<Arc<dyn TextEmbedder>> { Ok(Arc::new(RaggedEmbedder)) };
    let service = EmbeddingService::with_cache(&loader, &cache);

    let err = service.embed(&EmbeddingRequest::new(["a", "b"])).unwrap_err();
    assert!(matches!(err, Error::Embedding(_)));
    assert!(!err.is_input_error());
}

#[test]
fn test_missing_vectors_rejected() {
    let cache = ModelCache::new();
    let loader = |_: &str| -> Result<Arc<dyn TextEmbedder>> { Ok(Arc::new(ShortEmbedder)) };
    let service = EmbeddingService::with_cache(&loader, &cache);

    let err = service.embed(&EmbeddingRequest::new(["a", "b"])).unwrap_err();
    assert!(err.to_string().starts_with("embedding failed: expected 2 vectors"));
}

#[test]
fn test_concurrent_loads_share_one_instance() {
    let cache = ModelCache::new();
    let loader = |_: &str| -> Result<Arc<dyn TextEmbedder>> { Ok(Arc::new(LengthEmbedder)) };

    let embedders: Vec<Arc<dyn TextEmbedder>> = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| cache.get_or_load("shared", &loader).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(cache.len(), 1);
    let first = &embedders[0];
    assert!(embedders.iter().all(|e| Arc::ptr_eq(e, first)));
}

#[test]
fn test_request_json_shape() {
    let request: EmbeddingRequest =
        serde_json::from_str(r#"{"texts": ["a"], "model": "m", "normalize": false}"#).unwrap();
    assert_eq!(request.model_name(), "m");
    assert!(!request.should_normalize());
}
