//! Process-wide embedding model cache.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::info;

use super::{EmbedderLoader, TextEmbedder};
use crate::error::Result;

static GLOBAL_CACHE: OnceLock<ModelCache> = OnceLock::new();

/// Loaded embedders keyed by model name.
///
/// Models are loaded on first request and never evicted. Lookups share a
/// read lock; loading happens outside any lock, so two callers may load
/// the same model concurrently, in which case the first insert wins and
/// both get the same instance.
#[derive(Default)]
pub struct ModelCache {
    models: RwLock<HashMap<String, Arc<dyn TextEmbedder>>>,
}

impl ModelCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cache shared by the whole process.
    pub fn global() -> &'static ModelCache {
        GLOBAL_CACHE.get_or_init(ModelCache::new)
    }

    /// Return the cached embedder for `model`, loading it if needed.
    pub fn get_or_load(&self, model: &str, loader: &dyn EmbedderLoader) -> Result<Arc<dyn TextEmbedder>> {
        if let Some(found) = self.read().get(model) {
            return Ok(Arc::clone(found));
        }

        let loaded = loader.load(model)?;
        info!("loaded embedding model {}", model);

        let mut models = self.write();
        Ok(Arc::clone(models.entry(model.to_string()).or_insert(loaded)))
    }

    /// Whether a model is already loaded.
    pub fn contains(&self, model: &str) -> bool {
        self.read().contains_key(model)
    }

    /// Number of loaded models.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether no model is loaded.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<dyn TextEmbedder>>> {
        self.models.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<dyn TextEmbedder>>> {
        self.models.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ModelCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        f.debug_struct("ModelCache").field("models", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed;

    impl TextEmbedder for Fixed {
        fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
        }
    }

    #[test]
    fn test_loads_once_per_model() {
        let cache = ModelCache::new();
        let loads = AtomicUsize::new(0);
        let loader = |_: &str| -> Result<Arc<dyn TextEmbedder>> {
            loads.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(Fixed))
        };

        let a = cache.get_or_load("m1", &loader).unwrap();
        let b = cache.get_or_load("m1", &loader).unwrap();
        cache.get_or_load("m2", &loader).unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(loads.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len(), 2);
        assert!(cache.contains("m2"));
    }

    #[test]
    fn test_failed_load_not_cached() {
        let cache = ModelCache::new();
        let failing = |name: &str| -> Result<Arc<dyn TextEmbedder>> {
            Err(Error::Embedding(format!("no model {}", name)))
        };
        assert!(cache.get_or_load("missing", &failing).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_global_is_shared() {
        assert!(std::ptr::eq(ModelCache::global(), ModelCache::global()));
    }
}
