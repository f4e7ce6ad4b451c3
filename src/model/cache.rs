//! Process-wide model cache keyed by artifact path

use super::{HousingModel, ModelError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, info};

/// Loads each artifact at most once and hands out shared, read-only handles.
///
/// Constructed by `main` and passed into the app; failed loads are not cached.
#[derive(Default)]
pub struct ModelCache {
    loaded: Mutex<HashMap<PathBuf, Arc<HousingModel>>>,
}

impl ModelCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(&self, path: &Path) -> Result<Arc<HousingModel>, ModelError> {
        let key = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());

        // Held across the load so concurrent callers cannot deserialize twice
        let mut loaded = self.loaded.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(model) = loaded.get(&key) {
            debug!(path = %key.display(), "Model cache hit");
            return Ok(Arc::clone(model));
        }

        let started = Instant::now();
        let model = Arc::new(HousingModel::load(&key)?);
        info!(
            path = %key.display(),
            trees = model.forest.n_trees(),
            max_depth = model.forest.max_depth(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Model loaded"
        );
        loaded.insert(key, Arc::clone(&model));
        Ok(model)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.loaded.lock().map(|m| m.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::SAMPLE_ARTIFACT;

    #[test]
    fn repeated_loads_return_the_same_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("housing_price_model.json");
        std::fs::write(&path, SAMPLE_ARTIFACT).unwrap();

        let cache = ModelCache::new();
        let first = cache.get_or_load(&path).unwrap();
        // Deleting the file proves the second call never touches disk
        std::fs::remove_file(&path).unwrap();
        let second = cache.get_or_load(&path).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn missing_artifact_fails_and_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let cache = ModelCache::new();
        assert!(matches!(cache.get_or_load(&path), Err(ModelError::Io { .. })));
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn corrupt_artifact_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("housing_price_model.json");
        std::fs::write(&path, b"\x80\x04\x95 not json").unwrap();

        let cache = ModelCache::new();
        assert!(matches!(cache.get_or_load(&path), Err(ModelError::Parse(_))));
    }

    #[test]
    fn cache_is_shareable_across_threads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("housing_price_model.json");
        std::fs::write(&path, SAMPLE_ARTIFACT).unwrap();

        let cache = Arc::new(ModelCache::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let path = path.clone();
                std::thread::spawn(move || cache.get_or_load(&path).unwrap())
            })
            .collect();
        let models: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert!(models.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(cache.len(), 1);
    }
}
