//! In-memory model repository for tests.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex},
};

use crate::{
    Result,
    error::Error,
    ports::repository::ModelRepository,
    q_learning::SavedAgent,
};

/// Keeps serialized artifacts in a shared map keyed by path.
///
/// Clones share the same backing store, so a test can hand one clone to a
/// pipeline and inspect the results through another.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRepository {
    store: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored artifacts.
    pub fn count(&self) -> usize {
        self.store.lock().expect("repository lock poisoned").len()
    }

    /// Whether an artifact exists under the given path.
    pub fn contains(&self, path: &Path) -> bool {
        self.store
            .lock()
            .expect("repository lock poisoned")
            .contains_key(&path.display().to_string())
    }

    /// Remove all stored artifacts.
    pub fn clear(&self) {
        self.store.lock().expect("repository lock poisoned").clear();
    }
}

impl ModelRepository for InMemoryRepository {
    fn save(&self, model: &SavedAgent, path: &Path) -> Result<()> {
        let bytes = rmp_serde::to_vec(model).map_err(|e| Error::Encode {
            operation: format!("serialize model for {}", path.display()),
            message: e.to_string(),
        })?;
        self.store
            .lock()
            .expect("repository lock poisoned")
            .insert(path.display().to_string(), bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedAgent> {
        let store = self.store.lock().expect("repository lock poisoned");
        let bytes = store
            .get(&path.display().to_string())
            .ok_or_else(|| Error::ModelNotFound {
                key: path.display().to_string(),
            })?;
        rmp_serde::from_slice(bytes).map_err(|e| Error::Decode {
            operation: format!("decode model for {}", path.display()),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::q_learning::{Hyperparameters, QLearningAgent};

    #[test]
    fn clones_share_the_backing_store() {
        let repository = InMemoryRepository::new();
        let handle = repository.clone();

        let agent = QLearningAgent::with_seed(Hyperparameters::default(), 4, 1);
        let saved = SavedAgent::from_agent(&agent, "shared");
        repository.save(&saved, Path::new("models/shared.msgpack")).unwrap();

        assert_eq!(handle.count(), 1);
        assert!(handle.contains(Path::new("models/shared.msgpack")));
        let loaded = handle.load(Path::new("models/shared.msgpack")).unwrap();
        assert_eq!(loaded.variant, "shared");
    }

    #[test]
    fn missing_key_is_reported() {
        let repository = InMemoryRepository::new();
        assert!(matches!(
            repository.load(Path::new("models/absent.msgpack")),
            Err(Error::ModelNotFound { .. })
        ));
    }
}
