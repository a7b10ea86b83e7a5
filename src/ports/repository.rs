//! Repository port for model artifact persistence.

use std::path::Path;

use crate::{Result, q_learning::SavedAgent};

/// Port for persisting and loading trained model artifacts.
///
/// Abstracts the storage mechanism so the pipelines can persist a trained
/// table without coupling to a serialization format. The crate ships a
/// MessagePack adapter for disk storage and an in-memory adapter for tests.
pub trait ModelRepository {
    /// Save a model artifact to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be written or encoding fails.
    /// A failed save is fatal for the worker's persistence step: the table
    /// is still valid in memory but not durably recoverable.
    fn save(&self, model: &SavedAgent, path: &Path) -> Result<()>;

    /// Load a model artifact from persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the artifact is missing, unreadable, or fails to
    /// decode.
    fn load(&self, path: &Path) -> Result<SavedAgent>;
}
