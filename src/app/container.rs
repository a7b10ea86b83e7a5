//! Application container wiring adapters to the domain.

use std::{path::Path, sync::Arc};

use crate::{
    Result,
    adapters::{InMemoryRepository, MsgPackRepository},
    ports::repository::ModelRepository,
    q_learning::{Hyperparameters, QLearningAgent, SavedAgent},
};

/// Dependency container for the command-line entry points.
///
/// Owns the repository behind an `Arc` so commands and worker threads can
/// share it.
pub struct App {
    repository: Arc<dyn ModelRepository + Send + Sync>,
    default_seed: u64,
}

impl App {
    /// Production wiring: MessagePack artifacts on disk.
    pub fn new() -> Self {
        Self {
            repository: Arc::new(MsgPackRepository::new()),
            default_seed: 0,
        }
    }

    /// Builder pre-wired with in-memory adapters for tests.
    pub fn for_testing() -> AppBuilder {
        AppBuilder {
            repository: Arc::new(InMemoryRepository::new()),
            default_seed: 0,
        }
    }

    pub fn repository(&self) -> Arc<dyn ModelRepository + Send + Sync> {
        Arc::clone(&self.repository)
    }

    pub fn default_seed(&self) -> u64 {
        self.default_seed
    }

    /// Fresh agent for the given hyperparameters and action-set size.
    pub fn create_agent(&self, hp: Hyperparameters, actions: usize, seed: u64) -> QLearningAgent {
        QLearningAgent::with_seed(hp, actions, seed)
    }

    /// Load a model artifact and reconstruct it for greedy evaluation.
    pub fn load_agent(&self, path: &Path) -> Result<(SavedAgent, QLearningAgent)> {
        let saved = self.repository.load(path)?;
        let agent = saved.to_evaluation_agent(self.default_seed)?;
        Ok((saved, agent))
    }

    /// Persist a trained agent under the given variant name.
    pub fn save_agent(&self, agent: &QLearningAgent, variant: &str, path: &Path) -> Result<()> {
        let saved = SavedAgent::from_agent(agent, variant);
        self.repository.save(&saved, path)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for customized containers, mainly in tests.
pub struct AppBuilder {
    repository: Arc<dyn ModelRepository + Send + Sync>,
    default_seed: u64,
}

impl AppBuilder {
    pub fn with_repository(mut self, repository: Arc<dyn ModelRepository + Send + Sync>) -> Self {
        self.repository = repository;
        self
    }

    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = seed;
        self
    }

    pub fn build(self) -> App {
        App {
            repository: self.repository,
            default_seed: self.default_seed,
        }
    }
}
