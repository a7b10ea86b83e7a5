//! Serialization support for trained agents.
//!
//! A model artifact carries the full learned table plus the hyperparameter
//! bundle, keyed by variant name. Reloading is evaluation-only: the
//! reconstructed agent plays pure greedy (ε = 0) and there is no mid-training
//! checkpoint resume, matching the training pipeline's no-retry policy.

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    error::Error,
    q_learning::{
        agent::{Hyperparameters, QLearningAgent},
        q_table::QTable,
    },
};

/// Versioned, serializable snapshot of a trained agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedAgent {
    /// Artifact format version.
    pub version: u32,
    /// Variant name the artifact is keyed by.
    pub variant: String,
    table: QTable,
    hyperparameters: Hyperparameters,
}

impl SavedAgent {
    /// Current artifact format version.
    pub const VERSION: u32 = 1;

    /// Snapshot a trained agent under the given variant name.
    pub fn from_agent(agent: &QLearningAgent, variant: impl Into<String>) -> Self {
        Self {
            version: Self::VERSION,
            variant: variant.into(),
            table: agent.export_table(),
            hyperparameters: *agent.hyperparameters(),
        }
    }

    /// Hyperparameters the agent was trained with.
    pub fn hyperparameters(&self) -> &Hyperparameters {
        &self.hyperparameters
    }

    /// The learned table.
    pub fn table(&self) -> &QTable {
        &self.table
    }

    /// Reconstruct an agent for evaluation playback.
    ///
    /// The table is pre-populated from the artifact; unseen keys still
    /// default to the zero vector. ε is forced to 0, so playback is pure
    /// greedy regardless of where the training schedule left off.
    pub fn to_evaluation_agent(&self, seed: u64) -> Result<QLearningAgent> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedModelVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }
        Ok(QLearningAgent::from_parts(
            self.table.clone(),
            self.hyperparameters,
            0.0,
            StdRng::seed_from_u64(seed),
        ))
    }
}
