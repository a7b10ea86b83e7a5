//! Tabular Q-learning: the value table, the ε-greedy agent, and the
//! serialized artifact format.

pub mod agent;
pub mod q_table;
pub mod serialization;

pub use agent::{Hyperparameters, QLearningAgent};
pub use q_table::QTable;
pub use serialization::SavedAgent;
