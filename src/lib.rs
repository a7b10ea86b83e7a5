//! Tabular Q-learning for a falling-block puzzle game.
//!
//! The crate trains ε-greedy Q-learning agents against an external game
//! environment reached through the [`ports::GameEnvironment`] seam. Raw
//! board grids are condensed into coarse [`state::StateKey`]s, per-frame
//! rewards are shaped from consecutive environment snapshots, and a
//! multi-variant experiment runner trains hyperparameter variants in
//! parallel against a uniform-random baseline. Trained tables persist as
//! MessagePack artifacts; metrics export to CSV and JSON.
//!
//! Layout follows hexagonal architecture: `ports` holds the trait seams,
//! `adapters` the concrete implementations, `pipeline` the training and
//! experiment orchestration, and `app` the wiring used by the CLI.

pub mod adapters;
pub mod app;
pub mod board;
pub mod cli;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod reward;
pub mod state;
pub mod utils;

pub use board::{BOARD_COLS, BOARD_ROWS, Board, Piece};
pub use error::{Error, Result};
pub use q_learning::{Hyperparameters, QLearningAgent, QTable, SavedAgent};
pub use reward::{FrameSnapshot, RewardWeights};
pub use state::{StateKey, encode, state_from_env};
