//! Ports (trait boundaries) for external dependencies.
//!
//! This module defines the interfaces between the learning core and
//! infrastructure. Following hexagonal architecture, these traits are owned
//! by the domain and implemented by adapters: the game environment by
//! whatever emulator binding the caller supplies, persistence and training
//! observation by the adapters in this crate.

pub mod environment;
pub mod observer;
pub mod repository;

pub use environment::{GameEnvironment, StepOutcome};
pub use observer::Observer;
pub use repository::ModelRepository;
