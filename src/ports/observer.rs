//! Observer port - abstraction for training observation
//!
//! Observers compose: a pipeline can carry a progress bar, a metrics
//! collector, and a periodic logger at the same time without the training
//! loop knowing about any of them.
//!
//! Call order: `on_training_start(total_episodes)` once, then
//! `on_episode_end(episode, episode_return, epsilon)` per episode, then
//! `on_training_end()` once.

use crate::Result;

/// Observer trait for monitoring a training or baseline run.
///
/// All methods default to no-ops so implementations only override what they
/// need.
pub trait Observer: Send {
    /// Called once before the first episode.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each episode with its accumulated shaped return and the
    /// agent's exploration rate after any decay (baselines report ε = 1).
    fn on_episode_end(&mut self, _episode: usize, _episode_return: f64, _epsilon: f64) -> Result<()> {
        Ok(())
    }

    /// Called once after the final episode.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
