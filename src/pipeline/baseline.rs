//! Uniform-random baseline runs.
//!
//! The baseline plays the same episode protocol as the learner through the
//! same reward shaper, so its mean return is directly comparable to any
//! variant's learning curve.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    Result,
    ports::{environment::GameEnvironment, observer::Observer},
    reward::RewardWeights,
};

/// Configuration for a baseline run.
#[derive(Debug, Clone)]
pub struct BaselineConfig {
    pub episodes: usize,
    pub max_frames: u32,
    pub rewards: RewardWeights,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            episodes: 250,
            max_frames: 10_000,
            rewards: RewardWeights::default(),
        }
    }
}

/// Plays uniformly random actions and records shaped returns.
pub struct BaselinePipeline {
    config: BaselineConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl BaselinePipeline {
    pub fn new(config: BaselineConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run the configured number of random episodes and return their
    /// shaped returns in episode order.
    pub fn run<E: GameEnvironment + ?Sized>(&mut self, env: &mut E, seed: u64) -> Result<Vec<f64>> {
        let mut rng = StdRng::seed_from_u64(seed);
        let actions = env.action_count();

        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        let mut returns = Vec::with_capacity(self.config.episodes);
        for episode in 0..self.config.episodes {
            let episode_seed = rng.random_range(0..1_000_000_000u64);
            let mut prev_info = env.reset(episode_seed)?;
            let mut episode_return = 0.0;

            for _ in 0..self.config.max_frames {
                let action = rng.random_range(0..actions);
                let outcome = env.step(action)?;
                episode_return +=
                    self.config
                        .rewards
                        .shaped_reward(&prev_info, &outcome.info, outcome.terminal);
                if outcome.terminal {
                    break;
                }
                prev_info = outcome.info;
            }

            returns.push(episode_return);
            for observer in &mut self.observers {
                observer.on_episode_end(episode, episode_return, 1.0)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(returns)
    }
}
