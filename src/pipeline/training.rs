//! Q-learning training pipeline.

use std::path::Path;

use crate::{
    Result,
    ports::{environment::GameEnvironment, observer::Observer, repository::ModelRepository},
    q_learning::{Hyperparameters, QLearningAgent, SavedAgent},
    reward::RewardWeights,
};

/// Configuration for a training run.
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    /// Number of episodes to train for.
    pub episodes: usize,
    /// Frame cap per episode. Hitting it truncates without extra penalty.
    pub max_frames: u32,
    /// Reward shaping weights.
    pub rewards: RewardWeights,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 15_000,
            max_frames: 10_000,
            rewards: RewardWeights::default(),
        }
    }
}

/// Runs episodes against an environment and feeds the results to observers.
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Attach an observer. Observers are notified in attachment order.
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train the agent for the configured number of episodes.
    ///
    /// Returns the per-episode shaped returns in episode order.
    pub fn run<E: GameEnvironment + ?Sized>(
        &mut self,
        agent: &mut QLearningAgent,
        env: &mut E,
    ) -> Result<Vec<f64>> {
        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        let mut returns = Vec::with_capacity(self.config.episodes);
        for episode in 0..self.config.episodes {
            let episode_return =
                agent.play_episode(env, self.config.max_frames, &self.config.rewards)?;
            returns.push(episode_return);
            for observer in &mut self.observers {
                observer.on_episode_end(episode, episode_return, agent.epsilon())?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(returns)
    }

    /// Train a named variant from scratch and persist the resulting model.
    ///
    /// The artifact lands at `<model_dir>/<name>_model.msgpack`. Returns the
    /// per-episode returns for downstream export.
    pub fn train_variant<E: GameEnvironment + ?Sized>(
        &mut self,
        name: &str,
        hyperparameters: Hyperparameters,
        seed: u64,
        env: &mut E,
        repository: &dyn ModelRepository,
        model_dir: &Path,
    ) -> Result<Vec<f64>> {
        let mut agent = QLearningAgent::with_seed(hyperparameters, env.action_count(), seed);
        let returns = self.run(&mut agent, env)?;

        let saved = SavedAgent::from_agent(&agent, name);
        let path = model_dir.join(format!("{name}_model.msgpack"));
        repository.save(&saved, &path)?;

        Ok(returns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        board::Board,
        ports::environment::StepOutcome,
        reward::FrameSnapshot,
    };

    /// Two-action environment: action 0 ends the episode with a line clear,
    /// anything else continues with a quiet frame.
    struct ScriptedEnv {
        frame: u64,
    }

    impl GameEnvironment for ScriptedEnv {
        fn reset(&mut self, _seed: u64) -> Result<FrameSnapshot> {
            self.frame = 0;
            Ok(FrameSnapshot {
                frame: 0,
                lines_cleared: 0,
                board_height: 0,
                holes: 0,
                current_piece: None,
                next_piece: None,
            })
        }

        fn step(&mut self, action: usize) -> Result<StepOutcome> {
            self.frame += 1;
            let terminal = action == 0;
            Ok(StepOutcome {
                terminal,
                info: FrameSnapshot {
                    frame: self.frame,
                    lines_cleared: if terminal { 1 } else { 0 },
                    board_height: 0,
                    holes: 0,
                    current_piece: None,
                    next_piece: None,
                },
            })
        }

        fn board(&self) -> Result<Board> {
            Ok(Board::empty())
        }

        fn action_count(&self) -> usize {
            2
        }
    }

    #[test]
    fn run_returns_one_entry_per_episode() {
        let config = TrainingConfig {
            episodes: 12,
            max_frames: 50,
            rewards: RewardWeights::default(),
        };
        let mut pipeline = TrainingPipeline::new(config);
        let mut agent = QLearningAgent::with_seed(Hyperparameters::default(), 2, 3);
        let mut env = ScriptedEnv { frame: 0 };

        let returns = pipeline.run(&mut agent, &mut env).unwrap();
        assert_eq!(returns.len(), 12);
    }

    #[test]
    fn observers_see_every_episode() {
        let config = TrainingConfig {
            episodes: 5,
            max_frames: 20,
            rewards: RewardWeights::default(),
        };
        use std::sync::{Arc, Mutex};

        #[derive(Default)]
        struct SharedCounts {
            started: usize,
            episodes: usize,
            ended: usize,
        }

        struct SharingObserver(Arc<Mutex<SharedCounts>>);

        impl Observer for SharingObserver {
            fn on_training_start(&mut self, _n: usize) -> Result<()> {
                self.0.lock().unwrap().started += 1;
                Ok(())
            }
            fn on_episode_end(&mut self, _e: usize, _r: f64, _eps: f64) -> Result<()> {
                self.0.lock().unwrap().episodes += 1;
                Ok(())
            }
            fn on_training_end(&mut self) -> Result<()> {
                self.0.lock().unwrap().ended += 1;
                Ok(())
            }
        }

        let counts = Arc::new(Mutex::new(SharedCounts::default()));
        let mut pipeline = TrainingPipeline::new(config)
            .with_observer(Box::new(SharingObserver(Arc::clone(&counts))));
        let mut agent = QLearningAgent::with_seed(Hyperparameters::default(), 2, 9);
        let mut env = ScriptedEnv { frame: 0 };
        pipeline.run(&mut agent, &mut env).unwrap();

        let counts = counts.lock().unwrap();
        assert_eq!(counts.started, 1);
        assert_eq!(counts.episodes, 5);
        assert_eq!(counts.ended, 1);
    }

    #[test]
    fn train_variant_persists_the_model() {
        use crate::adapters::InMemoryRepository;

        let config = TrainingConfig {
            episodes: 3,
            max_frames: 10,
            rewards: RewardWeights::default(),
        };
        let mut pipeline = TrainingPipeline::new(config);
        let repository = InMemoryRepository::new();
        let mut env = ScriptedEnv { frame: 0 };

        let returns = pipeline
            .train_variant(
                "unit",
                Hyperparameters::default(),
                0,
                &mut env,
                &repository,
                Path::new("models"),
            )
            .unwrap();

        assert_eq!(returns.len(), 3);
        assert!(repository.contains(Path::new("models/unit_model.msgpack")));
    }
}
