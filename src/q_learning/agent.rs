//! Epsilon-greedy tabular Q-learning agent

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::GameEnvironment,
    q_learning::q_table::QTable,
    reward::RewardWeights,
    state::{StateKey, state_from_env},
};

/// Immutable hyperparameter bundle for one training variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hyperparameters {
    /// Learning rate α.
    pub alpha: f64,
    /// Discount factor γ.
    pub gamma: f64,
    /// Initial exploration rate.
    pub eps_start: f64,
    /// Exploration floor.
    pub eps_min: f64,
    /// Multiplicative ε decay applied once per episode.
    pub eps_decay: f64,
    /// Total frames that must elapse before decay begins.
    pub decay_after: u64,
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Self {
            alpha: 0.10,
            gamma: 0.99,
            eps_start: 1.0,
            eps_min: 0.05,
            eps_decay: 0.995,
            decay_after: 10_000,
        }
    }
}

impl Hyperparameters {
    /// Set the learning rate.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the discount factor.
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Set the ε schedule: start, floor, and per-episode decay factor.
    pub fn with_epsilon_schedule(mut self, start: f64, min: f64, decay: f64) -> Self {
        self.eps_start = start;
        self.eps_min = min;
        self.eps_decay = decay;
        self
    }

    /// Set the frame threshold after which ε decay begins.
    pub fn with_decay_after(mut self, frames: u64) -> Self {
        self.decay_after = frames;
        self
    }
}

/// Tabular Q-learning agent (off-policy TD(0) control).
///
/// Owns its table exclusively; parallel variants each construct their own
/// agent, so there is never a shared row to race on. The agent is mutated
/// every frame while training and discarded after its table is persisted.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    table: QTable,
    hp: Hyperparameters,
    epsilon: f64,
    frames_seen: u64,
    rng: StdRng,
}

impl QLearningAgent {
    /// Create a new agent for the given action-set size.
    pub fn new(hp: Hyperparameters, actions: usize, rng: StdRng) -> Self {
        Self {
            table: QTable::new(actions),
            hp,
            epsilon: hp.eps_start,
            frames_seen: 0,
            rng,
        }
    }

    /// Convenience constructor seeding the internal RNG directly.
    pub fn with_seed(hp: Hyperparameters, actions: usize, seed: u64) -> Self {
        Self::new(hp, actions, StdRng::seed_from_u64(seed))
    }

    /// ε-greedy action selection. Reads ε, never mutates it.
    pub fn select_action(&mut self, state: &StateKey) -> usize {
        if self.rng.random::<f64>() < self.epsilon {
            self.rng.random_range(0..self.table.actions())
        } else {
            self.table.greedy_action(state)
        }
    }

    /// One-step tabular TD update.
    ///
    /// Terminal transitions bootstrap from nothing: the target is the bare
    /// reward. Rows for both `state` and `next_state` materialize lazily.
    pub fn update(
        &mut self,
        state: &StateKey,
        action: usize,
        reward: f64,
        next_state: Option<&StateKey>,
        terminal: bool,
    ) {
        let best_next = match next_state {
            Some(next) if !terminal => {
                let row = self.table.row_mut(*next);
                row.iter().copied().fold(f64::NEG_INFINITY, f64::max)
            }
            _ => 0.0,
        };
        let td_target = reward + self.hp.gamma * best_next;
        let row = self.table.row_mut(*state);
        row[action] += self.hp.alpha * (td_target - row[action]);
    }

    /// Run one training episode and return its accumulated shaped reward.
    ///
    /// The environment is reset with a reproducible seed drawn from the
    /// agent's own RNG stream. The loop runs to a terminal signal or the
    /// frame cap, whichever comes first; hitting the cap carries no extra
    /// penalty. ε decays at most once, after the final frame, and only once
    /// the global frame counter has passed `decay_after`.
    pub fn play_episode<E: GameEnvironment + ?Sized>(
        &mut self,
        env: &mut E,
        max_frames: u32,
        rewards: &RewardWeights,
    ) -> Result<f64> {
        let seed = self.rng.random_range(0..1_000_000_000u64);
        let info = env.reset(seed)?;
        let mut state = state_from_env(env, &info)?;
        let mut prev_info = info;
        let mut episode_return = 0.0;

        for _ in 0..max_frames {
            let action = self.select_action(&state);
            let outcome = env.step(action)?;
            self.frames_seen += 1;

            let reward = rewards.shaped_reward(&prev_info, &outcome.info, outcome.terminal);
            episode_return += reward;

            if outcome.terminal {
                self.update(&state, action, reward, None, true);
                break;
            }

            let next_state = state_from_env(env, &outcome.info)?;
            self.update(&state, action, reward, Some(&next_state), false);
            state = next_state;
            prev_info = outcome.info;
        }

        if self.frames_seen > self.hp.decay_after {
            self.decay_epsilon();
        }

        Ok(episode_return)
    }

    /// Run one greedy episode without learning and return its shaped return.
    ///
    /// Used for evaluation playback of a reloaded table. Tracks the previous
    /// and current snapshots properly, so line clears count toward the
    /// reported return.
    pub fn evaluate_episode<E: GameEnvironment + ?Sized>(
        &mut self,
        env: &mut E,
        max_frames: u32,
        rewards: &RewardWeights,
    ) -> Result<f64> {
        let seed = self.rng.random_range(0..1_000_000_000u64);
        let info = env.reset(seed)?;
        let mut state = state_from_env(env, &info)?;
        let mut prev_info = info;
        let mut episode_return = 0.0;

        for _ in 0..max_frames {
            let action = self.table.greedy_action(&state);
            let outcome = env.step(action)?;
            episode_return += rewards.shaped_reward(&prev_info, &outcome.info, outcome.terminal);
            if outcome.terminal {
                break;
            }
            state = state_from_env(env, &outcome.info)?;
            prev_info = outcome.info;
        }

        Ok(episode_return)
    }

    /// Decay ε once, clamped at the configured floor.
    fn decay_epsilon(&mut self) {
        self.epsilon = (self.epsilon * self.hp.eps_decay).max(self.hp.eps_min);
    }

    /// Current exploration rate.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Total frames stepped across all episodes.
    pub fn frames_seen(&self) -> u64 {
        self.frames_seen
    }

    /// Hyperparameter bundle this agent was built with.
    pub fn hyperparameters(&self) -> &Hyperparameters {
        &self.hp
    }

    /// Read access to the learned table.
    pub fn table(&self) -> &QTable {
        &self.table
    }

    pub(crate) fn export_table(&self) -> QTable {
        self.table.clone()
    }

    pub(crate) fn from_parts(table: QTable, hp: Hyperparameters, epsilon: f64, rng: StdRng) -> Self {
        Self {
            table,
            hp,
            epsilon,
            frames_seen: 0,
            rng,
        }
    }
}
