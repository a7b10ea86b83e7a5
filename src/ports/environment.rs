//! Game environment port - the narrow seam to the external emulator
//!
//! The emulator and game rules live outside this crate. The core only needs
//! four capabilities per frame: reseed-and-reset, step, a queryable raw
//! board grid, and the size of the discrete action set. Everything else the
//! concrete environment produces (pixel observations, its native reward)
//! is dropped at this boundary because the core never reads either: state
//! comes from the board grid and reward comes from the shaper.

use crate::{Result, board::Board, reward::FrameSnapshot};

/// Result of advancing the environment by one step.
#[derive(Debug, Clone, Copy)]
pub struct StepOutcome {
    /// Whether the episode ended on this step.
    pub terminal: bool,
    /// Environment info after the step.
    pub info: FrameSnapshot,
}

/// Port for the external falling-block game environment.
///
/// Implementations are exclusive to one training run: the emulator binding
/// is not safe for concurrent use, so every worker owns its own instance
/// and the trait makes no thread-safety promises.
pub trait GameEnvironment {
    /// Reseed the environment and start a fresh episode.
    ///
    /// Returns the first info snapshot, carrying `frame == 0`.
    fn reset(&mut self, seed: u64) -> Result<FrameSnapshot>;

    /// Advance one frame with the given action index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAction`](crate::Error::InvalidAction) when the
    /// action index is outside the environment's action set.
    fn step(&mut self, action: usize) -> Result<StepOutcome>;

    /// Current raw occupancy grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BoardUnavailable`](crate::Error::BoardUnavailable)
    /// when the concrete environment exposes no way to obtain the grid.
    /// That is fatal for the run: the core cannot build states without it.
    fn board(&self) -> Result<Board>;

    /// Size of the fixed discrete action set, stable for the whole run.
    fn action_count(&self) -> usize;
}
