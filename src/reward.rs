//! Reward shaping for the per-frame training signal
//!
//! The raw game only scores on line clears and is heavily terminal-biased.
//! Shaping turns that sparse signal into a dense per-frame one: line clears
//! stay the dominant incentive (with an extra bonus for clearing four at
//! once), structural damage such as holes and stack height is penalized
//! every frame, and a small living cost pressures the agent toward faster
//! play.

use serde::{Deserialize, Serialize};

use crate::board::Piece;

/// Per-frame information record emitted by the environment.
///
/// `frame` is a monotonically increasing index within the episode; the
/// shaper uses it to assert that its two snapshots are actually consecutive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    /// Frame index within the current episode, starting at 0 on reset.
    pub frame: u64,
    /// Cumulative lines cleared since the episode started.
    pub lines_cleared: u32,
    /// Aggregate board height as reported by the environment.
    pub board_height: u32,
    /// Covered-hole count as reported by the environment.
    pub holes: u32,
    /// Piece currently falling, when the environment reports one.
    pub current_piece: Option<Piece>,
    /// Piece queued next, when the environment reports one.
    pub next_piece: Option<Piece>,
}

/// Weights for the shaped reward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardWeights {
    /// Reward per line cleared this frame.
    pub line_reward: f64,
    /// Extra bonus when four lines clear simultaneously.
    pub tetris_bonus: f64,
    /// Penalty per covered hole, applied every frame.
    pub hole_weight: f64,
    /// Penalty per unit of aggregate height, applied every frame.
    pub height_weight: f64,
    /// Flat cost charged every frame.
    pub living_penalty: f64,
    /// One-off penalty when the episode ends in a top-out.
    pub terminal_penalty: f64,
}

impl Default for RewardWeights {
    fn default() -> Self {
        Self {
            line_reward: 1.0,
            tetris_bonus: 10.0,
            hole_weight: 0.1,
            height_weight: 0.01,
            living_penalty: 0.01,
            terminal_penalty: 5.0,
        }
    }
}

impl RewardWeights {
    /// Shaped reward for one frame transition.
    ///
    /// `prev` and `curr` must be consecutive snapshots of the same episode,
    /// with `prev` strictly earlier in frame order. Feeding the same
    /// snapshot on both sides silently zeroes the line-clear term, so the
    /// ordering is asserted in debug builds; it cannot be detected at
    /// runtime without frame bookkeeping the shaper does not own.
    pub fn shaped_reward(&self, prev: &FrameSnapshot, curr: &FrameSnapshot, terminal: bool) -> f64 {
        debug_assert!(
            prev.frame < curr.frame,
            "shaped_reward requires prev strictly before curr in frame order"
        );

        let lines = curr.lines_cleared.saturating_sub(prev.lines_cleared);
        let mut reward = self.line_reward * f64::from(lines);
        if lines == 4 {
            reward += self.tetris_bonus;
        }
        reward -= self.hole_weight * f64::from(curr.holes);
        reward -= self.height_weight * f64::from(curr.board_height);
        reward -= self.living_penalty;
        if terminal {
            reward -= self.terminal_penalty;
        }
        reward
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(frame: u64, lines: u32, height: u32, holes: u32) -> FrameSnapshot {
        FrameSnapshot {
            frame,
            lines_cleared: lines,
            board_height: height,
            holes,
            current_piece: Some(Piece::T),
            next_piece: Some(Piece::I),
        }
    }

    #[test]
    fn quiet_frame_costs_the_living_penalty() {
        let weights = RewardWeights::default();
        let prev = snapshot(0, 0, 10, 2);
        let curr = snapshot(1, 0, 10, 2);
        let reward = weights.shaped_reward(&prev, &curr, false);
        let expected = -0.1 * 2.0 - 0.01 * 10.0 - 0.01;
        assert!((reward - expected).abs() < 1e-12);
    }

    #[test]
    fn tetris_clear_beats_single_clear_by_the_bonus() {
        let weights = RewardWeights::default();
        let prev = snapshot(0, 3, 8, 0);
        let single = snapshot(1, 4, 8, 0);
        let tetris = snapshot(1, 7, 8, 0);
        let r_single = weights.shaped_reward(&prev, &single, false);
        let r_tetris = weights.shaped_reward(&prev, &tetris, false);
        // Three extra lines plus the tetris bonus.
        assert!(r_tetris - r_single >= weights.tetris_bonus);
        assert!((r_tetris - r_single - (3.0 + weights.tetris_bonus)).abs() < 1e-12);
    }

    #[test]
    fn terminal_frame_subtracts_exactly_the_terminal_penalty() {
        let weights = RewardWeights::default();
        let prev = snapshot(5, 2, 40, 6);
        let curr = snapshot(6, 2, 44, 7);
        let alive = weights.shaped_reward(&prev, &curr, false);
        let dead = weights.shaped_reward(&prev, &curr, true);
        assert!((alive - dead - weights.terminal_penalty).abs() < 1e-12);
    }

    #[test]
    fn line_delta_never_goes_negative() {
        let weights = RewardWeights::default();
        // A malformed feed where the counter ran backwards.
        let prev = snapshot(0, 9, 0, 0);
        let curr = snapshot(1, 3, 0, 0);
        let reward = weights.shaped_reward(&prev, &curr, false);
        assert!((reward - (-weights.living_penalty)).abs() < 1e-12);
    }
}
