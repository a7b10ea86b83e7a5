//! State encoding: board features to a discrete Q-table key
//!
//! The encoder compresses a 200-cell board plus piece identity into a small
//! tuple of bucketed features. The compression is deliberately lossy:
//! distinct boards that land on the same key share learned values, and that
//! collision is the table's entire generalization mechanism.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    board::{self, BOARD_COLS, BOARD_ROWS, Board, Piece},
    ports::GameEnvironment,
    reward::FrameSnapshot,
};

/// Breakpoints for the aggregate-height feature (0..=200 on a 20x10 board).
pub const AGG_HEIGHT_BREAKS: [u32; 3] = [40, 80, 120];
/// Breakpoints for the covered-hole count.
pub const HOLE_BREAKS: [u32; 3] = [5, 15, 30];
/// Breakpoints for surface bumpiness.
pub const BUMPINESS_BREAKS: [u32; 3] = [10, 25, 45];
/// Breakpoints for the maximum well depth.
pub const WELL_DEPTH_BREAKS: [u32; 3] = [3, 6, 10];

/// Right-open bucket assignment: the index of the first breakpoint strictly
/// greater than `value`, or `breakpoints.len()` when none is.
pub fn bucket(value: u32, breakpoints: &[u32]) -> u8 {
    breakpoints
        .iter()
        .position(|&breakpoint| value < breakpoint)
        .unwrap_or(breakpoints.len()) as u8
}

/// Coarse per-column height bin: height / 4, clamped into 0..=4.
fn coarse_height_bin(height: u8) -> u8 {
    (height / 4).min(4)
}

/// Discrete state tuple used as the Q-table key.
///
/// Identical boards under the same piece always produce the same key. The
/// four aggregate features are bucketed into 0..=3; each per-column height
/// lands in 0..=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateKey {
    /// Piece index in 0..=6.
    pub piece: u8,
    /// Bucketed aggregate height.
    pub aggregate_height: u8,
    /// Bucketed hole count.
    pub holes: u8,
    /// Bucketed bumpiness.
    pub bumpiness: u8,
    /// Bucketed maximum well depth.
    pub well_depth: u8,
    /// Coarse per-column height bins.
    pub heights: [u8; BOARD_COLS],
}

/// Encode a board snapshot and piece identity into a state key.
///
/// `heights` must be the column heights of `board`; the caller computes
/// them once per frame and shares them with the reward bookkeeping. Pure
/// and deterministic: identical inputs always yield an identical key.
pub fn encode(board: &Board, piece: Piece, heights: &[u8; BOARD_COLS]) -> StateKey {
    let mut height_bins = [0u8; BOARD_COLS];
    for (bin, &height) in height_bins.iter_mut().zip(heights.iter()) {
        *bin = coarse_height_bin(height);
    }
    StateKey {
        piece: piece.index(),
        aggregate_height: bucket(board::aggregate_height(heights), &AGG_HEIGHT_BREAKS),
        holes: bucket(board.holes(), &HOLE_BREAKS),
        bumpiness: bucket(board::bumpiness(heights), &BUMPINESS_BREAKS),
        well_depth: bucket(board::max_well_depth(heights), &WELL_DEPTH_BREAKS),
        heights: height_bins,
    }
}

/// Build the current state key from a live environment.
///
/// Piece identity falls back from the current piece to the next piece to
/// [`Piece::FALLBACK`] when the environment reports neither; that is
/// accepted information loss, not a failure. Board extraction failing is
/// fatal and propagates.
pub fn state_from_env<E: GameEnvironment + ?Sized>(
    env: &E,
    info: &FrameSnapshot,
) -> Result<StateKey> {
    let board = env.board()?;
    let piece = info
        .current_piece
        .or(info.next_piece)
        .unwrap_or(Piece::FALLBACK);
    let heights = board.column_heights();
    Ok(encode(&board, piece, &heights))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_is_right_open() {
        let breaks = [40, 80, 120];
        assert_eq!(bucket(0, &breaks), 0);
        assert_eq!(bucket(39, &breaks), 0);
        assert_eq!(bucket(40, &breaks), 1);
        assert_eq!(bucket(79, &breaks), 1);
        assert_eq!(bucket(80, &breaks), 2);
        assert_eq!(bucket(119, &breaks), 2);
        assert_eq!(bucket(120, &breaks), 3);
        assert_eq!(bucket(u32::MAX, &breaks), 3);
    }

    #[test]
    fn coarse_height_bins_clamp_at_four() {
        assert_eq!(coarse_height_bin(0), 0);
        assert_eq!(coarse_height_bin(3), 0);
        assert_eq!(coarse_height_bin(4), 1);
        assert_eq!(coarse_height_bin(19), 4);
        // A full column would divide to 5; the key range stays 0..=4.
        assert_eq!(coarse_height_bin(BOARD_ROWS as u8), 4);
    }

    #[test]
    fn encode_is_deterministic() {
        let mut board = Board::empty();
        for col in 0..4 {
            board.set(BOARD_ROWS - 1, col, true);
        }
        let heights = board.column_heights();
        let first = encode(&board, Piece::S, &heights);
        let second = encode(&board, Piece::S, &heights);
        assert_eq!(first, second);
    }

    #[test]
    fn piece_identity_distinguishes_keys() {
        let board = Board::empty();
        let heights = board.column_heights();
        let with_i = encode(&board, Piece::I, &heights);
        let with_z = encode(&board, Piece::Z, &heights);
        assert_ne!(with_i, with_z);
        assert_eq!(with_i.heights, with_z.heights);
    }

    #[test]
    fn empty_board_encodes_to_low_buckets() {
        let board = Board::empty();
        let heights = board.column_heights();
        let key = encode(&board, Piece::O, &heights);
        assert_eq!(key.aggregate_height, 0);
        assert_eq!(key.holes, 0);
        assert_eq!(key.bumpiness, 0);
        // The empty surface is one deep well against both walls.
        assert_eq!(key.well_depth, 3);
        assert_eq!(key.heights, [0; BOARD_COLS]);
    }
}
