//! Board representation and analytics for the falling-block playfield
//!
//! The environment exposes a 20x10 occupancy grid each frame. This module
//! holds the `Board` snapshot plus the pure feature functions derived from
//! it: column heights, aggregate height, hole count, bumpiness, and maximum
//! well depth. All of them are recomputed per frame; nothing here caches
//! across frames because the playfield mutates on every step.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of playfield rows (row 0 is the top).
pub const BOARD_ROWS: usize = 20;
/// Number of playfield columns.
pub const BOARD_COLS: usize = 10;

/// The seven tetromino shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Piece {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl Piece {
    /// Number of distinct piece shapes.
    pub const COUNT: usize = 7;

    /// Substitute used when the environment reports no piece at all.
    pub const FALLBACK: Piece = Piece::I;

    /// Stable index in 0..7, used inside the state key.
    pub fn index(self) -> u8 {
        match self {
            Piece::I => 0,
            Piece::J => 1,
            Piece::L => 2,
            Piece::O => 3,
            Piece::S => 4,
            Piece::T => 5,
            Piece::Z => 6,
        }
    }

    /// Parse an environment piece label.
    ///
    /// The emulator reports orientation-qualified labels such as `"Td"` or
    /// `"Jl"`; only the leading shape character matters here.
    pub fn parse(label: &str) -> Result<Piece> {
        match label.chars().next() {
            Some('I') => Ok(Piece::I),
            Some('J') => Ok(Piece::J),
            Some('L') => Ok(Piece::L),
            Some('O') => Ok(Piece::O),
            Some('S') => Ok(Piece::S),
            Some('T') => Ok(Piece::T),
            Some('Z') => Ok(Piece::Z),
            _ => Err(Error::UnknownPiece {
                label: label.to_string(),
            }),
        }
    }
}

/// Immutable snapshot of the playfield occupancy grid.
///
/// Row 0 is the top of the well; `cells[row][col]` is true when that cell is
/// filled. The grid shape is fixed; callers converting from raw environment
/// memory must guarantee 20x10.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[bool; BOARD_COLS]; BOARD_ROWS],
}

impl Board {
    /// An entirely empty playfield.
    pub fn empty() -> Self {
        Self {
            cells: [[false; BOARD_COLS]; BOARD_ROWS],
        }
    }

    /// Build a board from a row-major occupancy grid (row 0 = top).
    pub fn from_rows(cells: [[bool; BOARD_COLS]; BOARD_ROWS]) -> Self {
        Self { cells }
    }

    /// Parse a board from text rows, `.` for empty and `#` for filled.
    ///
    /// Expects exactly 20 non-empty lines of 10 characters. Intended for
    /// tests and fixtures rather than the hot path.
    pub fn parse(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
        if lines.len() != BOARD_ROWS {
            return Err(Error::InvalidBoardRows {
                expected: BOARD_ROWS,
                got: lines.len(),
            });
        }

        let mut cells = [[false; BOARD_COLS]; BOARD_ROWS];
        for (row, line) in lines.iter().enumerate() {
            let trimmed = line.trim();
            if trimmed.chars().count() != BOARD_COLS {
                return Err(Error::InvalidBoardColumns {
                    row,
                    expected: BOARD_COLS,
                    got: trimmed.chars().count(),
                });
            }
            for (column, character) in trimmed.chars().enumerate() {
                cells[row][column] = match character {
                    '.' => false,
                    '#' => true,
                    _ => {
                        return Err(Error::InvalidCellCharacter {
                            character,
                            row,
                            column,
                        });
                    }
                };
            }
        }
        Ok(Self { cells })
    }

    /// Whether the cell at (row, col) is occupied.
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.cells[row][col]
    }

    /// Mark a cell occupied. Used by environment adapters and tests.
    pub fn set(&mut self, row: usize, col: usize, occupied: bool) {
        self.cells[row][col] = occupied;
    }

    /// Height of every column: rows from the bottom up to and including the
    /// topmost occupied cell, 0 for an empty column.
    pub fn column_heights(&self) -> [u8; BOARD_COLS] {
        let mut heights = [0u8; BOARD_COLS];
        for (col, height) in heights.iter_mut().enumerate() {
            for row in 0..BOARD_ROWS {
                if self.cells[row][col] {
                    *height = (BOARD_ROWS - row) as u8;
                    break;
                }
            }
        }
        heights
    }

    /// Count of covered empty cells: for each column, every empty cell lying
    /// strictly below that column's topmost filled cell.
    pub fn holes(&self) -> u32 {
        let mut holes = 0u32;
        for col in 0..BOARD_COLS {
            let mut covered = false;
            for row in 0..BOARD_ROWS {
                if self.cells[row][col] {
                    covered = true;
                } else if covered {
                    holes += 1;
                }
            }
        }
        holes
    }
}

/// Sum of all column heights.
pub fn aggregate_height(heights: &[u8; BOARD_COLS]) -> u32 {
    heights.iter().map(|&h| u32::from(h)).sum()
}

/// Sum of absolute differences between adjacent column heights.
pub fn bumpiness(heights: &[u8; BOARD_COLS]) -> u32 {
    heights
        .windows(2)
        .map(|pair| u32::from(pair[0].abs_diff(pair[1])))
        .sum()
}

/// Deepest well on the surface.
///
/// A column's well depth is the taller of its two neighbors minus its own
/// height, saturating at zero. Boundary columns treat the missing neighbor
/// as a wall of full grid height.
pub fn max_well_depth(heights: &[u8; BOARD_COLS]) -> u32 {
    let wall = BOARD_ROWS as u8;
    let mut deepest = 0u8;
    for col in 0..BOARD_COLS {
        let left = if col == 0 { wall } else { heights[col - 1] };
        let right = if col + 1 == BOARD_COLS {
            wall
        } else {
            heights[col + 1]
        };
        let depth = left.max(right).saturating_sub(heights[col]);
        deepest = deepest.max(depth);
    }
    u32::from(deepest)
}
