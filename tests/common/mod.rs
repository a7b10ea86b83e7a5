//! Scripted environments shared by the integration tests.
#![allow(dead_code)]

use blockfall::{
    Board, FrameSnapshot, Result,
    ports::{GameEnvironment, StepOutcome},
};

pub fn snapshot(frame: u64, lines: u32, height: u32, holes: u32) -> FrameSnapshot {
    FrameSnapshot {
        frame,
        lines_cleared: lines,
        board_height: height,
        holes,
        current_piece: None,
        next_piece: None,
    }
}

/// Two actions, one state. Action 0 clears a line every frame; action 1 is a
/// quiet frame. Episodes only end at the frame cap, so the optimal policy is
/// to press action 0 forever.
pub struct LineClearEnv {
    frame: u64,
    lines: u32,
}

impl LineClearEnv {
    pub fn new() -> Self {
        Self { frame: 0, lines: 0 }
    }
}

impl GameEnvironment for LineClearEnv {
    fn reset(&mut self, _seed: u64) -> Result<FrameSnapshot> {
        self.frame = 0;
        self.lines = 0;
        Ok(snapshot(0, 0, 0, 0))
    }

    fn step(&mut self, action: usize) -> Result<StepOutcome> {
        self.frame += 1;
        if action == 0 {
            self.lines += 1;
        }
        Ok(StepOutcome {
            terminal: false,
            info: snapshot(self.frame, self.lines, 0, 0),
        })
    }

    fn board(&self) -> Result<Board> {
        Ok(Board::empty())
    }

    fn action_count(&self) -> usize {
        2
    }
}

/// One-step episodes with two terminal actions: action 0 clears a line on
/// its way out, action 1 ends the episode with nothing to show for it.
pub struct TerminalChoiceEnv;

impl GameEnvironment for TerminalChoiceEnv {
    fn reset(&mut self, _seed: u64) -> Result<FrameSnapshot> {
        Ok(snapshot(0, 0, 0, 0))
    }

    fn step(&mut self, action: usize) -> Result<StepOutcome> {
        let lines = if action == 0 { 1 } else { 0 };
        Ok(StepOutcome {
            terminal: true,
            info: snapshot(1, lines, 0, 0),
        })
    }

    fn board(&self) -> Result<Board> {
        Ok(Board::empty())
    }

    fn action_count(&self) -> usize {
        2
    }
}

/// Ends every episode after a fixed number of frames, never via top-out.
pub struct FixedLengthEnv {
    length: u64,
    frame: u64,
}

impl FixedLengthEnv {
    pub fn new(length: u64) -> Self {
        Self { length, frame: 0 }
    }
}

impl GameEnvironment for FixedLengthEnv {
    fn reset(&mut self, _seed: u64) -> Result<FrameSnapshot> {
        self.frame = 0;
        Ok(snapshot(0, 0, 0, 0))
    }

    fn step(&mut self, _action: usize) -> Result<StepOutcome> {
        self.frame += 1;
        Ok(StepOutcome {
            terminal: self.frame == self.length,
            info: snapshot(self.frame, 0, 0, 0),
        })
    }

    fn board(&self) -> Result<Board> {
        Ok(Board::empty())
    }

    fn action_count(&self) -> usize {
        3
    }
}

/// Three actions with distinct outcomes. Action 0 keeps the stack flat,
/// action 1 grows it, action 2 tops out immediately. A trained policy that
/// beats random has to learn to avoid action 2.
pub struct ToppingEnv {
    frame: u64,
    height: u32,
}

impl ToppingEnv {
    pub fn new() -> Self {
        Self {
            frame: 0,
            height: 0,
        }
    }
}

impl GameEnvironment for ToppingEnv {
    fn reset(&mut self, _seed: u64) -> Result<FrameSnapshot> {
        self.frame = 0;
        self.height = 0;
        Ok(snapshot(0, 0, 0, 0))
    }

    fn step(&mut self, action: usize) -> Result<StepOutcome> {
        self.frame += 1;
        let terminal = match action {
            0 => false,
            1 => {
                self.height += 4;
                self.height >= 40
            }
            _ => true,
        };
        Ok(StepOutcome {
            terminal,
            info: snapshot(self.frame, 0, self.height, 0),
        })
    }

    fn board(&self) -> Result<Board> {
        let mut board = Board::empty();
        let filled_rows = (self.height / 10).min(20) as usize;
        for row in 0..filled_rows {
            for col in 0..10 {
                board.set(19 - row, col, true);
            }
        }
        Ok(board)
    }

    fn action_count(&self) -> usize {
        3
    }
}
