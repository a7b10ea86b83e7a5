//! Command-line interface.
//!
//! Training itself is a library concern driven by whoever owns the emulator
//! binding; the CLI covers the offline halves: inspecting saved model
//! artifacts and exporting experiment reports to CSV.

pub mod commands;
pub mod output;
