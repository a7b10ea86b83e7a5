//! Error types for the blockfall crate

use thiserror::Error;

/// Main error type for the blockfall crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("cannot extract a board grid from the environment: {context}")]
    BoardUnavailable { context: String },

    #[error("action {action} is out of range (action space has {actions} entries)")]
    InvalidAction { action: usize, actions: usize },

    #[error("board text has {got} rows, expected {expected}")]
    InvalidBoardRows { expected: usize, got: usize },

    #[error("board row {row} has {got} cells, expected {expected}")]
    InvalidBoardColumns {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("invalid cell character '{character}' at row {row}, column {column}")]
    InvalidCellCharacter {
        character: char,
        row: usize,
        column: usize,
    },

    #[error("unknown piece label '{label}' (expected one of I, J, L, O, S, T, Z)")]
    UnknownPiece { label: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("unsupported model format version {found} (expected {expected})")]
    UnsupportedModelVersion { found: u32, expected: u32 },

    #[error("no model stored at '{key}'")]
    ModelNotFound { key: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to {operation}: {message}")]
    Encode { operation: String, message: String },

    #[error("failed to {operation}: {message}")]
    Decode { operation: String, message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("worker for variant '{variant}' panicked")]
    WorkerPanicked { variant: String },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
