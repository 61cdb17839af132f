//! Error types for prep-core.

use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while parsing a question-set file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("empty file")]
    EmptyFile,

    #[error("missing {field} header")]
    MissingHeader { field: &'static str },

    #[error("unknown block type: {value}")]
    UnknownBlock { value: String },

    #[error("invalid question number at line {line}: {value}")]
    InvalidNumber { line: usize, value: String },

    #[error("duplicate question number {number} at line {line}")]
    DuplicateNumber { number: u32, line: usize },

    #[error("{marker} before any question number at line {line}")]
    OrphanField { marker: &'static str, line: usize },

    #[error("unknown question kind at line {line}: {value}")]
    UnknownKind { line: usize, value: String },

    #[error("missing kind for question {number}")]
    MissingKind { number: u32 },

    #[error("missing prompt for question {number}")]
    MissingPrompt { number: u32 },

    #[error("missing answer for graded question {number}")]
    MissingAnswer { number: u32 },
}
