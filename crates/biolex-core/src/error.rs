use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Malformed annotation on line {line}: {reason}")]
    MalformedAnnotation { line: usize, reason: String },

    #[error("Malformed relation on line {line}: {reason}")]
    MalformedRelation { line: usize, reason: String },

    #[error("Malformed mention #{index}: missing {field}")]
    MalformedMention { index: usize, field: &'static str },

    #[error("Corpus file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
