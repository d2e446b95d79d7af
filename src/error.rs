use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExplorerError>;

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Source file not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Expected column '{column}' is missing from the source")]
    MissingColumn { column: String },

    #[error("Row {row}: cannot parse '{value}' as a crash timestamp")]
    Timestamp { row: usize, value: String },

    #[error("Row {row}: invalid coordinate format: '{value}'")]
    InvalidCoordinate { row: usize, value: String },

    #[error("Row {row}: invalid count in column '{column}': '{value}'")]
    InvalidCount {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Row limit must be a positive integer, got {0}")]
    InvalidRowLimit(usize),

    #[error("Hour must be in 0..=23, got {0}")]
    HourOutOfRange(u32),

    #[error("Injured-persons threshold must be in 0..=19, got {0}")]
    ThresholdOutOfRange(u32),

    #[error("Unknown injury category: '{0}'")]
    UnknownCategory(String),

    #[error("No records to analyze")]
    NoRecords,

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
