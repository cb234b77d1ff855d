use model::error::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Error reading CSV file {path}: {reason}")]
    ReadError { path: String, reason: String },
    #[error("CSV file {0} has no header row")]
    MissingHeader(String),
    #[error("Malformed table: {0}")]
    Table(#[from] ModelError),
}
