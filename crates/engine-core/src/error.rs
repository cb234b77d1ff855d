use connectors::{error::AdapterError, sql::base::error::DbError};
use model::error::ModelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to connect to destination: {0}")]
    Connect(#[from] AdapterError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Unknown destination table: {0}")]
    UnknownTable(String),

    #[error("Constraint violation on '{table}': {reason}")]
    Constraint { table: String, reason: String },

    #[error("Table error: {0}")]
    Table(#[from] ModelError),

    #[error("Column '{column}' of '{table}' holds a non-integer key: {value}")]
    InvalidKey {
        table: String,
        column: String,
        value: String,
    },
}
