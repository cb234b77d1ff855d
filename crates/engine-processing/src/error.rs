use model::error::ModelError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum TransformError {
    #[error("Missing required column '{column}' in {table} data")]
    MissingRequiredColumn { table: String, column: String },

    #[error("Duplicate order id {0}")]
    DuplicateOrderId(i64),

    #[error("Table error: {0}")]
    Table(#[from] ModelError),
}
