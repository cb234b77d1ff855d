use thiserror::Error;

/// Errors raised while shaping in-memory tables.
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    /// A column does not hold one value per row of its table.
    #[error("Column '{column}' has {found} values, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },

    /// A row does not hold one value per column.
    #[error("Row {row} has {found} values, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A column required by a projection is absent.
    #[error("Table '{table}' has no column '{column}'")]
    MissingColumn { table: String, column: String },
}
