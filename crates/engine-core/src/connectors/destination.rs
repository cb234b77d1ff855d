use crate::error::StoreError;
use async_trait::async_trait;
use model::records::table::Table;
use planner::query::ast::create_table::CreateTable;
use std::collections::HashSet;

/// A relational store the loader writes into.
///
/// `write_table` writes the columns present in `data`, by name. Columns of the
/// destination table that `data` does not carry are left to the store: null,
/// or the next identity value for an auto-increment key.
#[async_trait]
pub trait Destination: Send + Sync {
    fn name(&self) -> &str;

    /// Creates each table if it does not exist yet, in the given order.
    async fn create_tables(&self, tables: &[CreateTable]) -> Result<(), StoreError>;

    /// Removes every row and resets identity counters.
    async fn truncate(&self, table: &str) -> Result<(), StoreError>;

    /// Appends all rows of `data` and returns how many were written.
    async fn write_table(&self, table: &str, data: &Table) -> Result<usize, StoreError>;

    /// Reads back the distinct non-null integer values of one column.
    async fn fetch_keys(&self, table: &str, column: &str) -> Result<HashSet<i64>, StoreError>;

    async fn close(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
