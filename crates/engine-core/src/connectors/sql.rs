use crate::{connectors::destination::Destination, error::StoreError};
use async_trait::async_trait;
use connectors::adapter::Adapter;
use model::{core::value::Value, records::table::Table};
use planner::{
    query::{
        ast::{
            create_table::CreateTable,
            select::{FromClause, Select},
            truncate::Truncate,
        },
        builder::insert::InsertBuilder,
        dialect::Dialect,
        ident,
        renderer::render,
    },
    table_ref,
};
use std::collections::HashSet;
use tracing::{debug, info};

/// Both MySQL and PostgreSQL reject statements with more bind parameters
/// than this.
const MAX_PARAMS: usize = 65_535;

/// Rows per INSERT, capped so one statement stays under [`MAX_PARAMS`].
fn rows_per_statement(batch_size: usize, width: usize) -> usize {
    match width {
        0 => batch_size.max(1),
        _ => batch_size.min(MAX_PARAMS / width).max(1),
    }
}

/// A `Destination` backed by a MySQL or PostgreSQL connection.
pub struct SqlDestination {
    adapter: Adapter,
    dialect: Box<dyn Dialect>,
    batch_size: usize,
}

impl SqlDestination {
    pub fn new(adapter: Adapter, batch_size: usize) -> Self {
        let dialect = adapter.dialect();
        SqlDestination {
            adapter,
            dialect,
            batch_size: batch_size.max(1),
        }
    }

    pub fn adapter(&self) -> &Adapter {
        &self.adapter
    }
}

#[async_trait]
impl Destination for SqlDestination {
    fn name(&self) -> &str {
        match self.adapter {
            Adapter::MySql(_) => "mysql",
            Adapter::Postgres(_) => "postgres",
        }
    }

    async fn create_tables(&self, tables: &[CreateTable]) -> Result<(), StoreError> {
        for table in tables {
            let (sql, _) = render(table, self.dialect.as_ref());
            self.adapter.get_sql().exec(&sql).await?;
            info!("Ensured table {} exists", table.table.name);
        }
        Ok(())
    }

    async fn truncate(&self, table: &str) -> Result<(), StoreError> {
        let ast = Truncate {
            table: table_ref!(table),
            restart_identity: true,
        };
        let (sql, _) = render(&ast, self.dialect.as_ref());
        self.adapter.get_sql().exec(&sql).await?;
        debug!("Truncated {}", table);
        Ok(())
    }

    async fn write_table(&self, table: &str, data: &Table) -> Result<usize, StoreError> {
        if data.is_empty() {
            info!("No rows to write into {}", table);
            return Ok(0);
        }

        let columns = data.column_names();
        let chunk = rows_per_statement(self.batch_size, columns.len());
        let mut written = 0usize;

        let mut start = 0;
        while start < data.row_count() {
            let end = (start + chunk).min(data.row_count());
            let mut builder = InsertBuilder::new(table_ref!(table)).columns(&columns);
            for row in start..end {
                builder = builder.values(data.row_values(row));
            }

            let (sql, params) = render(&builder.build(), self.dialect.as_ref());
            let affected = self.adapter.get_sql().exec_params(&sql, params).await?;
            debug!("Inserted rows {}..{} into {} ({} affected)", start, end, table, affected);

            written += end - start;
            start = end;
        }

        info!("Wrote {} rows into {}", written, table);
        Ok(written)
    }

    async fn fetch_keys(&self, table: &str, column: &str) -> Result<HashSet<i64>, StoreError> {
        let ast = Select {
            columns: vec![ident(column)],
            from: Some(FromClause {
                table: table_ref!(table),
                alias: None,
            }),
            where_clause: None,
        };
        let (sql, _) = render(&ast, self.dialect.as_ref());
        let rows = self.adapter.get_sql().query_rows(&sql).await?;

        let mut keys = HashSet::with_capacity(rows.len());
        for row in rows {
            match row.get_value(column) {
                Value::Null => {}
                value => {
                    let key = value.as_i64().ok_or_else(|| StoreError::InvalidKey {
                        table: table.to_string(),
                        column: column.to_string(),
                        value: value.to_string(),
                    })?;
                    keys.insert(key);
                }
            }
        }
        Ok(keys)
    }

    async fn close(&self) -> Result<(), StoreError> {
        self.adapter.get_sql().close().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_per_statement_caps_placeholders() {
        // 20000 rows x 5 columns would bind 100000 parameters
        let rows = rows_per_statement(20_000, 5);
        assert_eq!(rows, 13_107);
        assert!(rows * 5 <= MAX_PARAMS);
    }

    #[test]
    fn test_rows_per_statement_keeps_small_batches() {
        assert_eq!(rows_per_statement(500, 5), 500);
        assert_eq!(rows_per_statement(0, 5), 1);
        assert_eq!(rows_per_statement(10, 0), 10);
        assert_eq!(rows_per_statement(10, 70_000), 1);
    }
}
