use crate::{connectors::destination::Destination, error::StoreError};
use async_trait::async_trait;
use model::{core::value::Value, records::table::Table};
use planner::query::ast::create_table::CreateTable;
use std::collections::{HashMap, HashSet};
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Clone)]
struct MemTable {
    def: CreateTable,
    rows: Vec<Vec<Value>>,
    next_id: i64,
}

impl MemTable {
    fn new(def: CreateTable) -> Self {
        MemTable {
            def,
            rows: Vec::new(),
            next_id: 1,
        }
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.def.columns.iter().position(|c| c.name == name)
    }
}

/// An in-process store honouring primary keys and identity columns.
///
/// Used for dry runs and as the test double for SQL destinations.
#[derive(Default)]
pub struct MemoryDestination {
    tables: Mutex<HashMap<String, MemTable>>,
}

impl MemoryDestination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies out the current contents of `table`, columns in DDL order.
    pub async fn snapshot(&self, table: &str) -> Option<Table> {
        let tables = self.tables.lock().await;
        let mem = tables.get(table)?;
        let names = mem.def.column_names();
        Table::from_rows(table, &names, mem.rows.clone()).ok()
    }

    pub async fn row_count(&self, table: &str) -> usize {
        let tables = self.tables.lock().await;
        tables.get(table).map(|t| t.rows.len()).unwrap_or(0)
    }
}

#[async_trait]
impl Destination for MemoryDestination {
    fn name(&self) -> &str {
        "memory"
    }

    async fn create_tables(&self, tables: &[CreateTable]) -> Result<(), StoreError> {
        let mut store = self.tables.lock().await;
        for def in tables {
            store
                .entry(def.table.name.clone())
                .or_insert_with(|| MemTable::new(def.clone()));
        }
        Ok(())
    }

    async fn truncate(&self, table: &str) -> Result<(), StoreError> {
        let mut store = self.tables.lock().await;
        let mem = store
            .get_mut(table)
            .ok_or_else(|| StoreError::UnknownTable(table.to_string()))?;
        mem.rows.clear();
        mem.next_id = 1;
        Ok(())
    }

    async fn write_table(&self, table: &str, data: &Table) -> Result<usize, StoreError> {
        let mut store = self.tables.lock().await;
        let mem = store
            .get_mut(table)
            .ok_or_else(|| StoreError::UnknownTable(table.to_string()))?;

        let mut positions = Vec::with_capacity(data.columns().len());
        for column in data.columns() {
            let idx = mem
                .column_index(&column.name)
                .ok_or_else(|| StoreError::Constraint {
                    table: table.to_string(),
                    reason: format!("no column named '{}'", column.name),
                })?;
            positions.push(idx);
        }

        let pk_idx = mem.def.columns.iter().position(|c| c.is_primary_key);
        let mut seen: HashSet<Value> = match pk_idx {
            Some(idx) => mem.rows.iter().map(|r| r[idx].clone()).collect(),
            None => HashSet::new(),
        };

        // Stage every row first; a failed write leaves the table untouched.
        let mut staged = Vec::with_capacity(data.row_count());
        let mut next_id = mem.next_id;
        for row in 0..data.row_count() {
            let mut full = vec![Value::Null; mem.def.columns.len()];
            for (value, &idx) in data.row_values(row).into_iter().zip(positions.iter()) {
                full[idx] = value;
            }

            for (idx, col) in mem.def.columns.iter().enumerate() {
                if col.auto_increment && full[idx].is_null() {
                    full[idx] = Value::Int(next_id);
                    next_id += 1;
                } else if col.auto_increment
                    && let Some(id) = full[idx].as_i64()
                {
                    next_id = next_id.max(id + 1);
                }
                if !col.is_nullable && full[idx].is_null() {
                    return Err(StoreError::Constraint {
                        table: table.to_string(),
                        reason: format!("null value in non-nullable column '{}'", col.name),
                    });
                }
            }

            if let Some(idx) = pk_idx
                && !seen.insert(full[idx].clone())
            {
                return Err(StoreError::Constraint {
                    table: table.to_string(),
                    reason: format!("duplicate primary key {}", full[idx]),
                });
            }
            staged.push(full);
        }

        let written = staged.len();
        mem.rows.extend(staged);
        mem.next_id = next_id;
        debug!("Memory store wrote {} rows into {}", written, table);
        Ok(written)
    }

    async fn fetch_keys(&self, table: &str, column: &str) -> Result<HashSet<i64>, StoreError> {
        let store = self.tables.lock().await;
        let mem = store
            .get(table)
            .ok_or_else(|| StoreError::UnknownTable(table.to_string()))?;
        let idx = mem
            .column_index(column)
            .ok_or_else(|| StoreError::Constraint {
                table: table.to_string(),
                reason: format!("no column named '{column}'"),
            })?;
        Ok(mem.rows.iter().filter_map(|r| r[idx].as_i64()).collect())
    }
}
