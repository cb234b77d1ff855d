//! Columnar in-memory table used between pipeline stages.
//!
//! Every operation consumes the table and returns a new one, so a stage is a
//! plain function from input table to output table.

use crate::{
    core::value::Value,
    error::ModelError,
    records::row::{FieldValue, RowData},
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: &str, values: Vec<Value>) -> Self {
        Column {
            name: name.to_string(),
            values,
        }
    }

    pub fn nulls(name: &str, len: usize) -> Self {
        Column::new(name, vec![Value::Null; len])
    }

    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
    rows: usize,
}

impl Table {
    pub fn new(name: &str) -> Self {
        Table {
            name: name.to_string(),
            columns: Vec::new(),
            rows: 0,
        }
    }

    /// Builds a table from whole columns; all columns must have equal length.
    pub fn from_columns(name: &str, columns: Vec<Column>) -> Result<Self, ModelError> {
        let rows = columns.first().map(|c| c.values.len()).unwrap_or(0);
        if let Some(bad) = columns.iter().find(|c| c.values.len() != rows) {
            return Err(ModelError::ColumnLength {
                column: bad.name.clone(),
                expected: rows,
                found: bad.values.len(),
            });
        }
        Ok(Table {
            name: name.to_string(),
            columns,
            rows,
        })
    }

    /// Builds a table from row-major values laid out under `names`.
    pub fn from_rows(name: &str, names: &[&str], rows: Vec<Vec<Value>>) -> Result<Self, ModelError> {
        let mut columns: Vec<Column> = names
            .iter()
            .map(|n| Column::new(n, Vec::with_capacity(rows.len())))
            .collect();

        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != names.len() {
                return Err(ModelError::RowWidth {
                    row: idx,
                    expected: names.len(),
                    found: row.len(),
                });
            }
            for (col, value) in columns.iter_mut().zip(row) {
                col.values.push(value);
            }
        }

        Table::from_columns(name, columns)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn renamed(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        self.column(column).and_then(|c| c.values.get(row))
    }

    /// Rewrites every column name through `f`, keeping values and order.
    pub fn map_column_names<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> String,
    {
        for col in self.columns.iter_mut() {
            col.name = f(&col.name);
        }
        self
    }

    /// Removes every column whose name satisfies `predicate`.
    pub fn drop_columns_where<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str) -> bool,
    {
        self.columns.retain(|c| !predicate(&c.name));
        self
    }

    /// Renames `from` to `to`; a no-op when `from` is absent.
    pub fn rename_column(mut self, from: &str, to: &str) -> Self {
        if let Some(col) = self.columns.iter_mut().find(|c| c.name == from) {
            col.name = to.to_string();
        }
        self
    }

    /// Replaces the column of the same name, or appends it.
    pub fn with_column(mut self, column: Column) -> Result<Self, ModelError> {
        if !self.columns.is_empty() && column.values.len() != self.rows {
            return Err(ModelError::ColumnLength {
                column: column.name,
                expected: self.rows,
                found: column.values.len(),
            });
        }

        if self.columns.is_empty() {
            self.rows = column.values.len();
        }

        match self.columns.iter_mut().find(|c| c.name == column.name) {
            Some(existing) => *existing = column,
            None => self.columns.push(column),
        }
        Ok(self)
    }

    /// Applies `f` to every value of `name`; a no-op when the column is absent.
    pub fn map_column<F>(mut self, name: &str, f: F) -> Self
    where
        F: Fn(Value) -> Value,
    {
        if let Some(col) = self.columns.iter_mut().find(|c| c.name == name) {
            let values = std::mem::take(&mut col.values);
            col.values = values.into_iter().map(&f).collect();
        }
        self
    }

    /// Keeps the rows whose index maps to `true` in `mask`, preserving order.
    pub fn retain_rows(mut self, mask: &[bool]) -> Self {
        debug_assert_eq!(mask.len(), self.rows);
        for col in self.columns.iter_mut() {
            let values = std::mem::take(&mut col.values);
            col.values = values
                .into_iter()
                .zip(mask.iter())
                .filter_map(|(v, keep)| keep.then_some(v))
                .collect();
        }
        self.rows = mask.iter().filter(|keep| **keep).count();
        self
    }

    /// Projects the table onto `names`, in that order.
    pub fn select(&self, names: &[&str]) -> Result<Table, ModelError> {
        let columns = names
            .iter()
            .map(|n| {
                self.column(n)
                    .cloned()
                    .ok_or_else(|| ModelError::MissingColumn {
                        table: self.name.clone(),
                        column: n.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut projected = Table::from_columns(&self.name, columns)?;
        projected.rows = self.rows;
        Ok(projected)
    }

    pub fn row_values(&self, row: usize) -> Vec<Value> {
        self.columns
            .iter()
            .map(|c| c.values.get(row).cloned().unwrap_or(Value::Null))
            .collect()
    }

    pub fn row(&self, row: usize) -> RowData {
        let fields = self
            .columns
            .iter()
            .map(|c| FieldValue {
                name: c.name.clone(),
                value: c.values.get(row).cloned().unwrap_or(Value::Null),
            })
            .collect();
        RowData::new(&self.name, fields)
    }

    pub fn rows(&self) -> impl Iterator<Item = RowData> + '_ {
        (0..self.rows).map(|idx| self.row(idx))
    }
}
