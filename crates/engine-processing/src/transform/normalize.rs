//! Column-name normalization and column drops/renames.

use crate::{error::TransformError, transform::pipeline::Transform};
use model::records::table::Table;
use std::collections::HashSet;
use tracing::debug;

/// Trims, lower-cases and replaces spaces with underscores.
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

pub struct NormalizeColumns;

impl Transform for NormalizeColumns {
    fn name(&self) -> &'static str {
        "normalize_columns"
    }

    fn apply(&self, table: Table) -> Result<Table, TransformError> {
        Ok(table.map_column_names(normalize_column_name))
    }
}

/// Drops the named columns when present. Names are compared after normalization.
pub struct DropColumns {
    names: HashSet<String>,
}

impl DropColumns {
    pub fn new(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|n| normalize_column_name(n)).collect(),
        }
    }
}

impl Transform for DropColumns {
    fn name(&self) -> &'static str {
        "drop_columns"
    }

    fn apply(&self, table: Table) -> Result<Table, TransformError> {
        let before = table.columns().len();
        let table = table.drop_columns_where(|name| self.names.contains(name));
        debug!(
            "Dropped {} columns from {}",
            before - table.columns().len(),
            table.name()
        );
        Ok(table)
    }
}

/// Renames one column; absent source columns are left alone.
pub struct RenameColumn {
    from: String,
    to: String,
}

impl RenameColumn {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

impl Transform for RenameColumn {
    fn name(&self) -> &'static str {
        "rename_column"
    }

    fn apply(&self, table: Table) -> Result<Table, TransformError> {
        Ok(table.rename_column(&self.from, &self.to))
    }
}

/// Fails when any of the named columns is absent.
pub struct RequireColumns {
    names: Vec<String>,
}

impl RequireColumns {
    pub fn new(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
        }
    }
}

impl Transform for RequireColumns {
    fn name(&self) -> &'static str {
        "require_columns"
    }

    fn apply(&self, table: Table) -> Result<Table, TransformError> {
        match self.names.iter().find(|n| !table.has_column(n)) {
            Some(missing) => Err(TransformError::MissingRequiredColumn {
                table: table.name().to_string(),
                column: missing.clone(),
            }),
            None => Ok(table),
        }
    }
}
