use crate::{error::TransformError, transform::pipeline::Transform};
use model::{core::value::Value, records::table::Table};
use std::collections::HashSet;
use tracing::warn;

/// Keeps the first row for every key value and drops rows whose key is null.
pub struct DedupByKey {
    column: String,
}

impl DedupByKey {
    pub fn new(column: &str) -> Self {
        Self {
            column: column.to_string(),
        }
    }
}

impl Transform for DedupByKey {
    fn name(&self) -> &'static str {
        "dedup_by_key"
    }

    fn apply(&self, table: Table) -> Result<Table, TransformError> {
        let (mask, nulls, duplicates) = {
            let Some(keys) = table.column(&self.column) else {
                return Err(TransformError::MissingRequiredColumn {
                    table: table.name().to_string(),
                    column: self.column.clone(),
                });
            };

            let mut seen: HashSet<&Value> = HashSet::with_capacity(keys.values.len());
            let (mut nulls, mut duplicates) = (0usize, 0usize);
            let mask: Vec<bool> = keys
                .values
                .iter()
                .map(|key| {
                    if key.is_null() {
                        nulls += 1;
                        false
                    } else if !seen.insert(key) {
                        duplicates += 1;
                        false
                    } else {
                        true
                    }
                })
                .collect();
            (mask, nulls, duplicates)
        };

        if nulls > 0 {
            warn!(
                "Dropped {} {} rows with a null {}",
                nulls,
                table.name(),
                self.column
            );
        }
        if duplicates > 0 {
            warn!(
                "Dropped {} {} rows with a repeated {}",
                duplicates,
                table.name(),
                self.column
            );
        }

        Ok(table.retain_rows(&mask))
    }
}

/// Removes rows that repeat an earlier row in every column.
pub struct DedupRows;

impl Transform for DedupRows {
    fn name(&self) -> &'static str {
        "dedup_rows"
    }

    fn apply(&self, table: Table) -> Result<Table, TransformError> {
        let mut seen: HashSet<Vec<Value>> = HashSet::with_capacity(table.row_count());
        let mask: Vec<bool> = (0..table.row_count())
            .map(|row| seen.insert(table.row_values(row)))
            .collect();

        let duplicates = mask.iter().filter(|keep| !**keep).count();
        if duplicates > 0 {
            warn!("Dropped {} duplicate {} rows", duplicates, table.name());
        }
        Ok(table.retain_rows(&mask))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_occurrence_wins() {
        let table = Table::from_rows(
            "customers",
            &["customer_id", "customer_name"],
            vec![
                vec![Value::Int(1), Value::from("Alice")],
                vec![Value::Null, Value::from("Nobody")],
                vec![Value::Int(2), Value::from("Bob")],
                vec![Value::Int(1), Value::from("Alice again")],
            ],
        )
        .unwrap();

        let out = DedupByKey::new("customer_id").apply(table).unwrap();
        assert_eq!(out.row_count(), 2);
        assert_eq!(out.value(0, "customer_name"), Some(&Value::from("Alice")));
        assert_eq!(out.value(1, "customer_name"), Some(&Value::from("Bob")));
    }

    #[test]
    fn test_missing_key_column() {
        let table = Table::from_rows("products", &["name"], vec![]).unwrap();
        assert!(matches!(
            DedupByKey::new("product_id").apply(table),
            Err(TransformError::MissingRequiredColumn { .. })
        ));
    }

    #[test]
    fn test_exact_duplicate_rows_removed() {
        let table = Table::from_rows(
            "sales",
            &["customer_id", "quantity"],
            vec![
                vec![Value::Int(1), Value::Int(3)],
                vec![Value::Int(1), Value::Int(3)],
                vec![Value::Int(1), Value::Int(4)],
                vec![Value::Null, Value::Null],
                vec![Value::Null, Value::Null],
            ],
        )
        .unwrap();

        let out = DedupRows.apply(table).unwrap();
        assert_eq!(
            out.column("quantity").unwrap().values,
            vec![Value::Int(3), Value::Int(4), Value::Null]
        );
    }

    #[test]
    fn test_rows_differing_only_in_zero_sign_are_duplicates() {
        let table = Table::from_rows(
            "sales",
            &["customer_id", "unit_price"],
            vec![
                vec![Value::Int(2), Value::Float(0.0)],
                vec![Value::Int(2), Value::Float(-0.0)],
            ],
        )
        .unwrap();

        let out = DedupRows.apply(table).unwrap();
        assert_eq!(out.row_count(), 1);
    }
}
