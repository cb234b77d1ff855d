use crate::{
    error::TransformError,
    transform::{coerce::to_float, pipeline::Transform},
};
use model::{
    core::value::Value,
    records::table::{Column, Table},
};
use tracing::info;

pub const QUANTITY: &str = "quantity";
pub const UNIT_PRICE: &str = "unit_price";
pub const SUBTOTAL: &str = "subtotal";

/// Adds `subtotal = quantity * unit_price`.
///
/// Both inputs are required; a table lacking either is rejected as a whole.
/// A row with a null input gets a null subtotal.
pub struct DeriveSubtotal;

impl Transform for DeriveSubtotal {
    fn name(&self) -> &'static str {
        "derive_subtotal"
    }

    fn apply(&self, table: Table) -> Result<Table, TransformError> {
        let column = |name: &str| {
            table
                .column(name)
                .ok_or_else(|| TransformError::MissingRequiredColumn {
                    table: table.name().to_string(),
                    column: name.to_string(),
                })
        };

        let quantity = column(QUANTITY)?;
        let unit_price = column(UNIT_PRICE)?;

        let values = quantity
            .values
            .iter()
            .zip(unit_price.values.iter())
            .map(|(q, p)| match (to_float(q), to_float(p)) {
                (Some(q), Some(p)) => Value::Float(q * p),
                _ => Value::Null,
            })
            .collect();

        let table = table.with_column(Column::new(SUBTOTAL, values))?;
        info!("Derived subtotal for {} {} rows", table.row_count(), table.name());
        Ok(table)
    }
}

/// Fills `customer_name` from `first_name` and `last_name` when the input
/// carries no `customer_name` column of its own.
pub struct DeriveCustomerName;

impl Transform for DeriveCustomerName {
    fn name(&self) -> &'static str {
        "derive_customer_name"
    }

    fn apply(&self, table: Table) -> Result<Table, TransformError> {
        if table.has_column("customer_name") {
            return Ok(table);
        }

        let first = table.column("first_name").map(|c| &c.values);
        let last = table.column("last_name").map(|c| &c.values);
        if first.is_none() && last.is_none() {
            return Ok(table);
        }

        let part = |values: Option<&Vec<Value>>, row: usize| {
            values
                .and_then(|v| v.get(row))
                .and_then(Value::as_string)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let names = (0..table.row_count())
            .map(|row| match (part(first, row), part(last, row)) {
                (Some(f), Some(l)) => Value::String(format!("{f} {l}")),
                (Some(name), None) | (None, Some(name)) => Value::String(name),
                (None, None) => Value::Null,
            })
            .collect();

        Ok(table.with_column(Column::new("customer_name", names))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sales(quantity: Vec<Value>, unit_price: Vec<Value>) -> Table {
        Table::from_columns(
            "sales",
            vec![
                Column::new(QUANTITY, quantity),
                Column::new(UNIT_PRICE, unit_price),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_subtotal_is_exact_product() {
        let quantity = vec![Value::Int(3), Value::Int(0), Value::Int(-2), Value::Int(7)];
        let price = vec![
            Value::Float(2.5),
            Value::Float(9.99),
            Value::Float(4.25),
            Value::Float(-1.5),
        ];
        let out = DeriveSubtotal.apply(sales(quantity.clone(), price.clone())).unwrap();

        for row in 0..out.row_count() {
            let q = quantity[row].as_f64().unwrap();
            let p = price[row].as_f64().unwrap();
            assert_eq!(out.value(row, SUBTOTAL), Some(&Value::Float(q * p)));
        }
        assert_eq!(out.value(0, SUBTOTAL), Some(&Value::Float(7.5)));
    }

    #[test]
    fn test_null_input_gives_null_subtotal() {
        let out = DeriveSubtotal
            .apply(sales(vec![Value::Null], vec![Value::Float(2.0)]))
            .unwrap();
        assert_eq!(out.value(0, SUBTOTAL), Some(&Value::Null));
    }

    #[test]
    fn test_missing_unit_price_is_fatal() {
        let table = Table::from_rows("sales", &[QUANTITY], vec![vec![Value::Int(1)]]).unwrap();
        assert_eq!(
            DeriveSubtotal.apply(table).unwrap_err(),
            TransformError::MissingRequiredColumn {
                table: "sales".into(),
                column: UNIT_PRICE.into()
            }
        );
    }

    #[test]
    fn test_customer_name_from_parts() {
        let table = Table::from_rows(
            "customers",
            &["first_name", "last_name"],
            vec![
                vec![Value::from("Alice"), Value::from("Smith")],
                vec![Value::from("Bob"), Value::Null],
                vec![Value::Null, Value::Null],
            ],
        )
        .unwrap();

        let out = DeriveCustomerName.apply(table).unwrap();
        assert_eq!(
            out.column("customer_name").unwrap().values,
            vec![Value::from("Alice Smith"), Value::from("Bob"), Value::Null]
        );
    }

    #[test]
    fn test_existing_customer_name_kept() {
        let table = Table::from_rows(
            "customers",
            &["customer_name", "first_name"],
            vec![vec![Value::from("Alice"), Value::from("Al")]],
        )
        .unwrap();
        let out = DeriveCustomerName.apply(table.clone()).unwrap();
        assert_eq!(out, table);
    }
}
