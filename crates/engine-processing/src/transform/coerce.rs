use crate::{error::TransformError, transform::pipeline::Transform};
use model::{core::value::Value, records::table::Table};
use tracing::warn;

/// Reads a value as a whole number. Integral floats such as `"3.0"` count;
/// anything else, including out-of-range or non-finite input, is `None`.
pub fn to_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Int(i) => Some(*i),
        Value::Float(f) => float_to_int(*f),
        Value::Boolean(b) => Some(i64::from(*b)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(float_to_int))
        }
        Value::Date(_) | Value::Null => None,
    }
}

pub fn to_float(value: &Value) -> Option<f64> {
    let f = match value {
        Value::Int(i) => *i as f64,
        Value::Float(f) => *f,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Boolean(_) | Value::Date(_) | Value::Null => return None,
    };
    f.is_finite().then_some(f)
}

fn float_to_int(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    Integer,
    Float,
}

/// Casts one column to a nullable number. Cells that do not parse become
/// null; the row is kept. Absent columns are skipped.
pub struct CoerceNumeric {
    column: String,
    kind: NumericKind,
}

impl CoerceNumeric {
    pub fn new(column: &str, kind: NumericKind) -> Self {
        Self {
            column: column.to_string(),
            kind,
        }
    }

    /// Identifier columns are nullable integers.
    pub fn key(column: &str) -> Self {
        Self::new(column, NumericKind::Integer)
    }
}

impl Transform for CoerceNumeric {
    fn name(&self) -> &'static str {
        match self.kind {
            NumericKind::Integer => "coerce_integer",
            NumericKind::Float => "coerce_float",
        }
    }

    fn apply(&self, table: Table) -> Result<Table, TransformError> {
        let Some(before) = table.column(&self.column).map(|c| c.null_count()) else {
            return Ok(table);
        };

        let kind = self.kind;
        let table = table.map_column(&self.column, |v| {
            let coerced = match kind {
                NumericKind::Integer => to_integer(&v).map(Value::Int),
                NumericKind::Float => to_float(&v).map(Value::Float),
            };
            coerced.unwrap_or(Value::Null)
        });

        let after = table.column(&self.column).map(|c| c.null_count()).unwrap_or(0);
        if after > before {
            warn!(
                "{} non-numeric values in {}.{} set to null",
                after - before,
                table.name(),
                self.column
            );
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn test_to_integer() {
        assert_eq!(to_integer(&Value::from("42")), Some(42));
        assert_eq!(to_integer(&Value::from(" 7 ")), Some(7));
        assert_eq!(to_integer(&Value::from("3.0")), Some(3));
        assert_eq!(to_integer(&Value::from("-12")), Some(-12));
        assert_eq!(to_integer(&Value::from("3.5")), None);
        assert_eq!(to_integer(&Value::from("abc")), None);
        assert_eq!(to_integer(&Value::from("nan")), None);
        assert_eq!(to_integer(&Value::from("1e300")), None);
        assert_eq!(to_integer(&Value::Null), None);
    }

    #[test]
    fn test_to_float() {
        assert_eq!(to_float(&Value::from("2.50")), Some(2.5));
        assert_eq!(to_float(&Value::Int(3)), Some(3.0));
        assert_eq!(to_float(&Value::from("inf")), None);
        assert_eq!(to_float(&Value::from("$3")), None);
    }

    #[test]
    #[traced_test]
    fn test_key_coercion_nulls_garbage_and_keeps_rows() {
        let table = Table::from_rows(
            "sales",
            &["customer_id"],
            vec![
                vec![Value::from("1")],
                vec![Value::from("C002")],
                vec![Value::Null],
            ],
        )
        .unwrap();

        let out = CoerceNumeric::key("customer_id").apply(table).unwrap();
        assert_eq!(
            out.column("customer_id").unwrap().values,
            vec![Value::Int(1), Value::Null, Value::Null]
        );
        assert!(logs_contain("1 non-numeric values in sales.customer_id"));
    }

    #[test]
    fn test_float_column() {
        let table = Table::from_rows(
            "products",
            &["price"],
            vec![vec![Value::from("2.50")], vec![Value::from("free")]],
        )
        .unwrap();

        let out = CoerceNumeric::new("price", NumericKind::Float)
            .apply(table)
            .unwrap();
        assert_eq!(
            out.column("price").unwrap().values,
            vec![Value::Float(2.5), Value::Null]
        );
    }
}
