use crate::sql::base::error::DbError;
use chrono::NaiveDate;
use model::{
    core::value::Value,
    records::row::{FieldValue, RowData},
};
use mysql_async::{Row as MySqlRow, Value as MySqlValue, consts::ColumnType};
use tokio_postgres::{Row as PgRow, types::Type};

pub enum DbRow<'a> {
    MySqlRow(&'a MySqlRow),
    PostgresRow(&'a PgRow),
}

impl DbRow<'_> {
    pub fn to_row_data(&self, table: &str) -> Result<RowData, DbError> {
        let fields = match self {
            DbRow::MySqlRow(row) => mysql_fields(row)?,
            DbRow::PostgresRow(row) => pg_fields(row)?,
        };
        Ok(RowData::new(table, fields))
    }
}

fn mysql_fields(row: &MySqlRow) -> Result<Vec<FieldValue>, DbError> {
    row.columns_ref()
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let name = column.name_str().to_string();
            let value = match row.as_ref(idx) {
                Some(raw) => decode_mysql(raw, column.column_type(), &name)?,
                None => Value::Null,
            };
            Ok(FieldValue { name, value })
        })
        .collect()
}

/// Text-protocol results arrive as bytes; the column type decides how to read them.
fn decode_mysql(raw: &MySqlValue, column_type: ColumnType, name: &str) -> Result<Value, DbError> {
    let decode_err = |reason: String| DbError::Decode {
        column: name.to_string(),
        reason,
    };

    let value = match raw {
        MySqlValue::NULL => Value::Null,
        MySqlValue::Int(i) => Value::Int(*i),
        MySqlValue::UInt(u) => Value::Int(
            i64::try_from(*u).map_err(|e| decode_err(format!("{u} out of range: {e}")))?,
        ),
        MySqlValue::Float(f) => Value::Float(f64::from(*f)),
        MySqlValue::Double(f) => Value::Float(*f),
        MySqlValue::Date(y, m, d, ..) => NaiveDate::from_ymd_opt(i32::from(*y), u32::from(*m), u32::from(*d))
            .map(Value::Date)
            .unwrap_or(Value::Null),
        MySqlValue::Time(..) => Value::String(raw.as_sql(true)),
        MySqlValue::Bytes(bytes) => {
            let text = String::from_utf8(bytes.clone()).map_err(|e| decode_err(e.to_string()))?;
            match column_type {
                ColumnType::MYSQL_TYPE_TINY
                | ColumnType::MYSQL_TYPE_SHORT
                | ColumnType::MYSQL_TYPE_LONG
                | ColumnType::MYSQL_TYPE_INT24
                | ColumnType::MYSQL_TYPE_LONGLONG
                | ColumnType::MYSQL_TYPE_YEAR => Value::Int(
                    text.parse()
                        .map_err(|e| decode_err(format!("'{text}': {e}")))?,
                ),
                ColumnType::MYSQL_TYPE_FLOAT
                | ColumnType::MYSQL_TYPE_DOUBLE
                | ColumnType::MYSQL_TYPE_DECIMAL
                | ColumnType::MYSQL_TYPE_NEWDECIMAL => Value::Float(
                    text.parse()
                        .map_err(|e| decode_err(format!("'{text}': {e}")))?,
                ),
                ColumnType::MYSQL_TYPE_DATE | ColumnType::MYSQL_TYPE_NEWDATE => {
                    NaiveDate::parse_from_str(&text, "%Y-%m-%d")
                        .map(Value::Date)
                        .unwrap_or(Value::Null)
                }
                _ => Value::String(text),
            }
        }
    };
    Ok(value)
}

fn pg_fields(row: &PgRow) -> Result<Vec<FieldValue>, DbError> {
    row.columns()
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let value = match *column.type_() {
                Type::INT2 => row.try_get::<_, Option<i16>>(idx)?.map(|v| Value::Int(v.into())),
                Type::INT4 => row.try_get::<_, Option<i32>>(idx)?.map(|v| Value::Int(v.into())),
                Type::INT8 => row.try_get::<_, Option<i64>>(idx)?.map(Value::Int),
                Type::FLOAT4 => row
                    .try_get::<_, Option<f32>>(idx)?
                    .map(|v| Value::Float(v.into())),
                Type::FLOAT8 => row.try_get::<_, Option<f64>>(idx)?.map(Value::Float),
                Type::BOOL => row.try_get::<_, Option<bool>>(idx)?.map(Value::Boolean),
                Type::DATE => row.try_get::<_, Option<NaiveDate>>(idx)?.map(Value::Date),
                Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => {
                    row.try_get::<_, Option<String>>(idx)?.map(Value::String)
                }
                ref other => {
                    return Err(DbError::Decode {
                        column: column.name().to_string(),
                        reason: format!("unsupported column type {other}"),
                    });
                }
            };

            Ok(FieldValue {
                name: column.name().to_string(),
                value: value.unwrap_or(Value::Null),
            })
        })
        .collect()
}
