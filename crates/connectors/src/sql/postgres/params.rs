use bytes::BytesMut;
use model::core::value::Value;
use std::error::Error;
use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};

/// Binds a `Value` to whatever column type the server reports for the
/// placeholder, narrowing integers and floats where needed.
#[derive(Debug)]
pub struct PgParam(Value);

impl PgParam {
    pub fn from_value(value: Value) -> Self {
        PgParam(value)
    }
}

impl ToSql for PgParam {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match &self.0 {
            Value::Null => Ok(IsNull::Yes),
            Value::Int(v) => match *ty {
                Type::INT2 => i16::try_from(*v)?.to_sql(ty, out),
                Type::INT4 => i32::try_from(*v)?.to_sql(ty, out),
                Type::FLOAT4 => (*v as f32).to_sql(ty, out),
                Type::FLOAT8 => (*v as f64).to_sql(ty, out),
                Type::TEXT | Type::VARCHAR => v.to_string().to_sql(ty, out),
                _ => v.to_sql(ty, out),
            },
            Value::Float(v) => match *ty {
                Type::FLOAT4 => (*v as f32).to_sql(ty, out),
                _ => v.to_sql(ty, out),
            },
            Value::String(v) => v.to_sql(ty, out),
            Value::Boolean(v) => v.to_sql(ty, out),
            Value::Date(v) => v.to_sql(ty, out),
        }
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

pub struct PgParamStore {
    pub params: Vec<PgParam>,
}

impl PgParamStore {
    pub fn from_values(values: Vec<Value>) -> Self {
        Self {
            params: values.into_iter().map(PgParam::from_value).collect(),
        }
    }

    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|param| param as &(dyn ToSql + Sync))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn encode(value: Value, ty: &Type) -> (IsNull, Vec<u8>) {
        let mut buf = BytesMut::new();
        let is_null = PgParam::from_value(value).to_sql(ty, &mut buf).unwrap();
        (is_null, buf.to_vec())
    }

    #[test]
    fn test_int_narrowed_to_int4() {
        let (_, bytes) = encode(Value::Int(7), &Type::INT4);
        assert_eq!(bytes, 7i32.to_be_bytes().to_vec());
    }

    #[test]
    fn test_int_out_of_range_for_int2() {
        let mut buf = BytesMut::new();
        assert!(
            PgParam::from_value(Value::Int(100_000))
                .to_sql(&Type::INT2, &mut buf)
                .is_err()
        );
    }

    #[test]
    fn test_null_binds_as_null() {
        let (is_null, bytes) = encode(Value::Null, &Type::DATE);
        assert!(matches!(is_null, IsNull::Yes));
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_float_to_float4() {
        let (_, bytes) = encode(Value::Float(2.5), &Type::FLOAT4);
        assert_eq!(bytes, 2.5f32.to_be_bytes().to_vec());
    }

    #[test]
    fn test_date_encodes() {
        let date = NaiveDate::from_ymd_opt(2000, 1, 2).unwrap();
        let (_, bytes) = encode(Value::Date(date), &Type::DATE);
        // days since 2000-01-01
        assert_eq!(bytes, 1i32.to_be_bytes().to_vec());
    }
}
