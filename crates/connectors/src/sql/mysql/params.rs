use chrono::{Datelike, NaiveDate};
use model::core::value::Value;
use mysql_async::{Params, Value as MySqlValue};

pub struct MySqlParam(MySqlValue);

impl MySqlParam {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Int(i) => MySqlParam(MySqlValue::Int(*i)),
            Value::Float(f) => MySqlParam(MySqlValue::Double(*f)),
            Value::String(s) => MySqlParam(MySqlValue::Bytes(s.clone().into_bytes())),
            Value::Boolean(b) => MySqlParam(MySqlValue::Int(if *b { 1 } else { 0 })),
            Value::Date(d) => MySqlParam(mysql_date(d)),
            Value::Null => MySqlParam(MySqlValue::NULL),
        }
    }
}

/// MySQL stores years as u16; a date outside that range binds as NULL.
fn mysql_date(date: &NaiveDate) -> MySqlValue {
    let parts = (
        u16::try_from(date.year()),
        u8::try_from(date.month()),
        u8::try_from(date.day()),
    );
    match parts {
        (Ok(y), Ok(m), Ok(d)) => MySqlValue::Date(y, m, d, 0, 0, 0, 0),
        _ => MySqlValue::NULL,
    }
}

pub struct MySqlParamStore {
    pub params: Vec<MySqlParam>,
}

impl MySqlParamStore {
    pub fn from_values(values: &[Value]) -> Self {
        let params = values.iter().map(MySqlParam::from_value).collect();
        MySqlParamStore { params }
    }

    pub fn params(self) -> Params {
        if self.params.is_empty() {
            return Params::Empty;
        }
        Params::Positional(self.params.into_iter().map(|p| p.0).collect())
    }
}
