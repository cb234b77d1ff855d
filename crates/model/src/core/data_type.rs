use serde::{Deserialize, Serialize};
use std::{borrow::Cow, fmt};

/// Column types understood by the loader, independent of any SQL dialect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DataType {
    Int,
    Long,
    Float,
    Double,
    Boolean,
    Date,
    VarChar,
    String,
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlDialect {
    MySql,
    Postgres,
}

impl DataType {
    pub fn mysql_name(&self) -> Cow<'_, str> {
        match self {
            DataType::Int => Cow::Borrowed("INT"),
            DataType::Long => Cow::Borrowed("BIGINT"),
            DataType::Float => Cow::Borrowed("FLOAT"),
            DataType::Double => Cow::Borrowed("DOUBLE"),
            DataType::Boolean => Cow::Borrowed("BOOLEAN"),
            DataType::Date => Cow::Borrowed("DATE"),
            DataType::VarChar => Cow::Borrowed("VARCHAR"),
            DataType::String => Cow::Borrowed("TEXT"),
            DataType::Null => Cow::Borrowed("NULL"),
        }
    }

    pub fn postgres_name(&self) -> Cow<'_, str> {
        match self {
            DataType::Int => Cow::Borrowed("INTEGER"),
            DataType::Long => Cow::Borrowed("BIGINT"),
            DataType::Float => Cow::Borrowed("FLOAT"),
            DataType::Double => Cow::Borrowed("DOUBLE PRECISION"),
            DataType::Boolean => Cow::Borrowed("BOOLEAN"),
            DataType::Date => Cow::Borrowed("DATE"),
            DataType::VarChar => Cow::Borrowed("VARCHAR"),
            DataType::String => Cow::Borrowed("TEXT"),
            DataType::Null => Cow::Borrowed("NULL"),
        }
    }

    pub fn supports_length(&self, dialect: SqlDialect) -> bool {
        match dialect {
            SqlDialect::Postgres | SqlDialect::MySql => matches!(self, DataType::VarChar),
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, DataType::Int | DataType::Long)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            DataType::Int | DataType::Long | DataType::Float | DataType::Double
        )
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.postgres_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_names() {
        assert_eq!(DataType::Int.mysql_name(), "INT");
        assert_eq!(DataType::Int.postgres_name(), "INTEGER");
        assert_eq!(DataType::Float.mysql_name(), "FLOAT");
        assert_eq!(DataType::Float.postgres_name(), "FLOAT");
        assert_eq!(DataType::String.mysql_name(), "TEXT");
        assert_eq!(DataType::Date.postgres_name(), "DATE");
    }

    #[test]
    fn test_supports_length() {
        assert!(DataType::VarChar.supports_length(SqlDialect::MySql));
        assert!(!DataType::String.supports_length(SqlDialect::Postgres));
    }
}
