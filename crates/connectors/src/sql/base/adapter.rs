use crate::sql::base::{
    error::{ConnectorError, DbError},
    options::ConnectOptions,
};
use async_trait::async_trait;
use model::{core::value::Value, records::row::RowData};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseKind {
    MySql,
    Postgres,
}

impl DatabaseKind {
    pub fn default_port(&self) -> u16 {
        match self {
            DatabaseKind::MySql => 3306,
            DatabaseKind::Postgres => 5432,
        }
    }
}

impl FromStr for DatabaseKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(DatabaseKind::MySql),
            "pg" | "postgres" | "postgresql" => Ok(DatabaseKind::Postgres),
            other => Err(format!("Unknown database driver: {other}")),
        }
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseKind::MySql => write!(f, "mysql"),
            DatabaseKind::Postgres => write!(f, "postgres"),
        }
    }
}

#[async_trait]
pub trait SqlAdapter {
    async fn connect(opts: &ConnectOptions) -> Result<Self, ConnectorError>
    where
        Self: Sized;

    // Exec / Params
    async fn exec(&self, query: &str) -> Result<(), DbError>;
    async fn exec_params(&self, query: &str, params: Vec<Value>) -> Result<u64, DbError>;

    async fn query_rows(&self, sql: &str) -> Result<Vec<RowData>, DbError>;

    /// Releases pooled connections. Safe to call more than once.
    async fn close(&self) -> Result<(), DbError> {
        Ok(())
    }

    fn kind(&self) -> DatabaseKind;
}
