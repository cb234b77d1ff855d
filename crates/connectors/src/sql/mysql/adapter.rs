use crate::sql::{
    base::{
        adapter::{DatabaseKind, SqlAdapter},
        error::{ConnectorError, DbError},
        options::ConnectOptions,
        row::DbRow,
    },
    mysql::params::MySqlParamStore,
};
use async_trait::async_trait;
use model::{core::value::Value, records::row::RowData};
use mysql_async::{OptsBuilder, Pool, Row, prelude::*};
use tracing::{debug, info};

#[derive(Clone)]
pub struct MySqlAdapter {
    pool: Pool,
}

#[async_trait]
impl SqlAdapter for MySqlAdapter {
    async fn connect(opts: &ConnectOptions) -> Result<Self, ConnectorError> {
        let builder = OptsBuilder::default()
            .ip_or_hostname(opts.host.clone())
            .tcp_port(opts.port)
            .user(Some(opts.user.clone()))
            .pass(Some(opts.password.clone()))
            .db_name(Some(opts.database.clone()));
        let pool = Pool::new(builder);

        // Fail fast on bad credentials instead of at the first statement
        let conn = pool.get_conn().await?;
        drop(conn);

        info!("Connected to MySQL at {}", opts);
        Ok(MySqlAdapter { pool })
    }

    async fn exec(&self, query: &str) -> Result<(), DbError> {
        debug!("MySQL exec: {}", query);
        let mut conn = self.pool.get_conn().await?;
        conn.query_drop(query).await?;
        Ok(())
    }

    async fn exec_params(&self, query: &str, params: Vec<Value>) -> Result<u64, DbError> {
        debug!("MySQL exec with {} params: {}", params.len(), query);
        let bindings = MySqlParamStore::from_values(&params);
        let mut conn = self.pool.get_conn().await?;
        conn.exec_drop(query, bindings.params()).await?;
        Ok(conn.affected_rows())
    }

    async fn query_rows(&self, sql: &str) -> Result<Vec<RowData>, DbError> {
        debug!("MySQL query: {}", sql);
        let mut conn = self.pool.get_conn().await?;
        let rows: Vec<Row> = conn.query(sql).await?;
        rows.iter()
            .map(|row| DbRow::MySqlRow(row).to_row_data(""))
            .collect()
    }

    async fn close(&self) -> Result<(), DbError> {
        self.pool.clone().disconnect().await?;
        Ok(())
    }

    fn kind(&self) -> DatabaseKind {
        DatabaseKind::MySql
    }
}
