use crate::sql::{
    base::{
        adapter::{DatabaseKind, SqlAdapter},
        error::{ConnectorError, DbError},
        options::ConnectOptions,
        row::DbRow,
    },
    postgres::{params::PgParamStore, utils::connect_client},
};
use async_trait::async_trait;
use model::{core::value::Value, records::row::RowData};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_postgres::Client;
use tracing::{debug, info};

#[derive(Clone)]
pub struct PgAdapter {
    client: Arc<RwLock<Client>>,
}

#[async_trait]
impl SqlAdapter for PgAdapter {
    async fn connect(opts: &ConnectOptions) -> Result<Self, ConnectorError> {
        let client = Arc::new(RwLock::new(connect_client(opts).await?));
        info!("Connected to PostgreSQL at {}", opts);
        Ok(PgAdapter { client })
    }

    async fn exec(&self, query: &str) -> Result<(), DbError> {
        debug!("Postgres exec: {}", query);
        let client = self.client.read().await;
        client.batch_execute(query).await?;
        Ok(())
    }

    async fn exec_params(&self, query: &str, params: Vec<Value>) -> Result<u64, DbError> {
        debug!("Postgres exec with {} params: {}", params.len(), query);
        let bindings = PgParamStore::from_values(params);
        let client = self.client.write().await;
        let affected = client.execute(query, &bindings.as_refs()).await?;
        Ok(affected)
    }

    async fn query_rows(&self, sql: &str) -> Result<Vec<RowData>, DbError> {
        debug!("Postgres query: {}", sql);
        let client = self.client.read().await;
        let rows = client.query(sql, &[]).await?;
        rows.iter()
            .map(|row| DbRow::PostgresRow(row).to_row_data(""))
            .collect()
    }

    fn kind(&self) -> DatabaseKind {
        DatabaseKind::Postgres
    }
}
