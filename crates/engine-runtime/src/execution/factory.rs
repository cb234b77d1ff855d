use crate::error::MigrationError;
use connectors::adapter::Adapter;
use engine_config::settings::connection::ConnectionSettings;
use engine_core::{connectors::sql::SqlDestination, error::StoreError};
use planner::query::{
    ast::{expr::Expr, select::Select},
    renderer::render,
};
use tracing::info;

/// Connects to the configured database and wraps it as a destination.
pub async fn create_destination(
    settings: &ConnectionSettings,
    batch_size: usize,
) -> Result<SqlDestination, MigrationError> {
    let adapter = connect(settings).await?;
    Ok(SqlDestination::new(adapter, batch_size))
}

/// Opens a connection, runs `SELECT 1` and closes it again.
pub async fn test_connection(settings: &ConnectionSettings) -> Result<(), MigrationError> {
    let adapter = connect(settings).await?;

    let probe = Select {
        columns: vec![Expr::Literal("1".to_string())],
        ..Default::default()
    };
    let (sql, _) = render(&probe, adapter.dialect().as_ref());

    let sql_adapter = adapter.get_sql();
    sql_adapter
        .query_rows(&sql)
        .await
        .map_err(|e| MigrationError::Connect(StoreError::Database(e)))?;
    sql_adapter
        .close()
        .await
        .map_err(|e| MigrationError::Connect(StoreError::Database(e)))?;

    info!("Connection to {} {} succeeded", settings.driver, settings.options);
    Ok(())
}

async fn connect(settings: &ConnectionSettings) -> Result<Adapter, MigrationError> {
    info!("Connecting to {} at {}", settings.driver, settings.options);
    Adapter::sql(settings.driver, &settings.options)
        .await
        .map_err(|e| MigrationError::Connect(StoreError::Connect(e)))
}
