use crate::{
    error::AdapterError,
    sql::{
        base::{adapter::{DatabaseKind, SqlAdapter}, options::ConnectOptions},
        mysql::adapter::MySqlAdapter,
        postgres::adapter::PgAdapter,
    },
};
use planner::query::dialect::{self, Dialect};

#[derive(Clone)]
pub enum Adapter {
    MySql(MySqlAdapter),
    Postgres(PgAdapter),
}

impl Adapter {
    pub async fn sql(kind: DatabaseKind, opts: &ConnectOptions) -> Result<Self, AdapterError> {
        match kind {
            DatabaseKind::MySql => {
                let adapter = MySqlAdapter::connect(opts).await?;
                Ok(Adapter::MySql(adapter))
            }
            DatabaseKind::Postgres => {
                let adapter = PgAdapter::connect(opts).await?;
                Ok(Adapter::Postgres(adapter))
            }
        }
    }

    pub fn get_sql(&self) -> &(dyn SqlAdapter + Send + Sync) {
        match self {
            Adapter::MySql(adapter) => adapter,
            Adapter::Postgres(adapter) => adapter,
        }
    }

    pub fn dialect(&self) -> Box<dyn Dialect> {
        match self {
            Adapter::MySql(_) => Box::new(dialect::MySql),
            Adapter::Postgres(_) => Box::new(dialect::Postgres),
        }
    }
}
