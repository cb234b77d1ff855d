use crate::sql::base::{
    error::ConnectorError,
    options::{ConnectOptions, TlsMode},
};
use native_tls::TlsConnector;
use postgres_native_tls::MakeTlsConnector;
use tokio_postgres::{Client, Config, NoTls, config::SslMode};
use tracing::{error, warn};

pub(crate) fn build_config(opts: &ConnectOptions) -> Config {
    let mut config = Config::new();
    config
        .host(&opts.host)
        .port(opts.port)
        .user(&opts.user)
        .password(&opts.password)
        .dbname(&opts.database)
        .ssl_mode(match opts.tls {
            TlsMode::Disable => SslMode::Disable,
            TlsMode::Prefer => SslMode::Prefer,
            TlsMode::Require => SslMode::Require,
        });
    config
}

pub(crate) async fn connect_client(opts: &ConnectOptions) -> Result<Client, ConnectorError> {
    let config = build_config(opts);

    match opts.tls {
        TlsMode::Disable => connect_without_tls(config).await,
        TlsMode::Require => connect_with_tls(config).await,
        TlsMode::Prefer => match connect_with_tls(config.clone()).await {
            Ok(client) => Ok(client),
            Err(error) => {
                warn!(%error, "Postgres TLS handshake failed, retrying without TLS");
                let mut plain = config;
                plain.ssl_mode(SslMode::Disable);
                connect_without_tls(plain).await
            }
        },
    }
}

pub(crate) async fn connect_with_tls(config: Config) -> Result<Client, ConnectorError> {
    let connector = TlsConnector::builder().build()?;
    let tls = MakeTlsConnector::new(connector);
    let (client, connection) = config.connect(tls).await?;
    tokio::spawn(async move {
        if let Err(err) = connection.await {
            error!(%err, "Postgres connection error");
        }
    });
    Ok(client)
}

pub(crate) async fn connect_without_tls(config: Config) -> Result<Client, ConnectorError> {
    let (client, connection) = config.connect(NoTls).await?;
    tokio::spawn(async move {
        if let Err(err) = connection.await {
            error!(%err, "Postgres connection error");
        }
    });
    Ok(client)
}
