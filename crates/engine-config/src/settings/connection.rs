use crate::{
    env::EnvManager,
    settings::{error::SettingsError, parse_or, required},
};
use connectors::sql::base::{
    adapter::DatabaseKind,
    options::{ConnectOptions, TlsMode},
};

pub const DB_DRIVER: &str = "SALESLOAD_DB_DRIVER";
pub const DB_HOST: &str = "SALESLOAD_DB_HOST";
pub const DB_PORT: &str = "SALESLOAD_DB_PORT";
pub const DB_USER: &str = "SALESLOAD_DB_USER";
pub const DB_PASSWORD: &str = "SALESLOAD_DB_PASSWORD";
pub const DB_NAME: &str = "SALESLOAD_DB_NAME";
pub const DB_TLS: &str = "SALESLOAD_DB_TLS";

/// Where to connect. `Debug` output never contains the password.
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub driver: DatabaseKind,
    pub options: ConnectOptions,
}

impl ConnectionSettings {
    pub fn from_env(env: &EnvManager) -> Result<Self, SettingsError> {
        let driver = match env.get(DB_DRIVER) {
            None => DatabaseKind::MySql,
            Some(raw) => raw
                .parse::<DatabaseKind>()
                .map_err(|reason| SettingsError::InvalidValue {
                    name: DB_DRIVER.to_string(),
                    value: raw.to_string(),
                    reason,
                })?,
        };

        let tls = match env.get(DB_TLS).map(str::to_lowercase).as_deref() {
            None | Some("prefer") => TlsMode::Prefer,
            Some("disable") => TlsMode::Disable,
            Some("require") => TlsMode::Require,
            Some(other) => {
                return Err(SettingsError::InvalidValue {
                    name: DB_TLS.to_string(),
                    value: other.to_string(),
                    reason: "expected one of disable, prefer, require".to_string(),
                });
            }
        };

        let options = ConnectOptions {
            host: env.get(DB_HOST).unwrap_or("localhost").to_string(),
            port: parse_or(env, DB_PORT, driver.default_port())?,
            user: required(env, DB_USER)?,
            password: required(env, DB_PASSWORD)?,
            database: required(env, DB_NAME)?,
            tls,
        };

        Ok(ConnectionSettings { driver, options })
    }
}
