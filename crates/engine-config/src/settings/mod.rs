//! Load settings assembled from environment variables.
//!
//! Every variable is prefixed with `SALESLOAD_`. Connection credentials are
//! never given defaults; they have to be supplied by the caller's environment.

use crate::{
    env::EnvManager,
    settings::{connection::ConnectionSettings, error::SettingsError, input::InputSettings},
};
use std::str::FromStr;

pub mod connection;
pub mod error;
pub mod input;

pub const BATCH_SIZE: &str = "SALESLOAD_BATCH_SIZE";
pub const DEFAULT_BATCH_SIZE: usize = 500;

#[derive(Debug, Clone)]
pub struct LoadSettings {
    pub connection: ConnectionSettings,
    pub input: InputSettings,
    pub batch_size: usize,
}

impl LoadSettings {
    pub fn from_env(env: &EnvManager) -> Result<Self, SettingsError> {
        Ok(LoadSettings {
            connection: ConnectionSettings::from_env(env)?,
            input: InputSettings::from_env(env)?,
            batch_size: batch_size(env)?,
        })
    }
}

/// Rows per INSERT statement; must be positive.
pub fn batch_size(env: &EnvManager) -> Result<usize, SettingsError> {
    let size = parse_or(env, BATCH_SIZE, DEFAULT_BATCH_SIZE)?;
    if size == 0 {
        return Err(SettingsError::InvalidValue {
            name: BATCH_SIZE.to_string(),
            value: "0".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(size)
}

pub(crate) fn required(env: &EnvManager, name: &str) -> Result<String, SettingsError> {
    env.get(name)
        .map(str::to_string)
        .ok_or_else(|| SettingsError::MissingVariable(name.to_string()))
}

pub(crate) fn parse_or<T>(env: &EnvManager, name: &str, default: T) -> Result<T, SettingsError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env.get(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| SettingsError::InvalidValue {
                name: name.to_string(),
                value: raw.to_string(),
                reason: e.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_size_default_and_override() {
        assert_eq!(batch_size(&EnvManager::from_vars([("X", "1")])), Ok(500));
        assert_eq!(
            batch_size(&EnvManager::from_vars([(BATCH_SIZE, "25")])),
            Ok(25)
        );
    }

    #[test]
    fn test_batch_size_rejects_zero_and_garbage() {
        assert!(matches!(
            batch_size(&EnvManager::from_vars([(BATCH_SIZE, "0")])),
            Err(SettingsError::InvalidValue { .. })
        ));
        assert!(matches!(
            batch_size(&EnvManager::from_vars([(BATCH_SIZE, "lots")])),
            Err(SettingsError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_load_settings_requires_credentials() {
        let env = EnvManager::from_vars([("SALESLOAD_DB_USER", "loader")]);
        let err = LoadSettings::from_env(&env).unwrap_err();
        assert_eq!(
            err,
            SettingsError::MissingVariable("SALESLOAD_DB_PASSWORD".into())
        );
    }
}
