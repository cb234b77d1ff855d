#![allow(dead_code)]

use engine_config::{
    env::EnvManager,
    settings::{connection::ConnectionSettings, error::SettingsError},
};
use model::{core::value::Value, records::table::Table};

/// Live tests read the same variables as the binary, under a `_TEST` driver
/// switch so a developer's real settings are never picked up by accident.
pub const TEST_DRIVER: &str = "SALESLOAD_TEST_DRIVER";

pub fn live_settings(driver: &str) -> Result<ConnectionSettings, SettingsError> {
    let mut env = EnvManager::new();
    env.set("SALESLOAD_DB_DRIVER", driver);
    ConnectionSettings::from_env(&env)
}

pub fn live_driver_enabled(driver: &str) -> bool {
    EnvManager::new()
        .get(TEST_DRIVER)
        .is_some_and(|d| d.eq_ignore_ascii_case(driver))
}

pub fn column_i64(table: &Table, column: &str) -> Vec<i64> {
    table
        .column(column)
        .map(|c| c.values.iter().filter_map(Value::as_i64).collect())
        .unwrap_or_default()
}
