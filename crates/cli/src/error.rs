use engine_config::settings::error::SettingsError;
use engine_runtime::error::{MigrationError, Stage};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Load failed: {0}")]
    Runner(#[from] MigrationError),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// 2 configuration, 3 input or validation, 4 store, 1 anything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Settings(_) => 2,
            CliError::Runner(err) => match err {
                MigrationError::Settings(_) => 2,
                _ => match err.stage() {
                    Some(Stage::Extract | Stage::Transform) => 3,
                    Some(
                        Stage::Connect
                        | Stage::Schema
                        | Stage::Truncate
                        | Stage::Load
                        | Stage::Lookup,
                    ) => 4,
                    None => 1,
                },
            },
            CliError::JsonSerialize(_) | CliError::Io(_) => 1,
        }
    }
}
