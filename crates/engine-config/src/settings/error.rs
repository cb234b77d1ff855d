use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SettingsError {
    #[error("Missing required environment variable {0}")]
    MissingVariable(String),

    #[error("Invalid value '{value}' for {name}: {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Failed to read env file {path}: {reason}")]
    EnvFile { path: String, reason: String },
}
