use connectors::file::csv::error::FileError;
use engine_config::settings::error::SettingsError;
use engine_core::error::StoreError;
use engine_processing::error::TransformError;
use std::fmt;
use thiserror::Error;

/// The step of a run an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Extract,
    Transform,
    Connect,
    Schema,
    Truncate,
    Load,
    Lookup,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Extract => "extract",
            Stage::Transform => "transform",
            Stage::Connect => "connect",
            Stage::Schema => "schema",
            Stage::Truncate => "truncate",
            Stage::Load => "load",
            Stage::Lookup => "lookup",
        };
        f.write_str(name)
    }
}

/// Top-level errors for a load run.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("[extract] failed to read {table} input: {source}")]
    Extract {
        table: String,
        #[source]
        source: FileError,
    },

    #[error("[transform] {table}: {source}")]
    Transform {
        table: String,
        #[source]
        source: TransformError,
    },

    #[error("[connect] {0}")]
    Connect(#[source] StoreError),

    #[error("[{stage}] {table}: {source}")]
    Store {
        stage: Stage,
        table: String,
        #[source]
        source: StoreError,
    },

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

impl MigrationError {
    pub fn extract(table: &str, source: FileError) -> Self {
        MigrationError::Extract {
            table: table.to_string(),
            source,
        }
    }

    pub fn transform(table: &str, source: TransformError) -> Self {
        MigrationError::Transform {
            table: table.to_string(),
            source,
        }
    }

    pub fn store(stage: Stage, table: &str, source: StoreError) -> Self {
        MigrationError::Store {
            stage,
            table: table.to_string(),
            source,
        }
    }

    pub fn stage(&self) -> Option<Stage> {
        match self {
            MigrationError::Extract { .. } => Some(Stage::Extract),
            MigrationError::Transform { .. } => Some(Stage::Transform),
            MigrationError::Connect(_) => Some(Stage::Connect),
            MigrationError::Store { stage, .. } => Some(*stage),
            MigrationError::Settings(_) => None,
        }
    }
}
