use crate::{env::EnvManager, settings::error::SettingsError};
use serde::Serialize;
use std::path::PathBuf;

pub const DATA_DIR: &str = "SALESLOAD_DATA_DIR";
pub const CUSTOMERS_FILE: &str = "SALESLOAD_CUSTOMERS_FILE";
pub const PRODUCTS_FILE: &str = "SALESLOAD_PRODUCTS_FILE";
pub const SALES_FILE: &str = "SALESLOAD_SALES_FILE";
pub const DELIMITER: &str = "SALESLOAD_DELIMITER";

/// Locations of the three input files. Relative file names resolve against
/// `data_dir`; absolute ones are used as given.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputSettings {
    pub data_dir: PathBuf,
    pub customers_file: PathBuf,
    pub products_file: PathBuf,
    pub sales_file: PathBuf,
    pub delimiter: u8,
}

impl Default for InputSettings {
    fn default() -> Self {
        InputSettings {
            data_dir: PathBuf::from("data"),
            customers_file: PathBuf::from("customers_raw.csv"),
            products_file: PathBuf::from("products_raw.csv"),
            sales_file: PathBuf::from("sales_raw.csv"),
            delimiter: b',',
        }
    }
}

impl InputSettings {
    pub fn from_env(env: &EnvManager) -> Result<Self, SettingsError> {
        let defaults = InputSettings::default();
        let path = |name: &str, default: PathBuf| env.get(name).map(PathBuf::from).unwrap_or(default);

        Ok(InputSettings {
            data_dir: path(DATA_DIR, defaults.data_dir),
            customers_file: path(CUSTOMERS_FILE, defaults.customers_file),
            products_file: path(PRODUCTS_FILE, defaults.products_file),
            sales_file: path(SALES_FILE, defaults.sales_file),
            delimiter: match env.get(DELIMITER) {
                None => defaults.delimiter,
                Some(raw) => parse_delimiter(raw)?,
            },
        })
    }

    pub fn customers_path(&self) -> PathBuf {
        self.data_dir.join(&self.customers_file)
    }

    pub fn products_path(&self) -> PathBuf {
        self.data_dir.join(&self.products_file)
    }

    pub fn sales_path(&self) -> PathBuf {
        self.data_dir.join(&self.sales_file)
    }
}

/// A single ASCII byte, or the escape `\t` for tab.
pub fn parse_delimiter(raw: &str) -> Result<u8, SettingsError> {
    let invalid = |reason: &str| SettingsError::InvalidValue {
        name: DELIMITER.to_string(),
        value: raw.to_string(),
        reason: reason.to_string(),
    };

    match raw {
        "\\t" | "tab" => Ok(b'\t'),
        _ => match raw.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(invalid("expected a single ASCII character")),
        },
    }
}
