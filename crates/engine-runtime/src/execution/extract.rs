use crate::error::MigrationError;
use connectors::file::csv::{settings::CsvSettings, source::CsvDataSource};
use engine_config::settings::input::InputSettings;
use model::records::table::Table;
use planner::schema::{CUSTOMERS, PRODUCTS};
use std::path::PathBuf;
use tracing::info;

pub const SALES: &str = "sales";

/// The three input files, untouched apart from empty cells read as null.
#[derive(Debug, Clone)]
pub struct RawInputs {
    pub customers: Table,
    pub products: Table,
    pub sales: Table,
}

pub fn extract(input: &InputSettings) -> Result<RawInputs, MigrationError> {
    info!("Extracting input files from {}", input.data_dir.display());
    let settings = CsvSettings::with_delimiter(input.delimiter);

    let read = |name: &str, path: PathBuf| {
        CsvDataSource::new(path, settings.clone())
            .read_table(name)
            .map_err(|e| MigrationError::extract(name, e))
    };

    Ok(RawInputs {
        customers: read(CUSTOMERS, input.customers_path())?,
        products: read(PRODUCTS, input.products_path())?,
        sales: read(SALES, input.sales_path())?,
    })
}
