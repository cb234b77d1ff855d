//! The linear load run: extract, prepare, then load into a destination.
//!
//! All transforms that can reject the input run in [`prepare`], before any
//! destination is contacted. [`load`] then issues store operations strictly
//! one after another. The load is not wrapped in a transaction: a failure
//! after truncation leaves the destination empty or partially loaded, and the
//! next successful run replaces everything.

use crate::{
    error::{MigrationError, Stage},
    execution::{
        extract::{RawInputs, SALES, extract},
        report::LoadReport,
    },
};
use engine_config::settings::input::InputSettings;
use engine_core::connectors::destination::Destination;
use engine_processing::{
    filter::{CUSTOMER_ID, PRODUCT_ID, ReferentialFilter},
    orders::synthesize,
    prepare::{
        customers_pipeline, products_pipeline, project_customers, project_products,
        sales_pipeline,
    },
    transform::pipeline::Transform,
};
use model::records::table::Table;
use planner::schema::{self, CUSTOMERS, ORDER_ITEMS, ORDERS, PRODUCTS};
use tracing::info;

/// Load-ready tables plus the counts gathered on the way.
#[derive(Debug, Clone)]
pub struct PreparedInputs {
    pub customers: Table,
    pub products: Table,
    /// Normalized, typed and deduplicated sales, not yet filtered.
    pub sales: Table,
    pub report: LoadReport,
}

pub fn prepare(raw: RawInputs) -> Result<PreparedInputs, MigrationError> {
    info!("Transforming input tables");
    let mut report = LoadReport::default();

    report.customers.read = raw.customers.row_count();
    let customers = customers_pipeline()
        .apply(raw.customers)
        .and_then(|t| project_customers(&t))
        .map_err(|e| MigrationError::transform(CUSTOMERS, e))?;
    report.customers.prepared = customers.row_count();

    report.products.read = raw.products.row_count();
    let products = products_pipeline()
        .apply(raw.products)
        .and_then(|t| project_products(&t))
        .map_err(|e| MigrationError::transform(PRODUCTS, e))?;
    report.products.prepared = products.row_count();

    report.sales.read = raw.sales.row_count();
    let sales = sales_pipeline()
        .apply(raw.sales)
        .map_err(|e| MigrationError::transform(SALES, e))?;
    report.sales.prepared = sales.row_count();

    info!(
        "Prepared {} customers, {} products, {} sales",
        customers.row_count(),
        products.row_count(),
        sales.row_count()
    );

    Ok(PreparedInputs {
        customers,
        products,
        sales,
        report,
    })
}

pub async fn load(
    prepared: PreparedInputs,
    destination: &dyn Destination,
) -> Result<LoadReport, MigrationError> {
    let PreparedInputs {
        customers,
        products,
        sales,
        mut report,
    } = prepared;
    report.destination = destination.name().to_string();

    info!("Creating destination tables");
    destination
        .create_tables(&schema::destination_tables())
        .await
        .map_err(|e| MigrationError::store(Stage::Schema, "destination tables", e))?;

    info!("Truncating destination tables");
    for table in schema::truncate_order() {
        destination
            .truncate(table)
            .await
            .map_err(|e| MigrationError::store(Stage::Truncate, table, e))?;
    }

    report.customers.loaded = write(destination, CUSTOMERS, &customers).await?;
    report.products.loaded = write(destination, PRODUCTS, &products).await?;

    info!("Reading back valid customer and product ids");
    let valid_customers = destination
        .fetch_keys(CUSTOMERS, CUSTOMER_ID)
        .await
        .map_err(|e| MigrationError::store(Stage::Lookup, CUSTOMERS, e))?;
    let valid_products = destination
        .fetch_keys(PRODUCTS, PRODUCT_ID)
        .await
        .map_err(|e| MigrationError::store(Stage::Lookup, PRODUCTS, e))?;

    let clean = ReferentialFilter::new(valid_customers, valid_products)
        .apply(sales)
        .map_err(|e| MigrationError::transform(SALES, e))?;
    report.sales_rejected = report.sales.prepared - clean.row_count();
    report.sales.loaded = clean.row_count();

    let batch = synthesize(clean).map_err(|e| MigrationError::transform(ORDERS, e))?;
    report.orders_loaded = write(destination, ORDERS, &batch.orders).await?;
    report.order_items_loaded = write(destination, ORDER_ITEMS, &batch.order_items).await?;

    report.log();
    Ok(report)
}

/// Extract, prepare and load in one go.
pub async fn run(
    input: &InputSettings,
    destination: &dyn Destination,
) -> Result<LoadReport, MigrationError> {
    let prepared = prepare(extract(input)?)?;
    load(prepared, destination).await
}

async fn write(
    destination: &dyn Destination,
    table: &str,
    data: &Table,
) -> Result<usize, MigrationError> {
    info!("Loading {} rows into {}", data.row_count(), table);
    destination
        .write_table(table, data)
        .await
        .map_err(|e| MigrationError::store(Stage::Load, table, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::connectors::memory::MemoryDestination;
    use model::core::value::Value;
    use tracing_test::traced_test;

    fn table(name: &str, headers: &[&str], rows: &[&[&str]]) -> Table {
        let rows = rows
            .iter()
            .map(|r| r.iter().map(|c| Value::from(*c)).collect())
            .collect();
        Table::from_rows(name, headers, rows).unwrap()
    }

    fn raw_inputs() -> RawInputs {
        RawInputs {
            customers: table(
                "customers",
                &["Customer ID", "First Name", "Last Name"],
                &[&["1", "Alice", "Smith"], &["2", "Bob", "Jones"]],
            ),
            products: table(
                "products",
                &["Product ID", "Product Name", "Category", "Price", "Stock Quantity"],
                &[&["10", "Widget", "Tools", "2.50", "100"]],
            ),
            sales: table(
                "sales",
                &[
                    "Transaction ID",
                    "Customer ID",
                    "Product ID",
                    "Quantity",
                    "Unit Price",
                    "Transaction Date",
                    "Status",
                ],
                &[
                    &["T1", "1", "10", "3", "2.50", "2024-01-15", "Completed"],
                    &["T2", "2", "999", "1", "2.50", "2024-01-16", "Pending"],
                ],
            ),
        }
    }

    #[tokio::test]
    #[traced_test]
    async fn test_load_into_memory() {
        let store = MemoryDestination::new();
        let report = load(prepare(raw_inputs()).unwrap(), &store).await.unwrap();

        assert_eq!(report.destination, "memory");
        assert_eq!(report.customers.loaded, 2);
        assert_eq!(report.products.loaded, 1);
        assert_eq!(report.sales_rejected, 1);
        assert_eq!(report.orders_loaded, 1);
        assert_eq!(report.order_items_loaded, 1);
        assert!(logs_contain("Loading 1 rows into orders"));

        let items = store.snapshot(ORDER_ITEMS).await.unwrap();
        assert_eq!(items.value(0, "order_id"), Some(&Value::Int(1)));
        assert_eq!(items.value(0, "subtotal"), Some(&Value::Float(7.5)));
    }

    #[tokio::test]
    async fn test_missing_unit_price_fails_in_prepare() {
        let mut raw = raw_inputs();
        raw.sales = table(
            "sales",
            &["Customer ID", "Product ID", "Quantity"],
            &[&["1", "10", "3"]],
        );

        let err = prepare(raw).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Transform));
        assert!(err.to_string().contains("unit_price"));
    }

    #[tokio::test]
    async fn test_rerun_replaces_previous_load() {
        let store = MemoryDestination::new();
        load(prepare(raw_inputs()).unwrap(), &store).await.unwrap();
        let report = load(prepare(raw_inputs()).unwrap(), &store).await.unwrap();

        assert_eq!(report.orders_loaded, 1);
        assert_eq!(store.row_count(CUSTOMERS).await, 2);
        assert_eq!(store.row_count(ORDERS).await, 1);
        let items = store.snapshot(ORDER_ITEMS).await.unwrap();
        assert_eq!(items.value(0, "order_item_id"), Some(&Value::Int(1)));
    }
}
