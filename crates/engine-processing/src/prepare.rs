//! Per-entity pipelines that take raw CSV tables to load-ready tables.

use crate::{
    error::TransformError,
    transform::{
        coerce::{CoerceNumeric, NumericKind},
        dates::ParseDates,
        dedup::{DedupByKey, DedupRows},
        derive::{DeriveCustomerName, DeriveSubtotal},
        normalize::{DropColumns, NormalizeColumns, RenameColumn, RequireColumns},
        pipeline::TransformPipeline,
    },
};
use model::records::table::{Column, Table};
use planner::schema::{CUSTOMER_COLUMNS, CUSTOMERS, PRODUCT_COLUMNS, PRODUCTS};
use tracing::warn;

pub fn customers_pipeline() -> TransformPipeline {
    TransformPipeline::new()
        .add_transform(NormalizeColumns)
        .add_transform(DropColumns::new(&["id"]))
        .add_transform(ParseDates::new("registration_date"))
        .add_transform(CoerceNumeric::key("customer_id"))
        .add_transform(DedupByKey::new("customer_id"))
        .add_transform(DeriveCustomerName)
}

pub fn products_pipeline() -> TransformPipeline {
    TransformPipeline::new()
        .add_transform(NormalizeColumns)
        .add_transform(DropColumns::new(&["id"]))
        .add_transform(CoerceNumeric::new("price", NumericKind::Float))
        .add_transform(CoerceNumeric::new("stock_quantity", NumericKind::Integer))
        .add_transform(CoerceNumeric::key("product_id"))
        .add_transform(DedupByKey::new("product_id"))
}

/// Sales keep every row except exact duplicates; the referential filter
/// decides later which ones are loaded. Both key columns must exist so that
/// filtering cannot fail after the destination has been truncated.
pub fn sales_pipeline() -> TransformPipeline {
    TransformPipeline::new()
        .add_transform(NormalizeColumns)
        .add_transform(DropColumns::new(&["id", "transaction_id"]))
        .add_transform(RenameColumn::new("transaction_date", "order_date"))
        .add_transform(RequireColumns::new(&["customer_id", "product_id"]))
        .add_transform(CoerceNumeric::new("quantity", NumericKind::Integer))
        .add_transform(CoerceNumeric::new("unit_price", NumericKind::Float))
        .add_transform(DeriveSubtotal)
        .add_transform(ParseDates::new("order_date"))
        .add_transform(CoerceNumeric::key("customer_id"))
        .add_transform(CoerceNumeric::key("product_id"))
        .add_transform(DedupRows)
}

/// Selects `columns` in order. Columns listed in `required` must exist; any
/// other absent column is filled with nulls.
pub fn project(table: &Table, columns: &[&str], required: &[&str]) -> Result<Table, TransformError> {
    if let Some(missing) = required.iter().find(|c| !table.has_column(c)) {
        return Err(TransformError::MissingRequiredColumn {
            table: table.name().to_string(),
            column: missing.to_string(),
        });
    }

    let projected = columns
        .iter()
        .map(|name| match table.column(name) {
            Some(col) => col.clone(),
            None => {
                warn!("{} has no '{}' column; loading nulls", table.name(), name);
                Column::nulls(name, table.row_count())
            }
        })
        .collect();

    Ok(Table::from_columns(table.name(), projected)?)
}

pub fn project_customers(customers: &Table) -> Result<Table, TransformError> {
    Ok(project(customers, &CUSTOMER_COLUMNS, &["customer_id"])?.renamed(CUSTOMERS))
}

pub fn project_products(products: &Table) -> Result<Table, TransformError> {
    Ok(project(products, &PRODUCT_COLUMNS, &["product_id"])?.renamed(PRODUCTS))
}
