//! Splits clean sales into orders and order items.

use crate::{error::TransformError, prepare::project};
use model::{
    core::value::Value,
    records::table::{Column, Table},
};
use planner::schema::{ORDER_COLUMNS, ORDER_ITEM_COLUMNS, ORDER_ITEMS, ORDERS};
use std::collections::HashSet;
use tracing::info;

pub const ORDER_ID: &str = "order_id";

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBatch {
    /// One row per clean sale: `order_id, customer_id, order_date, status`.
    pub orders: Table,
    /// One row per clean sale: `order_id, product_id, quantity, unit_price, subtotal`.
    pub order_items: Table,
}

/// Numbers the sales rows 1..=N in their current order and projects them into
/// the two destination shapes.
pub fn synthesize(clean_sales: Table) -> Result<OrderBatch, TransformError> {
    let ids: Vec<Value> = (1..=clean_sales.row_count() as i64).map(Value::Int).collect();
    let numbered = clean_sales.with_column(Column::new(ORDER_ID, ids))?;

    let orders = project(&numbered, &ORDER_COLUMNS, &[ORDER_ID, "customer_id"])?.renamed(ORDERS);
    let orders = unique_order_ids(orders)?;
    let order_items = project(
        &numbered,
        &ORDER_ITEM_COLUMNS,
        &[ORDER_ID, "product_id", "quantity", "unit_price", "subtotal"],
    )?
    .renamed(ORDER_ITEMS);

    info!(
        "Synthesized {} orders and {} order items",
        orders.row_count(),
        order_items.row_count()
    );
    Ok(OrderBatch {
        orders,
        order_items,
    })
}

/// Order ids are generated unique; a repeat means the numbering is broken.
fn unique_order_ids(orders: Table) -> Result<Table, TransformError> {
    if let Some(ids) = orders.column(ORDER_ID) {
        let mut seen = HashSet::with_capacity(ids.values.len());
        for id in ids.values.iter().filter_map(Value::as_i64) {
            if !seen.insert(id) {
                return Err(TransformError::DuplicateOrderId(id));
            }
        }
    }
    Ok(orders)
}
