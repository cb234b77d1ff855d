//! Keeps sales whose customer and product exist in the destination store.

use crate::{error::TransformError, transform::pipeline::Transform};
use model::{core::value::Value, records::table::Table};
use std::collections::HashSet;
use tracing::{info, warn};

pub const CUSTOMER_ID: &str = "customer_id";
pub const PRODUCT_ID: &str = "product_id";

/// Inner join of sales against the known customer and product ids, projected
/// back onto the sales columns. Null ids never match. Row order is preserved.
pub struct ReferentialFilter {
    customers: HashSet<i64>,
    products: HashSet<i64>,
}

impl ReferentialFilter {
    pub fn new(customers: HashSet<i64>, products: HashSet<i64>) -> Self {
        Self {
            customers,
            products,
        }
    }

    fn key_column<'a>(
        table: &'a Table,
        column: &str,
    ) -> Result<&'a [Value], TransformError> {
        table
            .column(column)
            .map(|c| c.values.as_slice())
            .ok_or_else(|| TransformError::MissingRequiredColumn {
                table: table.name().to_string(),
                column: column.to_string(),
            })
    }
}

impl Transform for ReferentialFilter {
    fn name(&self) -> &'static str {
        "referential_filter"
    }

    fn apply(&self, sales: Table) -> Result<Table, TransformError> {
        let mask: Vec<bool> = {
            let customer_ids = Self::key_column(&sales, CUSTOMER_ID)?;
            let product_ids = Self::key_column(&sales, PRODUCT_ID)?;

            customer_ids
                .iter()
                .zip(product_ids)
                .map(|(c, p)| {
                    let known_customer = c.as_i64().is_some_and(|id| self.customers.contains(&id));
                    let known_product = p.as_i64().is_some_and(|id| self.products.contains(&id));
                    known_customer && known_product
                })
                .collect()
        };

        let total = sales.row_count();
        let clean = sales.retain_rows(&mask);
        let dropped = total - clean.row_count();
        if dropped > 0 {
            warn!(
                "Dropped {} of {} sales rows referencing unknown customers or products",
                dropped, total
            );
        }
        info!("{} sales rows passed the referential filter", clean.row_count());
        Ok(clean)
    }
}
