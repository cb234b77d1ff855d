use serde::Serialize;
use std::fmt;
use tracing::info;

/// Row counts for one input entity as it moves through a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EntityCounts {
    /// Rows read from the input file.
    pub read: usize,
    /// Rows left after coercion and deduplication.
    pub prepared: usize,
    /// Rows written to the destination.
    pub loaded: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub destination: String,
    pub customers: EntityCounts,
    pub products: EntityCounts,
    pub sales: EntityCounts,
    /// Sales rows dropped for referencing an unknown customer or product.
    pub sales_rejected: usize,
    pub orders_loaded: usize,
    pub order_items_loaded: usize,
}

impl LoadReport {
    pub fn log(&self) {
        info!("Load finished against {}", self.destination);
        info!("  customers:   {}", self.customers);
        info!("  products:    {}", self.products);
        info!("  sales:       {} ({} rejected)", self.sales, self.sales_rejected);
        info!("  orders:      {} loaded", self.orders_loaded);
        info!("  order_items: {} loaded", self.order_items_loaded);
    }
}

impl fmt::Display for EntityCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} read, {} prepared, {} loaded",
            self.read, self.prepared, self.loaded
        )
    }
}
