//! Destination tables written by the loader.

use crate::{
    query::{ast::create_table::CreateTable, builder::create_table::CreateTableBuilder},
    table_ref,
};
use model::core::data_type::DataType;

pub const CUSTOMERS: &str = "customers";
pub const PRODUCTS: &str = "products";
pub const ORDERS: &str = "orders";
pub const ORDER_ITEMS: &str = "order_items";

pub const CUSTOMER_COLUMNS: [&str; 2] = ["customer_id", "customer_name"];
pub const PRODUCT_COLUMNS: [&str; 5] = [
    "product_id",
    "product_name",
    "category",
    "price",
    "stock_quantity",
];
pub const ORDER_COLUMNS: [&str; 4] = ["order_id", "customer_id", "order_date", "status"];
/// `order_item_id` is assigned by the store and never written.
pub const ORDER_ITEM_COLUMNS: [&str; 5] = [
    "order_id",
    "product_id",
    "quantity",
    "unit_price",
    "subtotal",
];

pub fn customers() -> CreateTable {
    CreateTableBuilder::new(table_ref!(CUSTOMERS))
        .if_not_exists()
        .primary_key("customer_id", DataType::Int)
        .column("customer_name", DataType::String)
        .build()
}

pub fn products() -> CreateTable {
    CreateTableBuilder::new(table_ref!(PRODUCTS))
        .if_not_exists()
        .primary_key("product_id", DataType::Int)
        .column("product_name", DataType::String)
        .column("category", DataType::String)
        .column("price", DataType::Float)
        .column("stock_quantity", DataType::Int)
        .build()
}

pub fn orders() -> CreateTable {
    CreateTableBuilder::new(table_ref!(ORDERS))
        .if_not_exists()
        .primary_key("order_id", DataType::Int)
        .column("customer_id", DataType::Int)
        .column("order_date", DataType::Date)
        .column("status", DataType::String)
        .build()
}

pub fn order_items() -> CreateTable {
    CreateTableBuilder::new(table_ref!(ORDER_ITEMS))
        .if_not_exists()
        .identity("order_item_id", DataType::Int)
        .column("order_id", DataType::Int)
        .column("product_id", DataType::Int)
        .column("quantity", DataType::Int)
        .column("unit_price", DataType::Float)
        .column("subtotal", DataType::Float)
        .build()
}

/// All destination tables, parents before children.
pub fn destination_tables() -> Vec<CreateTable> {
    vec![customers(), products(), orders(), order_items()]
}

/// Truncation order: children before parents.
pub fn truncate_order() -> [&'static str; 4] {
    [ORDER_ITEMS, ORDERS, CUSTOMERS, PRODUCTS]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{
        dialect::{MySql, Postgres},
        renderer::render,
    };

    #[test]
    fn test_destination_ddl_postgres() {
        let ddl: Vec<String> = destination_tables()
            .iter()
            .map(|t| render(t, &Postgres).0)
            .collect();

        assert_eq!(
            ddl,
            vec![
                r#"CREATE TABLE IF NOT EXISTS "customers" ("customer_id" INTEGER PRIMARY KEY, "customer_name" TEXT);"#,
                r#"CREATE TABLE IF NOT EXISTS "products" ("product_id" INTEGER PRIMARY KEY, "product_name" TEXT, "category" TEXT, "price" FLOAT, "stock_quantity" INTEGER);"#,
                r#"CREATE TABLE IF NOT EXISTS "orders" ("order_id" INTEGER PRIMARY KEY, "customer_id" INTEGER, "order_date" DATE, "status" TEXT);"#,
                r#"CREATE TABLE IF NOT EXISTS "order_items" ("order_item_id" INTEGER GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY, "order_id" INTEGER, "product_id" INTEGER, "quantity" INTEGER, "unit_price" FLOAT, "subtotal" FLOAT);"#,
            ]
        );
    }

    #[test]
    fn test_order_items_ddl_mysql() {
        let (sql, _) = render(&order_items(), &MySql);
        assert!(sql.starts_with(
            "CREATE TABLE IF NOT EXISTS `order_items` (`order_item_id` INT AUTO_INCREMENT PRIMARY KEY,"
        ));
    }

    #[test]
    fn test_column_lists_match_ddl() {
        assert_eq!(customers().column_names(), CUSTOMER_COLUMNS);
        assert_eq!(products().column_names(), PRODUCT_COLUMNS);
        assert_eq!(orders().column_names(), ORDER_COLUMNS);
        assert_eq!(order_items().column_names()[1..], ORDER_ITEM_COLUMNS);
    }
}
