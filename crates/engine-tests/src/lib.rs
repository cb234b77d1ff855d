#![allow(dead_code)]

use engine_config::settings::input::InputSettings;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

pub mod integration;
pub mod utils;

pub const CUSTOMERS_CSV: &str = "\
customer_id,first_name,last_name,email,city,registration_date
1,Alice,Smith,alice@example.com,Pune,2023-05-01
2,Bob,Jones,bob@example.com,Delhi,not-a-date
";

pub const PRODUCTS_CSV: &str = "\
product_id,product_name,category,price,stock_quantity
10,Widget,Tools,2.50,100
";

pub const SALES_CSV: &str = "\
transaction_id,customer_id,product_id,quantity,unit_price,transaction_date,status
T001,1,10,3,2.50,2024-01-15,Completed
T002,2,999,1,2.50,2024-01-16,Pending
";

/// Input files written to a temporary data directory, removed on drop.
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new(customers: &str, products: &str, sales: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let fixture = Fixture { dir };
        fixture.write("customers_raw.csv", customers);
        fixture.write("products_raw.csv", products);
        fixture.write("sales_raw.csv", sales);
        fixture
    }

    /// The customer/product/sales scenario used across the end-to-end tests.
    pub fn scenario() -> Self {
        Self::new(CUSTOMERS_CSV, PRODUCTS_CSV, SALES_CSV)
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("write fixture file");
        path
    }

    pub fn input(&self) -> InputSettings {
        InputSettings {
            data_dir: self.dir.path().to_path_buf(),
            ..Default::default()
        }
    }
}
