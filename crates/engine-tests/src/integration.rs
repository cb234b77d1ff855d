#[cfg(test)]
mod tests {
    use crate::{
        Fixture, CUSTOMERS_CSV, PRODUCTS_CSV,
        utils::{column_i64, live_driver_enabled, live_settings},
    };
    use chrono::NaiveDate;
    use engine_core::connectors::{destination::Destination, memory::MemoryDestination};
    use engine_runtime::{
        error::Stage,
        execution::{executor::run, factory::create_destination},
    };
    use model::core::value::Value;
    use planner::schema::{CUSTOMERS, ORDER_ITEMS, ORDERS, PRODUCTS};
    use std::collections::HashSet;
    use tracing_test::traced_test;

    // Scenario: two customers, one product, two sales of which one references
    // an unknown product.
    // Expected Outcome: both customers and the product load; only the first
    // sale becomes order 1 with subtotal 3 * 2.50.
    #[traced_test]
    #[tokio::test]
    async fn tc01_end_to_end_scenario() {
        let fixture = Fixture::scenario();
        let store = MemoryDestination::new();

        let report = run(&fixture.input(), &store).await.unwrap();
        assert_eq!(report.customers.loaded, 2);
        assert_eq!(report.products.loaded, 1);
        assert_eq!(report.sales.read, 2);
        assert_eq!(report.sales_rejected, 1);

        assert_eq!(store.row_count(CUSTOMERS).await, 2);
        assert_eq!(store.row_count(PRODUCTS).await, 1);

        let orders = store.snapshot(ORDERS).await.unwrap();
        assert_eq!(orders.row_count(), 1);
        assert_eq!(orders.value(0, "order_id"), Some(&Value::Int(1)));
        assert_eq!(orders.value(0, "customer_id"), Some(&Value::Int(1)));
        assert_eq!(
            orders.value(0, "order_date"),
            Some(&Value::Date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()))
        );
        assert_eq!(orders.value(0, "status"), Some(&Value::from("Completed")));

        let items = store.snapshot(ORDER_ITEMS).await.unwrap();
        assert_eq!(items.row_count(), 1);
        assert_eq!(items.value(0, "order_id"), Some(&Value::Int(1)));
        assert_eq!(items.value(0, "product_id"), Some(&Value::Int(10)));
        assert_eq!(items.value(0, "quantity"), Some(&Value::Int(3)));
        assert_eq!(items.value(0, "subtotal"), Some(&Value::Float(7.5)));

        let customers = store.snapshot(CUSTOMERS).await.unwrap();
        assert_eq!(
            customers.column("customer_name").unwrap().values,
            vec![Value::from("Alice Smith"), Value::from("Bob Jones")]
        );
    }

    // Scenario: the sales file has no unit_price column.
    // Expected Outcome: the run fails in the transform stage and no
    // destination table is ever created.
    #[traced_test]
    #[tokio::test]
    async fn tc02_missing_unit_price_aborts_before_store() {
        let fixture = Fixture::new(
            CUSTOMERS_CSV,
            PRODUCTS_CSV,
            "customer_id,product_id,quantity\n1,10,3\n",
        );
        let store = MemoryDestination::new();

        let err = run(&fixture.input(), &store).await.unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Transform));
        assert!(err.to_string().contains("unit_price"));

        for table in [CUSTOMERS, PRODUCTS, ORDERS, ORDER_ITEMS] {
            assert!(store.snapshot(table).await.is_none(), "{table} was touched");
        }
    }

    // Scenario: the sales file has no product_id column.
    // Expected Outcome: the run fails in the transform stage before the
    // existing destination data is truncated.
    #[traced_test]
    #[tokio::test]
    async fn tc02b_missing_sales_key_aborts_before_store() {
        let fixture = Fixture::new(
            CUSTOMERS_CSV,
            PRODUCTS_CSV,
            "customer_id,quantity,unit_price\n1,3,2.50\n",
        );
        let store = MemoryDestination::new();

        let err = run(&fixture.input(), &store).await.unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Transform));
        assert!(err.to_string().contains("product_id"));

        for table in [CUSTOMERS, PRODUCTS, ORDERS, ORDER_ITEMS] {
            assert!(store.snapshot(table).await.is_none(), "{table} was touched");
        }

        // A previous good load survives the failed run
        run(&Fixture::scenario().input(), &store).await.unwrap();
        run(&fixture.input(), &store).await.unwrap_err();
        assert_eq!(store.row_count(CUSTOMERS).await, 2);
        assert_eq!(store.row_count(ORDERS).await, 1);
    }

    // Scenario: many sales with a mix of known, unknown and malformed keys.
    // Expected Outcome: every loaded order references a loaded customer and
    // product, and order ids are exactly 1..=N in sales file order.
    #[tokio::test]
    async fn tc03_referential_integrity_and_dense_ids() {
        let mut sales = String::from("customer_id,product_id,quantity,unit_price,status\n");
        for i in 0..60 {
            let customer = match i % 5 {
                0 => "7".to_string(),
                1 => "x".to_string(),
                _ => (i % 2 + 1).to_string(),
            };
            let product = if i % 7 == 0 { "11" } else { "10" };
            sales.push_str(&format!("{customer},{product},{},1.5,Completed\n", i + 1));
        }

        let fixture = Fixture::new(CUSTOMERS_CSV, PRODUCTS_CSV, &sales);
        let store = MemoryDestination::new();
        let report = run(&fixture.input(), &store).await.unwrap();

        let customers: HashSet<i64> = store.fetch_keys(CUSTOMERS, "customer_id").await.unwrap();
        let products: HashSet<i64> = store.fetch_keys(PRODUCTS, "product_id").await.unwrap();

        let orders = store.snapshot(ORDERS).await.unwrap();
        let items = store.snapshot(ORDER_ITEMS).await.unwrap();
        assert!(column_i64(&orders, "customer_id").iter().all(|c| customers.contains(c)));
        assert!(column_i64(&items, "product_id").iter().all(|p| products.contains(p)));

        let n = orders.row_count();
        assert_eq!(n, report.orders_loaded);
        assert_eq!(n + report.sales_rejected, 60);
        assert_eq!(column_i64(&orders, "order_id"), (1..=n as i64).collect::<Vec<_>>());

        // Quantities were written as 1..=60, so surviving rows must stay ascending
        let quantities = column_i64(&items, "quantity");
        assert!(quantities.windows(2).all(|w| w[0] < w[1]));
    }

    // Scenario: the same input is loaded twice into one store.
    // Expected Outcome: the second run replaces the first; ids restart at 1.
    #[tokio::test]
    async fn tc04_rerun_is_a_full_refresh() {
        let fixture = Fixture::scenario();
        let store = MemoryDestination::new();

        run(&fixture.input(), &store).await.unwrap();
        run(&fixture.input(), &store).await.unwrap();

        assert_eq!(store.row_count(CUSTOMERS).await, 2);
        assert_eq!(store.row_count(ORDERS).await, 1);
        let items = store.snapshot(ORDER_ITEMS).await.unwrap();
        assert_eq!(column_i64(&items, "order_item_id"), vec![1]);
    }

    // Scenario: the products file does not exist.
    // Expected Outcome: the run fails in the extract stage.
    #[tokio::test]
    async fn tc05_missing_input_file() {
        let fixture = Fixture::scenario();
        let mut input = fixture.input();
        input.products_file = "nope.csv".into();

        let err = run(&input, &MemoryDestination::new()).await.unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Extract));
    }

    // Scenario: header names with mixed case, padding and spaces.
    // Expected Outcome: they normalize to the expected names and load.
    #[tokio::test]
    async fn tc06_messy_headers() {
        let fixture = Fixture::new(
            " Customer ID ,First Name,Last Name\n1,Alice,Smith\n",
            "Product ID,Product Name,Category,Price,Stock Quantity\n10,Widget,Tools,2.50,5\n",
            "ID,Transaction ID,Customer ID,Product ID,Quantity,Unit Price,Transaction Date,Status\n\
             1,T1,1,10,2,2.50,01/15/2024,Completed\n",
        );
        let store = MemoryDestination::new();
        run(&fixture.input(), &store).await.unwrap();

        let orders = store.snapshot(ORDERS).await.unwrap();
        assert_eq!(
            orders.value(0, "order_date"),
            Some(&Value::Date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()))
        );
    }

    async fn live_round_trip(driver: &str) {
        if !live_driver_enabled(driver) {
            eprintln!("SALESLOAD_TEST_DRIVER is not {driver}; skipping");
            return;
        }
        let settings = live_settings(driver).expect("live database settings");
        let destination = create_destination(&settings, 1).await.unwrap();

        let fixture = Fixture::scenario();
        let report = run(&fixture.input(), &destination).await.unwrap();
        assert_eq!(report.orders_loaded, 1);

        let order_ids = destination.fetch_keys(ORDERS, "order_id").await.unwrap();
        assert_eq!(order_ids, HashSet::from([1]));
        let customers = destination.fetch_keys(CUSTOMERS, "customer_id").await.unwrap();
        assert_eq!(customers, HashSet::from([1, 2]));
        destination.close().await.unwrap();
    }

    // Requires a reachable MySQL configured through SALESLOAD_DB_* and
    // SALESLOAD_TEST_DRIVER=mysql.
    #[traced_test]
    #[tokio::test]
    #[ignore]
    async fn tc07_live_mysql() {
        live_round_trip("mysql").await;
    }

    // Requires a reachable PostgreSQL configured through SALESLOAD_DB_* and
    // SALESLOAD_TEST_DRIVER=postgres.
    #[traced_test]
    #[tokio::test]
    #[ignore]
    async fn tc08_live_postgres() {
        live_round_trip("postgres").await;
    }
}
