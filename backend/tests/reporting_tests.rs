//! Aggregation reducer tests
//!
//! Tests for the dashboard reducers:
//! - revenue, income and purchase totals
//! - per-date sales series in first-appearance order
//! - low-stock alerting at the fixed threshold
//! - top-seller ranking

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use shared::models::{
    line_total, InventoryItem, Product, PurchaseOrder, SellOrder, Store,
};
use shared::reporting::{
    income, low_stock_alerts, product_index, purchase_total, revenue, sales_by_date,
    top_selling_products, DailySales, LOW_STOCK_THRESHOLD, TOP_PRODUCT_LIMIT,
};
use shared::types::{OrderStatus, PricingType};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::from_str(s).unwrap()
}

// Helper to create a product with the given prices
fn product(name: &str, purchase_price: Decimal, sell_price: Decimal) -> Product {
    let now = Utc::now();
    Product {
        id: Uuid::new_v4(),
        name: name.to_string(),
        category: "beverage".to_string(),
        purchase_price,
        sell_price,
        unit: "crate".to_string(),
        store_prices: vec![],
        sub_agent_prices: vec![],
        created_at: now,
        updated_at: now,
    }
}

// Helper to create a sell order for a product
fn sell_order(product_id: Uuid, quantity: i32, unit_price: Decimal, sell_date: NaiveDate) -> SellOrder {
    SellOrder {
        id: Uuid::new_v4(),
        store_id: Uuid::new_v4(),
        product_id,
        quantity,
        unit_price,
        total_amount: line_total(unit_price, quantity),
        sell_date,
        customer_name: "Walk-in".to_string(),
        pricing_type: PricingType::Store,
        sub_agent_id: None,
        created_at: Utc::now(),
    }
}

// Helper to create an accepted-cost purchase order
fn purchase_order(total_cost: Decimal) -> PurchaseOrder {
    let now = Utc::now();
    PurchaseOrder {
        id: Uuid::new_v4(),
        store_id: Uuid::new_v4(),
        product_id: Uuid::new_v4(),
        quantity: 10,
        vehicle_id: Uuid::new_v4(),
        purchase_date: now.date_naive(),
        total_cost,
        status: OrderStatus::Pending,
        accepted_quantity: None,
        created_at: now,
        updated_at: now,
    }
}

// Helper to create a store with inventory
fn store(name: &str, inventory: Vec<InventoryItem>) -> Store {
    let now = Utc::now();
    Store {
        id: Uuid::new_v4(),
        name: name.to_string(),
        location: "Main Street".to_string(),
        manager: "Manager".to_string(),
        inventory,
        created_at: now,
        updated_at: now,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Revenue is the sum of line totals
    #[test]
    fn test_revenue_sums_totals() {
        let p = Uuid::new_v4();
        let d = date("2024-11-02");
        let orders = vec![
            sell_order(p, 2, dec("50.00"), d),  // 100
            sell_order(p, 5, dec("50.00"), d),  // 250
            sell_order(p, 1, dec("50.00"), d),  // 50
        ];

        assert_eq!(revenue(&orders), dec("400.00"));
    }

    /// Orders on the same date collapse into one series entry
    #[test]
    fn test_sales_by_date_groups_same_date() {
        let p = Uuid::new_v4();
        let d = date("2024-11-02");
        let orders = vec![
            sell_order(p, 2, dec("50.00"), d),  // 100
            sell_order(p, 5, dec("50.00"), d),  // 250
            sell_order(p, 1, dec("50.00"), d),  // 50
        ];

        let series = sales_by_date(&orders);
        assert_eq!(
            series,
            vec![DailySales {
                date: d,
                total: dec("400.00")
            }]
        );
    }

    /// Dates are emitted in order of first appearance
    #[test]
    fn test_sales_by_date_first_appearance_order() {
        let p = Uuid::new_v4();
        let later = date("2024-11-05");
        let earlier = date("2024-11-01");
        let orders = vec![
            sell_order(p, 1, dec("10.00"), later),
            sell_order(p, 1, dec("10.00"), earlier),
            sell_order(p, 1, dec("10.00"), later),
        ];

        let series = sales_by_date(&orders);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, later);
        assert_eq!(series[0].total, dec("20.00"));
        assert_eq!(series[1].date, earlier);
    }

    /// Income is the unit margin times quantity
    #[test]
    fn test_income_uses_unit_margin() {
        let p = product("Amber Crate", dec("60.00"), dec("100.00"));
        let products = vec![p];
        let index = product_index(&products);

        // Sold 3 at 80: margin (80 - 60) * 3 = 60
        let orders = vec![sell_order(products[0].id, 3, dec("80.00"), date("2024-11-02"))];

        assert_eq!(income(&orders, &index), dec("60.00"));
    }

    /// Orders whose product is gone are skipped by the income reducer
    #[test]
    fn test_income_skips_unmatched_products() {
        let p = product("Amber Crate", dec("60.00"), dec("100.00"));
        let products = vec![p];
        let index = product_index(&products);

        let orders = vec![
            sell_order(products[0].id, 3, dec("80.00"), date("2024-11-02")),
            sell_order(Uuid::new_v4(), 100, dec("80.00"), date("2024-11-02")),
        ];

        assert_eq!(income(&orders, &index), dec("60.00"));
    }

    /// Purchase total sums order costs
    #[test]
    fn test_purchase_total() {
        let orders = vec![
            purchase_order(dec("500.00")),
            purchase_order(dec("250.50")),
        ];

        assert_eq!(purchase_total(&orders), dec("750.50"));
    }

    /// Quantities below the threshold raise an alert, others do not
    #[test]
    fn test_low_stock_threshold() {
        let p = product("Amber Crate", dec("60.00"), dec("100.00"));
        let products = vec![p];
        let index = product_index(&products);

        let stores = vec![store(
            "Downtown",
            vec![
                InventoryItem {
                    product_id: products[0].id,
                    quantity: 50,
                },
            ],
        )];

        let alerts = low_stock_alerts(&stores, &index, LOW_STOCK_THRESHOLD);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].store_name, "Downtown");
        assert_eq!(alerts[0].product_name, "Amber Crate");
        assert_eq!(alerts[0].quantity, 50);

        let stocked = vec![store(
            "Downtown",
            vec![InventoryItem {
                product_id: products[0].id,
                quantity: 150,
            }],
        )];

        assert!(low_stock_alerts(&stocked, &index, LOW_STOCK_THRESHOLD).is_empty());
    }

    /// A negative quantity is a shortfall and still alerts
    #[test]
    fn test_low_stock_negative_quantity() {
        let p = product("Amber Crate", dec("60.00"), dec("100.00"));
        let products = vec![p];
        let index = product_index(&products);

        let stores = vec![store(
            "Downtown",
            vec![InventoryItem {
                product_id: products[0].id,
                quantity: -10,
            }],
        )];

        let alerts = low_stock_alerts(&stores, &index, LOW_STOCK_THRESHOLD);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].quantity, -10);
    }

    /// The threshold constant stays at 100
    #[test]
    fn test_threshold_constant() {
        assert_eq!(LOW_STOCK_THRESHOLD, 100);
    }

    /// Top sellers are ranked by quantity, capped at the limit
    #[test]
    fn test_top_selling_products_ranking() {
        let d = date("2024-11-02");
        let products: Vec<Product> = (0..7)
            .map(|i| product(&format!("Product {}", i), dec("10.00"), dec("20.00")))
            .collect();
        let index = product_index(&products);

        // Product i sells i + 1 units
        let orders: Vec<SellOrder> = products
            .iter()
            .enumerate()
            .map(|(i, p)| sell_order(p.id, i as i32 + 1, dec("20.00"), d))
            .collect();

        let top = top_selling_products(&orders, &index);
        assert_eq!(top.len(), TOP_PRODUCT_LIMIT);
        assert_eq!(top[0].product_name, "Product 6");
        assert_eq!(top[0].quantity_sold, 7);
        assert_eq!(top[4].product_name, "Product 2");
        assert_eq!(top[4].quantity_sold, 3);
    }

    /// Repeat orders for one product accumulate before ranking
    #[test]
    fn test_top_selling_products_accumulates() {
        let d = date("2024-11-02");
        let a = product("A", dec("10.00"), dec("20.00"));
        let b = product("B", dec("10.00"), dec("20.00"));
        let products = vec![a, b];
        let index = product_index(&products);

        let orders = vec![
            sell_order(products[0].id, 2, dec("20.00"), d),
            sell_order(products[1].id, 3, dec("20.00"), d),
            sell_order(products[0].id, 4, dec("20.00"), d),
        ];

        let top = top_selling_products(&orders, &index);
        assert_eq!(top[0].product_name, "A");
        assert_eq!(top[0].quantity_sold, 6);
        assert_eq!(top[1].product_name, "B");
        assert_eq!(top[1].quantity_sold, 3);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating unit prices
    fn price_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=100000i64).prop_map(|n| Decimal::new(n, 2))
    }

    /// Strategy for generating order quantities
    fn quantity_strategy() -> impl Strategy<Value = i32> {
        1i32..=1000
    }

    /// Strategy for generating sale dates in one month
    fn date_strategy() -> impl Strategy<Value = NaiveDate> {
        (1u32..=28).prop_map(|d| NaiveDate::from_ymd_opt(2024, 11, d).unwrap())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// The per-date series always sums to total revenue
        #[test]
        fn prop_series_sums_to_revenue(
            orders in prop::collection::vec(
                (quantity_strategy(), price_strategy(), date_strategy()),
                0..30
            )
        ) {
            let p = Uuid::new_v4();
            let orders: Vec<SellOrder> = orders
                .into_iter()
                .map(|(q, price, d)| sell_order(p, q, price, d))
                .collect();

            let series_total: Decimal = sales_by_date(&orders).iter().map(|s| s.total).sum();
            prop_assert_eq!(series_total, revenue(&orders));
        }

        /// Each date appears at most once in the series
        #[test]
        fn prop_series_dates_unique(
            orders in prop::collection::vec(
                (quantity_strategy(), price_strategy(), date_strategy()),
                0..30
            )
        ) {
            let p = Uuid::new_v4();
            let orders: Vec<SellOrder> = orders
                .into_iter()
                .map(|(q, price, d)| sell_order(p, q, price, d))
                .collect();

            let series = sales_by_date(&orders);
            for (i, a) in series.iter().enumerate() {
                for b in &series[i + 1..] {
                    prop_assert_ne!(a.date, b.date);
                }
            }
        }

        /// The ranking never exceeds the top-product limit
        #[test]
        fn prop_top_sellers_bounded(
            order_cases in prop::collection::vec(
                (0usize..10, quantity_strategy()),
                0..50
            )
        ) {
            let d = date("2024-11-02");
            let products: Vec<Product> = (0..10)
                .map(|i| product(&format!("P{}", i), dec("10.00"), dec("20.00")))
                .collect();
            let index = product_index(&products);

            let orders: Vec<SellOrder> = order_cases
                .into_iter()
                .map(|(idx, q)| sell_order(products[idx].id, q, dec("20.00"), d))
                .collect();

            let top = top_selling_products(&orders, &index);
            prop_assert!(top.len() <= TOP_PRODUCT_LIMIT);

            // Ranking is non-increasing
            for pair in top.windows(2) {
                prop_assert!(pair[0].quantity_sold >= pair[1].quantity_sold);
            }
        }

        /// With every product matched, income equals the margin sum
        #[test]
        fn prop_income_is_margin_sum(
            cases in prop::collection::vec(
                (quantity_strategy(), price_strategy(), price_strategy()),
                0..20
            )
        ) {
            let d = date("2024-11-02");
            let mut products = Vec::new();
            let mut orders = Vec::new();
            let mut expected = Decimal::ZERO;

            for (quantity, purchase_price, unit_price) in cases {
                let p = product("P", purchase_price, unit_price);
                orders.push(sell_order(p.id, quantity, unit_price, d));
                expected += (unit_price - purchase_price) * Decimal::from(quantity);
                products.push(p);
            }

            let index = product_index(&products);
            prop_assert_eq!(income(&orders, &index), expected);
        }

        /// Alerts fire exactly for quantities below the threshold
        #[test]
        fn prop_alert_threshold_exact(quantity in -1000i32..=1000) {
            let p = product("P", dec("10.00"), dec("20.00"));
            let products = vec![p];
            let index = product_index(&products);

            let stores = vec![store(
                "S",
                vec![InventoryItem { product_id: products[0].id, quantity }],
            )];

            let alerts = low_stock_alerts(&stores, &index, LOW_STOCK_THRESHOLD);
            if quantity < LOW_STOCK_THRESHOLD {
                prop_assert_eq!(alerts.len(), 1);
            } else {
                prop_assert!(alerts.is_empty());
            }
        }
    }
}
