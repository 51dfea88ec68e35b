//! Aggregation reducers for dashboard and report views
//!
//! Plain functions over already-fetched collections, recomputed on
//! every request. They carry no SQL so the aggregation semantics stay
//! testable in isolation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::{Product, PurchaseOrder, SellOrder, Store};

/// Inventory entries below this quantity raise a stock alert
pub const LOW_STOCK_THRESHOLD: i32 = 100;

/// Number of products reported in the top-seller ranking
pub const TOP_PRODUCT_LIMIT: usize = 5;

/// Sales total for one calendar date
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DailySales {
    pub date: NaiveDate,
    pub total: Decimal,
}

/// A store inventory entry below the stock threshold
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LowStockAlert {
    pub store_name: String,
    pub product_name: String,
    pub quantity: i32,
}

/// A ranked top-selling product
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TopProduct {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity_sold: i64,
}

/// Index products by ID for aggregation lookups
pub fn product_index(products: &[Product]) -> HashMap<Uuid, &Product> {
    products.iter().map(|p| (p.id, p)).collect()
}

/// Total revenue: the sum of sell order line totals
pub fn revenue(orders: &[SellOrder]) -> Decimal {
    orders.iter().map(|o| o.total_amount).sum()
}

/// Gross income: unit margin times quantity, summed over all orders
/// whose product is still in the catalog
pub fn income(orders: &[SellOrder], products: &HashMap<Uuid, &Product>) -> Decimal {
    orders
        .iter()
        .filter_map(|o| {
            products
                .get(&o.product_id)
                .map(|p| (o.unit_price - p.purchase_price) * Decimal::from(o.quantity))
        })
        .sum()
}

/// Total purchase spend: the sum of purchase order costs
pub fn purchase_total(orders: &[PurchaseOrder]) -> Decimal {
    orders.iter().map(|o| o.total_cost).sum()
}

/// Group sell orders by calendar date, summing line totals
///
/// Dates are emitted in order of first appearance in the input, not
/// chronologically.
pub fn sales_by_date(orders: &[SellOrder]) -> Vec<DailySales> {
    let mut series: Vec<DailySales> = Vec::new();

    for order in orders {
        match series.iter_mut().find(|s| s.date == order.sell_date) {
            Some(entry) => entry.total += order.total_amount,
            None => series.push(DailySales {
                date: order.sell_date,
                total: order.total_amount,
            }),
        }
    }

    series
}

/// Collect every store inventory entry below the threshold
///
/// Entries whose product has left the catalog are skipped.
pub fn low_stock_alerts(
    stores: &[Store],
    products: &HashMap<Uuid, &Product>,
    threshold: i32,
) -> Vec<LowStockAlert> {
    let mut alerts = Vec::new();

    for store in stores {
        for item in &store.inventory {
            if item.quantity < threshold {
                if let Some(product) = products.get(&item.product_id) {
                    alerts.push(LowStockAlert {
                        store_name: store.name.clone(),
                        product_name: product.name.clone(),
                        quantity: item.quantity,
                    });
                }
            }
        }
    }

    alerts
}

/// Rank products by total quantity sold, descending, keeping the top
/// [`TOP_PRODUCT_LIMIT`]
///
/// Ties keep first-appearance order. Orders whose product has left the
/// catalog are skipped.
pub fn top_selling_products(
    orders: &[SellOrder],
    products: &HashMap<Uuid, &Product>,
) -> Vec<TopProduct> {
    let mut first_seen: Vec<Uuid> = Vec::new();
    let mut totals: HashMap<Uuid, i64> = HashMap::new();

    for order in orders {
        if !totals.contains_key(&order.product_id) {
            first_seen.push(order.product_id);
        }
        *totals.entry(order.product_id).or_insert(0) += i64::from(order.quantity);
    }

    let mut ranked: Vec<TopProduct> = first_seen
        .into_iter()
        .filter_map(|id| {
            products.get(&id).map(|p| TopProduct {
                product_id: id,
                product_name: p.name.clone(),
                quantity_sold: totals[&id],
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.quantity_sold.cmp(&a.quantity_sold));
    ranked.truncate(TOP_PRODUCT_LIMIT);
    ranked
}
