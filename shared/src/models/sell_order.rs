//! Sell order models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::PricingType;

/// A recorded sale of product quantity from a store to a customer
///
/// Immutable once persisted; there is no update path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellOrder {
    pub id: Uuid,
    pub store_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_amount: Decimal,
    pub sell_date: NaiveDate,
    pub customer_name: String,
    pub pricing_type: PricingType,
    pub sub_agent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Line total for an order: unit price times quantity
pub fn line_total(unit_price: Decimal, quantity: i32) -> Decimal {
    unit_price * Decimal::from(quantity)
}
