//! Purchase order models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::OrderStatus;

/// An order of product quantity from a supplier vehicle to a store
///
/// Created as `Pending`; transitions to `Accepted` exactly once, at
/// which point `accepted_quantity` (at most the ordered quantity) is
/// recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: Uuid,
    pub store_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub vehicle_id: Uuid,
    pub purchase_date: NaiveDate,
    pub total_cost: Decimal,
    pub status: OrderStatus,
    pub accepted_quantity: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
