//! Sub-agent models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A third-party reseller with its own per-product pricing
///
/// `assigned_products` carries the same override rows that products
/// surface as `sub_agent_prices`; both views read from one price table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubAgent {
    pub id: Uuid,
    pub name: String,
    pub contact_info: Option<String>,
    pub assigned_stores: Vec<Uuid>,
    pub assigned_products: Vec<SubAgentProductPrice>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A per-product price override granted to a sub-agent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubAgentProductPrice {
    pub product_id: Uuid,
    pub sell_price: Decimal,
}
