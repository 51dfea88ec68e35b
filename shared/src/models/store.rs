//! Store models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A retail store with its stocked goods
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub manager: String,
    pub inventory: Vec<InventoryItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A stocked (product, quantity) pair
///
/// Quantity may go negative; the alerting logic treats that as a
/// shortfall signal rather than an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InventoryItem {
    pub product_id: Uuid,
    pub quantity: i32,
}
