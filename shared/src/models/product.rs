//! Product catalog models and price resolution

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::PricingType;

/// A catalog product
///
/// `sell_price` is the default unit price; per-store and per-sub-agent
/// overrides live in the price lists. The effective price for a
/// transaction is always resolved through [`Product::unit_price_for`],
/// never stored anywhere else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub purchase_price: Decimal,
    pub sell_price: Decimal,
    pub unit: String,
    pub store_prices: Vec<StorePrice>,
    pub sub_agent_prices: Vec<SubAgentPrice>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-store unit price override
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorePrice {
    pub store_id: Uuid,
    pub sell_price: Decimal,
}

/// Per-sub-agent unit price override
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubAgentPrice {
    pub sub_agent_id: Uuid,
    pub sell_price: Decimal,
}

impl Product {
    /// Resolve the unit sell price for a transaction.
    ///
    /// Sub-agent pricing consults the sub-agent override list, store
    /// pricing consults the store override list; either falls back to
    /// the default `sell_price` when no override matches.
    pub fn unit_price_for(
        &self,
        pricing_type: PricingType,
        store_id: Uuid,
        sub_agent_id: Option<Uuid>,
    ) -> Decimal {
        match pricing_type {
            PricingType::SubAgent => sub_agent_id
                .and_then(|agent| {
                    self.sub_agent_prices
                        .iter()
                        .find(|p| p.sub_agent_id == agent)
                        .map(|p| p.sell_price)
                })
                .unwrap_or(self.sell_price),
            PricingType::Store => self
                .store_prices
                .iter()
                .find(|p| p.store_id == store_id)
                .map(|p| p.sell_price)
                .unwrap_or(self.sell_price),
        }
    }
}
