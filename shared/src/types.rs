//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Roles a user account can hold
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Full access across all stores
    Admin,
    /// Store-bound access: sell orders and purchase acceptance for one store
    Cashier,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Cashier => "cashier",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(UserRole::Admin),
            "cashier" => Some(UserRole::Cashier),
            _ => None,
        }
    }
}

/// Transaction-level flag selecting which price list applies to a sell order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PricingType {
    Store,
    SubAgent,
}

impl PricingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingType::Store => "store",
            PricingType::SubAgent => "sub_agent",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "store" => Some(PricingType::Store),
            "sub_agent" => Some(PricingType::SubAgent),
            _ => None,
        }
    }
}

/// Purchase order lifecycle states
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Accepted,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Accepted => "accepted",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            "accepted" => Some(OrderStatus::Accepted),
            _ => None,
        }
    }
}
