//! Price resolution tests
//!
//! Tests for the price resolver and line total calculator:
//! - store overrides win over the default sell price
//! - missing overrides fall back to the default
//! - line totals are linear in quantity

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use shared::models::{line_total, Product, StorePrice, SubAgentPrice};
use shared::types::PricingType;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// Helper to create a product with the given price lists
fn product(
    default_price: Decimal,
    store_prices: Vec<StorePrice>,
    sub_agent_prices: Vec<SubAgentPrice>,
) -> Product {
    let now = Utc::now();
    Product {
        id: Uuid::new_v4(),
        name: "Amber Crate".to_string(),
        category: "beverage".to_string(),
        purchase_price: dec("60.00"),
        sell_price: default_price,
        unit: "crate".to_string(),
        store_prices,
        sub_agent_prices,
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

    /// A store-price override wins over the default
    #[test]
    fn test_store_override_wins() {
        let store = Uuid::new_v4();
        let p = product(
            dec("100.00"),
            vec![StorePrice {
                store_id: store,
                sell_price: dec("80.00"),
            }],
            vec![],
        );

        let unit = p.unit_price_for(PricingType::Store, store, None);
        assert_eq!(unit, dec("80.00"));
        assert_eq!(line_total(unit, 3), dec("240.00"));
    }

    /// No override for the store falls back to the default
    #[test]
    fn test_store_fallback_to_default() {
        let store = Uuid::new_v4();
        let other_store = Uuid::new_v4();
        let p = product(
            dec("100.00"),
            vec![StorePrice {
                store_id: other_store,
                sell_price: dec("80.00"),
            }],
            vec![],
        );

        assert_eq!(p.unit_price_for(PricingType::Store, store, None), dec("100.00"));
    }

    /// A sub-agent override wins over the default
    #[test]
    fn test_sub_agent_override_wins() {
        let store = Uuid::new_v4();
        let agent = Uuid::new_v4();
        let p = product(
            dec("100.00"),
            vec![],
            vec![SubAgentPrice {
                sub_agent_id: agent,
                sell_price: dec("75.00"),
            }],
        );

        assert_eq!(
            p.unit_price_for(PricingType::SubAgent, store, Some(agent)),
            dec("75.00")
        );
    }

    /// A sub-agent without an override falls back to the default
    #[test]
    fn test_sub_agent_fallback_to_default() {
        let store = Uuid::new_v4();
        let agent = Uuid::new_v4();
        let other_agent = Uuid::new_v4();
        let p = product(
            dec("100.00"),
            vec![],
            vec![SubAgentPrice {
                sub_agent_id: other_agent,
                sell_price: dec("75.00"),
            }],
        );

        assert_eq!(
            p.unit_price_for(PricingType::SubAgent, store, Some(agent)),
            dec("100.00")
        );
    }

    /// Sub-agent pricing without an agent reference uses the default
    #[test]
    fn test_sub_agent_pricing_without_agent() {
        let store = Uuid::new_v4();
        let p = product(
            dec("100.00"),
            vec![],
            vec![SubAgentPrice {
                sub_agent_id: Uuid::new_v4(),
                sell_price: dec("75.00"),
            }],
        );

        assert_eq!(
            p.unit_price_for(PricingType::SubAgent, store, None),
            dec("100.00")
        );
    }

    /// Sub-agent pricing ignores store overrides
    #[test]
    fn test_sub_agent_pricing_ignores_store_list() {
        let store = Uuid::new_v4();
        let agent = Uuid::new_v4();
        let p = product(
            dec("100.00"),
            vec![StorePrice {
                store_id: store,
                sell_price: dec("80.00"),
            }],
            vec![],
        );

        assert_eq!(
            p.unit_price_for(PricingType::SubAgent, store, Some(agent)),
            dec("100.00")
        );
    }

    /// Line total for the basic scenario
    #[test]
    fn test_line_total() {
        assert_eq!(line_total(dec("80.00"), 3), dec("240.00"));
        assert_eq!(line_total(dec("12.50"), 4), dec("50.00"));
    }

    /// Line total with quantity one is the unit price
    #[test]
    fn test_line_total_single_unit() {
        assert_eq!(line_total(dec("99.99"), 1), dec("99.99"));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating valid unit prices
    fn price_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=100000i64).prop_map(|n| Decimal::new(n, 2)) // 0.00 to 1000.00
    }

    /// Strategy for generating order quantities
    fn quantity_strategy() -> impl Strategy<Value = i32> {
        1i32..=10000
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Line totals are linear in quantity
        #[test]
        fn prop_line_total_linear(
            price in price_strategy(),
            q1 in quantity_strategy(),
            q2 in quantity_strategy()
        ) {
            prop_assert_eq!(
                line_total(price, q1 + q2),
                line_total(price, q1) + line_total(price, q2)
            );
        }

        /// The resolved price is always the override or the default
        #[test]
        fn prop_resolver_totality(
            default_price in price_strategy(),
            override_price in price_strategy(),
            has_override in any::<bool>()
        ) {
            let store = Uuid::new_v4();
            let store_prices = if has_override {
                vec![StorePrice { store_id: store, sell_price: override_price }]
            } else {
                vec![]
            };
            let p = product(default_price, store_prices, vec![]);

            let resolved = p.unit_price_for(PricingType::Store, store, None);
            if has_override {
                prop_assert_eq!(resolved, override_price);
            } else {
                prop_assert_eq!(resolved, default_price);
            }
        }

        /// Store resolution never consults the sub-agent list
        #[test]
        fn prop_store_resolution_ignores_agents(
            default_price in price_strategy(),
            agent_price in price_strategy()
        ) {
            let store = Uuid::new_v4();
            let p = product(
                default_price,
                vec![],
                vec![SubAgentPrice { sub_agent_id: Uuid::new_v4(), sell_price: agent_price }],
            );

            prop_assert_eq!(p.unit_price_for(PricingType::Store, store, None), default_price);
        }

        /// Line totals of non-negative prices stay non-negative
        #[test]
        fn prop_line_total_non_negative(
            price in price_strategy(),
            quantity in quantity_strategy()
        ) {
            prop_assert!(line_total(price, quantity) >= Decimal::ZERO);
        }
    }
}
