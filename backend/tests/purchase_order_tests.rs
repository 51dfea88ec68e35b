//! Purchase order lifecycle tests
//!
//! Tests for the pending -> accepted transition rules and the accepted
//! quantity validation.

use proptest::prelude::*;

use shared::types::OrderStatus;
use shared::validation::{validate_accepted_quantity, validate_quantity};

/// Pure model of the accept transition: returns the new status, the
/// recorded accepted quantity and the resulting ledger delta.
fn simulate_accept(
    status: OrderStatus,
    ordered: i32,
    accepted: i32,
) -> Result<(OrderStatus, i32, i32), &'static str> {
    if status != OrderStatus::Pending {
        return Err("Purchase order has already been accepted");
    }

    validate_accepted_quantity(accepted, ordered)?;

    Ok((OrderStatus::Accepted, accepted, accepted))
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Ordered 10, accepted 6: status flips and the ledger gains +6
    #[test]
    fn test_accept_within_ordered_quantity() {
        let (status, accepted, ledger_delta) =
            simulate_accept(OrderStatus::Pending, 10, 6).unwrap();

        assert_eq!(status, OrderStatus::Accepted);
        assert_eq!(accepted, 6);
        assert_eq!(ledger_delta, 6);
    }

    /// Accepting 12 of an order of 10 is rejected with no state change
    #[test]
    fn test_accept_exceeding_ordered_quantity() {
        assert!(simulate_accept(OrderStatus::Pending, 10, 12).is_err());
    }

    /// Accepting the full ordered quantity is allowed
    #[test]
    fn test_accept_full_quantity() {
        let (status, accepted, _) = simulate_accept(OrderStatus::Pending, 10, 10).unwrap();
        assert_eq!(status, OrderStatus::Accepted);
        assert_eq!(accepted, 10);
    }

    /// Zero and negative accepted quantities are rejected
    #[test]
    fn test_accept_non_positive_quantity() {
        assert!(simulate_accept(OrderStatus::Pending, 10, 0).is_err());
        assert!(simulate_accept(OrderStatus::Pending, 10, -4).is_err());
    }

    /// The transition happens exactly once
    #[test]
    fn test_accept_only_once() {
        let (status, _, _) = simulate_accept(OrderStatus::Pending, 10, 6).unwrap();
        assert!(simulate_accept(status, 10, 4).is_err());
    }

    /// Order quantities must be positive integers
    #[test]
    fn test_order_quantity_validation() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-10).is_err());
    }

    /// Status strings round-trip through parsing
    #[test]
    fn test_status_round_trip() {
        for status in [OrderStatus::Pending, OrderStatus::Accepted] {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::parse("cancelled"), None);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Accepts succeed exactly when 0 < accepted <= ordered
        #[test]
        fn prop_accept_bounds(ordered in 1i32..=1000, accepted in -10i32..=2000) {
            let result = simulate_accept(OrderStatus::Pending, ordered, accepted);

            if accepted > 0 && accepted <= ordered {
                prop_assert!(result.is_ok());
            } else {
                prop_assert!(result.is_err());
            }
        }

        /// A successful accept records exactly the requested quantity
        #[test]
        fn prop_accept_records_requested(ordered in 1i32..=1000) {
            for accepted in [1, ordered / 2 + 1, ordered] {
                let (_, recorded, delta) =
                    simulate_accept(OrderStatus::Pending, ordered, accepted).unwrap();
                prop_assert_eq!(recorded, accepted);
                prop_assert_eq!(delta, accepted);
            }
        }

        /// Accepted orders reject any further accept
        #[test]
        fn prop_accepted_is_terminal(ordered in 1i32..=1000, accepted in 1i32..=1000) {
            prop_assume!(accepted <= ordered);
            let (status, _, _) = simulate_accept(OrderStatus::Pending, ordered, accepted).unwrap();
            prop_assert!(simulate_accept(status, ordered, 1).is_err());
        }
    }
}
