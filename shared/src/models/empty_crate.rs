//! Empty-crate ledger models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-store running balance of crate units owed/returned
///
/// One ledger per store, created lazily on the first transaction that
/// touches the store. Entries hold at most one row per product. A sell
/// order adjusts the product balance by minus its quantity, an accepted
/// purchase order by plus its accepted quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmptyCrateLedger {
    pub store_id: Uuid,
    pub entries: Vec<CrateEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A signed per-product crate balance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CrateEntry {
    pub product_id: Uuid,
    pub quantity: i32,
}

/// Apply a signed adjustment to a ledger's entry list.
///
/// Adds the delta in place when the product already has an entry,
/// appends a new entry otherwise. The entry list keeps at most one
/// entry per product.
pub fn apply_adjustment(entries: &mut Vec<CrateEntry>, product_id: Uuid, delta: i32) {
    match entries.iter_mut().find(|e| e.product_id == product_id) {
        Some(entry) => entry.quantity += delta,
        None => entries.push(CrateEntry {
            product_id,
            quantity: delta,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjustment_appends_missing_entry() {
        let mut entries = Vec::new();
        let product = Uuid::new_v4();
        apply_adjustment(&mut entries, product, -5);
        assert_eq!(
            entries,
            vec![CrateEntry {
                product_id: product,
                quantity: -5
            }]
        );
    }

    #[test]
    fn adjustment_adds_in_place() {
        let product = Uuid::new_v4();
        let mut entries = vec![CrateEntry {
            product_id: product,
            quantity: -5,
        }];
        apply_adjustment(&mut entries, product, 6);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].quantity, 1);
    }

    #[test]
    fn adjustment_keeps_other_products_untouched() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut entries = vec![CrateEntry {
            product_id: a,
            quantity: 3,
        }];
        apply_adjustment(&mut entries, b, -2);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].quantity, 3);
        assert_eq!(entries[1].quantity, -2);
    }
}
