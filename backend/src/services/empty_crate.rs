//! Empty-crate ledger service
//!
//! Tracks, per store and product, the signed balance of crate units:
//! a sell order sends crates out with the customer (negative delta),
//! an accepted purchase order brings crates back from the supplier
//! (positive delta).

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use uuid::Uuid;

use shared::models::{CrateEntry, EmptyCrateLedger};

use crate::error::{AppError, AppResult};

/// Empty-crate ledger service
#[derive(Clone)]
pub struct EmptyCrateService {
    db: PgPool,
}

/// Row for ledger queries
#[derive(Debug, FromRow)]
struct LedgerRow {
    store_id: Uuid,
    product_id: Uuid,
    quantity: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl EmptyCrateService {
    /// Create a new EmptyCrateService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Apply a signed adjustment to a store's per-product crate balance.
    ///
    /// A single upsert: the balance row is created lazily on the first
    /// adjustment touching the (store, product) pair, and concurrent
    /// adjustments accumulate instead of overwriting each other. Runs on
    /// the caller's executor so order writes and their ledger adjustment
    /// share one transaction.
    pub async fn adjust<'e, E>(
        executor: E,
        store_id: Uuid,
        product_id: Uuid,
        delta: i32,
    ) -> AppResult<()>
    where
        E: sqlx::PgExecutor<'e>,
    {
        sqlx::query(
            r#"
            INSERT INTO empty_crates (store_id, product_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (store_id, product_id)
            DO UPDATE SET quantity = empty_crates.quantity + EXCLUDED.quantity,
                          updated_at = NOW()
            "#,
        )
        .bind(store_id)
        .bind(product_id)
        .bind(delta)
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Get the ledger for a store
    ///
    /// A store has no ledger until its first transaction; reading one
    /// before that reports not-found.
    pub async fn get_ledger(&self, store_id: Uuid) -> AppResult<EmptyCrateLedger> {
        let rows = sqlx::query_as::<_, LedgerRow>(
            r#"
            SELECT store_id, product_id, quantity, created_at, updated_at
            FROM empty_crates
            WHERE store_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(store_id)
        .fetch_all(&self.db)
        .await?;

        if rows.is_empty() {
            return Err(AppError::NotFound("Empty crates".to_string()));
        }

        Ok(assemble_ledger(store_id, rows))
    }

    /// List the ledgers of every store that has one
    pub async fn list_ledgers(&self) -> AppResult<Vec<EmptyCrateLedger>> {
        let rows = sqlx::query_as::<_, LedgerRow>(
            r#"
            SELECT store_id, product_id, quantity, created_at, updated_at
            FROM empty_crates
            ORDER BY store_id, created_at ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<LedgerRow>> = HashMap::new();
        let mut order: Vec<Uuid> = Vec::new();
        for row in rows {
            if !grouped.contains_key(&row.store_id) {
                order.push(row.store_id);
            }
            grouped.entry(row.store_id).or_default().push(row);
        }

        Ok(order
            .into_iter()
            .map(|store_id| {
                let rows = grouped.remove(&store_id).unwrap_or_default();
                assemble_ledger(store_id, rows)
            })
            .collect())
    }
}

fn assemble_ledger(store_id: Uuid, rows: Vec<LedgerRow>) -> EmptyCrateLedger {
    let created_at = rows
        .iter()
        .map(|r| r.created_at)
        .min()
        .unwrap_or_else(Utc::now);
    let updated_at = rows
        .iter()
        .map(|r| r.updated_at)
        .max()
        .unwrap_or_else(Utc::now);

    EmptyCrateLedger {
        store_id,
        entries: rows
            .into_iter()
            .map(|r| CrateEntry {
                product_id: r.product_id,
                quantity: r.quantity,
            })
            .collect(),
        created_at,
        updated_at,
    }
}
