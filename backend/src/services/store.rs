//! Store management service

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use uuid::Uuid;

use shared::models::{InventoryItem, Store};

use crate::error::{AppError, AppResult};

/// Store service for store records and their embedded inventory
#[derive(Clone)]
pub struct StoreService {
    db: PgPool,
}

/// Input for creating a store
#[derive(Debug, Deserialize)]
pub struct CreateStoreInput {
    pub name: String,
    pub location: String,
    pub manager: String,
    pub inventory: Option<Vec<InventoryItemInput>>,
}

/// Input for updating a store
///
/// Supplying `inventory` replaces the stored list wholesale.
#[derive(Debug, Deserialize)]
pub struct UpdateStoreInput {
    pub name: Option<String>,
    pub location: Option<String>,
    pub manager: Option<String>,
    pub inventory: Option<Vec<InventoryItemInput>>,
}

/// A stocked (product, quantity) pair in store input
///
/// Negative quantities are accepted; the alerting logic treats them as
/// a shortfall signal.
#[derive(Debug, Deserialize)]
pub struct InventoryItemInput {
    pub product_id: Uuid,
    pub quantity: i32,
}

/// Row for store queries
#[derive(Debug, FromRow)]
struct StoreRow {
    id: Uuid,
    name: String,
    location: String,
    manager: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct InventoryRow {
    store_id: Uuid,
    product_id: Uuid,
    quantity: i32,
}

impl StoreService {
    /// Create a new StoreService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all stores with their inventory
    pub async fn list_stores(&self) -> AppResult<Vec<Store>> {
        let rows = sqlx::query_as::<_, StoreRow>(
            r#"
            SELECT id, name, location, manager, created_at, updated_at
            FROM stores
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let inventory = sqlx::query_as::<_, InventoryRow>(
            "SELECT store_id, product_id, quantity FROM store_inventory",
        )
        .fetch_all(&self.db)
        .await?;

        let mut inventory_map: HashMap<Uuid, Vec<InventoryItem>> = HashMap::new();
        for row in inventory {
            inventory_map
                .entry(row.store_id)
                .or_default()
                .push(InventoryItem {
                    product_id: row.product_id,
                    quantity: row.quantity,
                });
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let inventory = inventory_map.remove(&row.id).unwrap_or_default();
                assemble_store(row, inventory)
            })
            .collect())
    }

    /// Get a store by ID with its inventory
    pub async fn get_store(&self, store_id: Uuid) -> AppResult<Store> {
        let row = sqlx::query_as::<_, StoreRow>(
            r#"
            SELECT id, name, location, manager, created_at, updated_at
            FROM stores
            WHERE id = $1
            "#,
        )
        .bind(store_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Store".to_string()))?;

        let inventory = sqlx::query_as::<_, InventoryRow>(
            "SELECT store_id, product_id, quantity FROM store_inventory WHERE store_id = $1",
        )
        .bind(store_id)
        .fetch_all(&self.db)
        .await?
        .into_iter()
        .map(|r| InventoryItem {
            product_id: r.product_id,
            quantity: r.quantity,
        })
        .collect();

        Ok(assemble_store(row, inventory))
    }

    /// Create a store with optional initial inventory
    pub async fn create_store(&self, input: CreateStoreInput) -> AppResult<Store> {
        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, StoreRow>(
            r#"
            INSERT INTO stores (name, location, manager)
            VALUES ($1, $2, $3)
            RETURNING id, name, location, manager, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.location)
        .bind(&input.manager)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(items) = &input.inventory {
            for item in items {
                sqlx::query(
                    "INSERT INTO store_inventory (store_id, product_id, quantity) VALUES ($1, $2, $3)",
                )
                .bind(row.id)
                .bind(item.product_id)
                .bind(item.quantity)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        self.get_store(row.id).await
    }

    /// Update a store; a supplied inventory list replaces the stored one
    pub async fn update_store(&self, store_id: Uuid, input: UpdateStoreInput) -> AppResult<Store> {
        let existing = self.get_store(store_id).await?;

        let name = input.name.unwrap_or(existing.name);
        let location = input.location.unwrap_or(existing.location);
        let manager = input.manager.unwrap_or(existing.manager);

        let mut tx = self.db.begin().await?;

        sqlx::query(
            r#"
            UPDATE stores
            SET name = $1, location = $2, manager = $3, updated_at = NOW()
            WHERE id = $4
            "#,
        )
        .bind(&name)
        .bind(&location)
        .bind(&manager)
        .bind(store_id)
        .execute(&mut *tx)
        .await?;

        if let Some(items) = &input.inventory {
            sqlx::query("DELETE FROM store_inventory WHERE store_id = $1")
                .bind(store_id)
                .execute(&mut *tx)
                .await?;

            for item in items {
                sqlx::query(
                    "INSERT INTO store_inventory (store_id, product_id, quantity) VALUES ($1, $2, $3)",
                )
                .bind(store_id)
                .bind(item.product_id)
                .bind(item.quantity)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        self.get_store(store_id).await
    }

    /// Delete a store
    pub async fn delete_store(&self, store_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM stores WHERE id = $1")
            .bind(store_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Store".to_string()));
        }

        Ok(())
    }
}

fn assemble_store(row: StoreRow, inventory: Vec<InventoryItem>) -> Store {
    Store {
        id: row.id,
        name: row.name,
        location: row.location,
        manager: row.manager,
        inventory,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}
