//! Sub-agent management service

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use uuid::Uuid;

use shared::models::{SubAgent, SubAgentProductPrice};
use shared::validation::validate_price;

use crate::error::{AppError, AppResult};

/// Sub-agent service for reseller records, store assignments and
/// per-product price overrides
#[derive(Clone)]
pub struct SubAgentService {
    db: PgPool,
}

/// Input for creating a sub-agent
#[derive(Debug, Deserialize)]
pub struct CreateSubAgentInput {
    pub name: String,
    pub contact_info: Option<String>,
    pub assigned_stores: Option<Vec<Uuid>>,
    pub assigned_products: Option<Vec<SubAgentProductInput>>,
}

/// Input for updating a sub-agent
///
/// Supplying a list replaces the stored list wholesale.
#[derive(Debug, Deserialize)]
pub struct UpdateSubAgentInput {
    pub name: Option<String>,
    pub contact_info: Option<String>,
    pub assigned_stores: Option<Vec<Uuid>>,
    pub assigned_products: Option<Vec<SubAgentProductInput>>,
}

/// A per-product price override in sub-agent input
#[derive(Debug, Deserialize)]
pub struct SubAgentProductInput {
    pub product_id: Uuid,
    pub sell_price: Decimal,
}

#[derive(Debug, FromRow)]
struct SubAgentRow {
    id: Uuid,
    name: String,
    contact_info: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct AssignedStoreRow {
    sub_agent_id: Uuid,
    store_id: Uuid,
}

#[derive(Debug, FromRow)]
struct AssignedProductRow {
    sub_agent_id: Uuid,
    product_id: Uuid,
    sell_price: Decimal,
}

impl SubAgentService {
    /// Create a new SubAgentService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all sub-agents with their assignments
    pub async fn list_sub_agents(&self) -> AppResult<Vec<SubAgent>> {
        let rows = sqlx::query_as::<_, SubAgentRow>(
            r#"
            SELECT id, name, contact_info, created_at, updated_at
            FROM sub_agents
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let stores = sqlx::query_as::<_, AssignedStoreRow>(
            "SELECT sub_agent_id, store_id FROM sub_agent_stores",
        )
        .fetch_all(&self.db)
        .await?;

        let products = sqlx::query_as::<_, AssignedProductRow>(
            "SELECT sub_agent_id, product_id, sell_price FROM sub_agent_prices",
        )
        .fetch_all(&self.db)
        .await?;

        let mut store_map: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for row in stores {
            store_map.entry(row.sub_agent_id).or_default().push(row.store_id);
        }

        let mut product_map: HashMap<Uuid, Vec<SubAgentProductPrice>> = HashMap::new();
        for row in products {
            product_map
                .entry(row.sub_agent_id)
                .or_default()
                .push(SubAgentProductPrice {
                    product_id: row.product_id,
                    sell_price: row.sell_price,
                });
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let assigned_stores = store_map.remove(&row.id).unwrap_or_default();
                let assigned_products = product_map.remove(&row.id).unwrap_or_default();
                assemble_sub_agent(row, assigned_stores, assigned_products)
            })
            .collect())
    }

    /// Get a sub-agent by ID with its assignments
    pub async fn get_sub_agent(&self, sub_agent_id: Uuid) -> AppResult<SubAgent> {
        let row = sqlx::query_as::<_, SubAgentRow>(
            r#"
            SELECT id, name, contact_info, created_at, updated_at
            FROM sub_agents
            WHERE id = $1
            "#,
        )
        .bind(sub_agent_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Sub-agent".to_string()))?;

        let assigned_stores = sqlx::query_as::<_, AssignedStoreRow>(
            "SELECT sub_agent_id, store_id FROM sub_agent_stores WHERE sub_agent_id = $1",
        )
        .bind(sub_agent_id)
        .fetch_all(&self.db)
        .await?
        .into_iter()
        .map(|r| r.store_id)
        .collect();

        let assigned_products = sqlx::query_as::<_, AssignedProductRow>(
            "SELECT sub_agent_id, product_id, sell_price FROM sub_agent_prices WHERE sub_agent_id = $1",
        )
        .bind(sub_agent_id)
        .fetch_all(&self.db)
        .await?
        .into_iter()
        .map(|r| SubAgentProductPrice {
            product_id: r.product_id,
            sell_price: r.sell_price,
        })
        .collect();

        Ok(assemble_sub_agent(row, assigned_stores, assigned_products))
    }

    /// Create a sub-agent with optional assignments
    pub async fn create_sub_agent(&self, input: CreateSubAgentInput) -> AppResult<SubAgent> {
        validate_product_prices(input.assigned_products.as_deref())?;

        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, SubAgentRow>(
            r#"
            INSERT INTO sub_agents (name, contact_info)
            VALUES ($1, $2)
            RETURNING id, name, contact_info, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.contact_info)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(stores) = &input.assigned_stores {
            for store_id in stores {
                sqlx::query(
                    "INSERT INTO sub_agent_stores (sub_agent_id, store_id) VALUES ($1, $2)",
                )
                .bind(row.id)
                .bind(store_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        if let Some(products) = &input.assigned_products {
            for product in products {
                sqlx::query(
                    "INSERT INTO sub_agent_prices (sub_agent_id, product_id, sell_price) VALUES ($1, $2, $3)",
                )
                .bind(row.id)
                .bind(product.product_id)
                .bind(product.sell_price)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        self.get_sub_agent(row.id).await
    }

    /// Update a sub-agent; supplied lists replace the stored ones
    pub async fn update_sub_agent(
        &self,
        sub_agent_id: Uuid,
        input: UpdateSubAgentInput,
    ) -> AppResult<SubAgent> {
        let existing = self.get_sub_agent(sub_agent_id).await?;

        validate_product_prices(input.assigned_products.as_deref())?;

        let name = input.name.unwrap_or(existing.name);
        let contact_info = input.contact_info.or(existing.contact_info);

        let mut tx = self.db.begin().await?;

        sqlx::query(
            r#"
            UPDATE sub_agents
            SET name = $1, contact_info = $2, updated_at = NOW()
            WHERE id = $3
            "#,
        )
        .bind(&name)
        .bind(&contact_info)
        .bind(sub_agent_id)
        .execute(&mut *tx)
        .await?;

        if let Some(stores) = &input.assigned_stores {
            sqlx::query("DELETE FROM sub_agent_stores WHERE sub_agent_id = $1")
                .bind(sub_agent_id)
                .execute(&mut *tx)
                .await?;

            for store_id in stores {
                sqlx::query(
                    "INSERT INTO sub_agent_stores (sub_agent_id, store_id) VALUES ($1, $2)",
                )
                .bind(sub_agent_id)
                .bind(store_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        if let Some(products) = &input.assigned_products {
            sqlx::query("DELETE FROM sub_agent_prices WHERE sub_agent_id = $1")
                .bind(sub_agent_id)
                .execute(&mut *tx)
                .await?;

            for product in products {
                sqlx::query(
                    "INSERT INTO sub_agent_prices (sub_agent_id, product_id, sell_price) VALUES ($1, $2, $3)",
                )
                .bind(sub_agent_id)
                .bind(product.product_id)
                .bind(product.sell_price)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        self.get_sub_agent(sub_agent_id).await
    }

    /// Delete a sub-agent
    pub async fn delete_sub_agent(&self, sub_agent_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM sub_agents WHERE id = $1")
            .bind(sub_agent_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Sub-agent".to_string()));
        }

        Ok(())
    }
}

fn assemble_sub_agent(
    row: SubAgentRow,
    assigned_stores: Vec<Uuid>,
    assigned_products: Vec<SubAgentProductPrice>,
) -> SubAgent {
    SubAgent {
        id: row.id,
        name: row.name,
        contact_info: row.contact_info,
        assigned_stores,
        assigned_products,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn validate_product_prices(products: Option<&[SubAgentProductInput]>) -> AppResult<()> {
    for product in products.unwrap_or_default() {
        validate_price(product.sell_price).map_err(|msg| AppError::Validation {
            field: "assigned_products".to_string(),
            message: msg.to_string(),
        })?;
    }
    Ok(())
}
