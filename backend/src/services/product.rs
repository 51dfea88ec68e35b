//! Product catalog service

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use uuid::Uuid;

use shared::models::{Product, StorePrice, SubAgentPrice};
use shared::validation::validate_price;

use crate::error::{AppError, AppResult};

/// Product service for catalog management and price list assembly
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// Input for creating a product
#[derive(Debug, Deserialize)]
pub struct CreateProductInput {
    pub name: String,
    pub category: String,
    pub purchase_price: Decimal,
    pub sell_price: Decimal,
    pub unit: String,
    pub store_prices: Option<Vec<StorePriceInput>>,
    pub sub_agent_prices: Option<Vec<SubAgentPriceInput>>,
}

/// Input for updating a product
///
/// Supplying a price list replaces the stored list wholesale.
#[derive(Debug, Deserialize)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub category: Option<String>,
    pub purchase_price: Option<Decimal>,
    pub sell_price: Option<Decimal>,
    pub unit: Option<String>,
    pub store_prices: Option<Vec<StorePriceInput>>,
    pub sub_agent_prices: Option<Vec<SubAgentPriceInput>>,
}

/// A per-store price override in product input
#[derive(Debug, Deserialize)]
pub struct StorePriceInput {
    pub store_id: Uuid,
    pub sell_price: Decimal,
}

/// A per-sub-agent price override in product input
#[derive(Debug, Deserialize)]
pub struct SubAgentPriceInput {
    pub sub_agent_id: Uuid,
    pub sell_price: Decimal,
}

/// Row for product queries
#[derive(Debug, FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    category: String,
    purchase_price: Decimal,
    sell_price: Decimal,
    unit: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct StorePriceRow {
    product_id: Uuid,
    store_id: Uuid,
    sell_price: Decimal,
}

#[derive(Debug, FromRow)]
struct SubAgentPriceRow {
    product_id: Uuid,
    sub_agent_id: Uuid,
    sell_price: Decimal,
}

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all products with their price lists
    pub async fn list_products(&self) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, category, purchase_price, sell_price, unit, created_at, updated_at
            FROM products
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let store_prices = sqlx::query_as::<_, StorePriceRow>(
            "SELECT product_id, store_id, sell_price FROM product_store_prices",
        )
        .fetch_all(&self.db)
        .await?;

        let agent_prices = sqlx::query_as::<_, SubAgentPriceRow>(
            "SELECT product_id, sub_agent_id, sell_price FROM sub_agent_prices",
        )
        .fetch_all(&self.db)
        .await?;

        let mut store_map: HashMap<Uuid, Vec<StorePrice>> = HashMap::new();
        for row in store_prices {
            store_map.entry(row.product_id).or_default().push(StorePrice {
                store_id: row.store_id,
                sell_price: row.sell_price,
            });
        }

        let mut agent_map: HashMap<Uuid, Vec<SubAgentPrice>> = HashMap::new();
        for row in agent_prices {
            agent_map
                .entry(row.product_id)
                .or_default()
                .push(SubAgentPrice {
                    sub_agent_id: row.sub_agent_id,
                    sell_price: row.sell_price,
                });
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let store_prices = store_map.remove(&row.id).unwrap_or_default();
                let sub_agent_prices = agent_map.remove(&row.id).unwrap_or_default();
                assemble_product(row, store_prices, sub_agent_prices)
            })
            .collect())
    }

    /// Get a product by ID with its price lists
    pub async fn get_product(&self, product_id: Uuid) -> AppResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, category, purchase_price, sell_price, unit, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        let store_prices = sqlx::query_as::<_, StorePriceRow>(
            "SELECT product_id, store_id, sell_price FROM product_store_prices WHERE product_id = $1",
        )
        .bind(product_id)
        .fetch_all(&self.db)
        .await?
        .into_iter()
        .map(|r| StorePrice {
            store_id: r.store_id,
            sell_price: r.sell_price,
        })
        .collect();

        let sub_agent_prices = sqlx::query_as::<_, SubAgentPriceRow>(
            "SELECT product_id, sub_agent_id, sell_price FROM sub_agent_prices WHERE product_id = $1",
        )
        .bind(product_id)
        .fetch_all(&self.db)
        .await?
        .into_iter()
        .map(|r| SubAgentPrice {
            sub_agent_id: r.sub_agent_id,
            sell_price: r.sell_price,
        })
        .collect();

        Ok(assemble_product(row, store_prices, sub_agent_prices))
    }

    /// Create a product with optional price lists
    pub async fn create_product(&self, input: CreateProductInput) -> AppResult<Product> {
        validate_prices(
            input.purchase_price,
            input.sell_price,
            input.store_prices.as_deref(),
            input.sub_agent_prices.as_deref(),
        )?;

        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (name, category, purchase_price, sell_price, unit)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, category, purchase_price, sell_price, unit, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.category)
        .bind(input.purchase_price)
        .bind(input.sell_price)
        .bind(&input.unit)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(prices) = &input.store_prices {
            for price in prices {
                sqlx::query(
                    "INSERT INTO product_store_prices (product_id, store_id, sell_price) VALUES ($1, $2, $3)",
                )
                .bind(row.id)
                .bind(price.store_id)
                .bind(price.sell_price)
                .execute(&mut *tx)
                .await?;
            }
        }

        if let Some(prices) = &input.sub_agent_prices {
            for price in prices {
                sqlx::query(
                    "INSERT INTO sub_agent_prices (sub_agent_id, product_id, sell_price) VALUES ($1, $2, $3)",
                )
                .bind(price.sub_agent_id)
                .bind(row.id)
                .bind(price.sell_price)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        self.get_product(row.id).await
    }

    /// Update a product; supplied price lists replace the stored ones
    pub async fn update_product(
        &self,
        product_id: Uuid,
        input: UpdateProductInput,
    ) -> AppResult<Product> {
        let existing = self.get_product(product_id).await?;

        let purchase_price = input.purchase_price.unwrap_or(existing.purchase_price);
        let sell_price = input.sell_price.unwrap_or(existing.sell_price);

        validate_prices(
            purchase_price,
            sell_price,
            input.store_prices.as_deref(),
            input.sub_agent_prices.as_deref(),
        )?;

        let name = input.name.unwrap_or(existing.name);
        let category = input.category.unwrap_or(existing.category);
        let unit = input.unit.unwrap_or(existing.unit);

        let mut tx = self.db.begin().await?;

        sqlx::query(
            r#"
            UPDATE products
            SET name = $1, category = $2, purchase_price = $3, sell_price = $4, unit = $5,
                updated_at = NOW()
            WHERE id = $6
            "#,
        )
        .bind(&name)
        .bind(&category)
        .bind(purchase_price)
        .bind(sell_price)
        .bind(&unit)
        .bind(product_id)
        .execute(&mut *tx)
        .await?;

        if let Some(prices) = &input.store_prices {
            sqlx::query("DELETE FROM product_store_prices WHERE product_id = $1")
                .bind(product_id)
                .execute(&mut *tx)
                .await?;

            for price in prices {
                sqlx::query(
                    "INSERT INTO product_store_prices (product_id, store_id, sell_price) VALUES ($1, $2, $3)",
                )
                .bind(product_id)
                .bind(price.store_id)
                .bind(price.sell_price)
                .execute(&mut *tx)
                .await?;
            }
        }

        if let Some(prices) = &input.sub_agent_prices {
            sqlx::query("DELETE FROM sub_agent_prices WHERE product_id = $1")
                .bind(product_id)
                .execute(&mut *tx)
                .await?;

            for price in prices {
                sqlx::query(
                    "INSERT INTO sub_agent_prices (sub_agent_id, product_id, sell_price) VALUES ($1, $2, $3)",
                )
                .bind(price.sub_agent_id)
                .bind(product_id)
                .bind(price.sell_price)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        self.get_product(product_id).await
    }

    /// Delete a product
    pub async fn delete_product(&self, product_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product".to_string()));
        }

        Ok(())
    }
}

fn assemble_product(
    row: ProductRow,
    store_prices: Vec<StorePrice>,
    sub_agent_prices: Vec<SubAgentPrice>,
) -> Product {
    Product {
        id: row.id,
        name: row.name,
        category: row.category,
        purchase_price: row.purchase_price,
        sell_price: row.sell_price,
        unit: row.unit,
        store_prices,
        sub_agent_prices,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn validate_prices(
    purchase_price: Decimal,
    sell_price: Decimal,
    store_prices: Option<&[StorePriceInput]>,
    sub_agent_prices: Option<&[SubAgentPriceInput]>,
) -> AppResult<()> {
    validate_price(purchase_price).map_err(|msg| AppError::Validation {
        field: "purchase_price".to_string(),
        message: msg.to_string(),
    })?;

    validate_price(sell_price).map_err(|msg| AppError::Validation {
        field: "sell_price".to_string(),
        message: msg.to_string(),
    })?;

    for price in store_prices.unwrap_or_default() {
        validate_price(price.sell_price).map_err(|msg| AppError::Validation {
            field: "store_prices".to_string(),
            message: msg.to_string(),
        })?;
    }

    for price in sub_agent_prices.unwrap_or_default() {
        validate_price(price.sell_price).map_err(|msg| AppError::Validation {
            field: "sub_agent_prices".to_string(),
            message: msg.to_string(),
        })?;
    }

    Ok(())
}
