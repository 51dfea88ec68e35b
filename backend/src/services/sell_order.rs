//! Sell order service
//!
//! Records sales at a resolved unit price and sends the sold crates out
//! through the empty-crate ledger in the same transaction.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::models::{line_total, SellOrder};
use shared::types::PricingType;
use shared::validation::validate_quantity;

use crate::error::{AppError, AppResult};
use crate::services::{EmptyCrateService, ProductService};

/// Sell order service
#[derive(Clone)]
pub struct SellOrderService {
    db: PgPool,
}

/// Input for recording a sell order
///
/// The unit price is resolved server-side from the product's price
/// lists; clients never submit a price.
#[derive(Debug, Deserialize)]
pub struct CreateSellOrderInput {
    pub store_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub sell_date: Option<NaiveDate>,
    pub customer_name: String,
    pub pricing_type: PricingType,
    pub sub_agent_id: Option<Uuid>,
}

/// Row for sell order queries
#[derive(Debug, FromRow)]
struct SellOrderRow {
    id: Uuid,
    store_id: Uuid,
    product_id: Uuid,
    quantity: i32,
    unit_price: Decimal,
    total_amount: Decimal,
    sell_date: NaiveDate,
    customer_name: String,
    pricing_type: String,
    sub_agent_id: Option<Uuid>,
    created_at: DateTime<Utc>,
}

impl SellOrderRow {
    fn into_order(self) -> AppResult<SellOrder> {
        let pricing_type = PricingType::parse(&self.pricing_type).ok_or_else(|| {
            AppError::Internal(format!("Unknown pricing type '{}'", self.pricing_type))
        })?;

        Ok(SellOrder {
            id: self.id,
            store_id: self.store_id,
            product_id: self.product_id,
            quantity: self.quantity,
            unit_price: self.unit_price,
            total_amount: self.total_amount,
            sell_date: self.sell_date,
            customer_name: self.customer_name,
            pricing_type,
            sub_agent_id: self.sub_agent_id,
            created_at: self.created_at,
        })
    }
}

impl SellOrderService {
    /// Create a new SellOrderService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a sell order
    ///
    /// Resolves the unit price, computes the line total and inserts the
    /// order together with the ledger adjustment (minus the sold
    /// quantity) in one transaction. Nothing persists if any step fails.
    pub async fn create_order(&self, input: CreateSellOrderInput) -> AppResult<SellOrder> {
        validate_quantity(input.quantity).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: msg.to_string(),
        })?;

        if input.pricing_type == PricingType::SubAgent && input.sub_agent_id.is_none() {
            return Err(AppError::Validation {
                field: "sub_agent_id".to_string(),
                message: "Sub-agent pricing requires a sub-agent reference".to_string(),
            });
        }

        // Validate references
        let store_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM stores WHERE id = $1)")
                .bind(input.store_id)
                .fetch_one(&self.db)
                .await?;

        if !store_exists {
            return Err(AppError::NotFound("Store".to_string()));
        }

        if let Some(sub_agent_id) = input.sub_agent_id {
            let agent_exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM sub_agents WHERE id = $1)",
            )
            .bind(sub_agent_id)
            .fetch_one(&self.db)
            .await?;

            if !agent_exists {
                return Err(AppError::NotFound("Sub-agent".to_string()));
            }
        }

        // Resolve the unit price from the product's price lists
        let product = ProductService::new(self.db.clone())
            .get_product(input.product_id)
            .await?;

        let unit_price =
            product.unit_price_for(input.pricing_type, input.store_id, input.sub_agent_id);
        let total_amount = line_total(unit_price, input.quantity);
        let sell_date = input.sell_date.unwrap_or_else(|| Utc::now().date_naive());

        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, SellOrderRow>(
            r#"
            INSERT INTO sell_orders (
                store_id, product_id, quantity, unit_price, total_amount,
                sell_date, customer_name, pricing_type, sub_agent_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, store_id, product_id, quantity, unit_price, total_amount,
                      sell_date, customer_name, pricing_type, sub_agent_id, created_at
            "#,
        )
        .bind(input.store_id)
        .bind(input.product_id)
        .bind(input.quantity)
        .bind(unit_price)
        .bind(total_amount)
        .bind(sell_date)
        .bind(&input.customer_name)
        .bind(input.pricing_type.as_str())
        .bind(input.sub_agent_id)
        .fetch_one(&mut *tx)
        .await?;

        // Crates leave with the customer
        EmptyCrateService::adjust(&mut *tx, input.store_id, input.product_id, -input.quantity)
            .await?;

        tx.commit().await?;

        row.into_order()
    }

    /// List sell orders, optionally scoped to one store, newest sale first
    pub async fn list_orders(&self, store_scope: Option<Uuid>) -> AppResult<Vec<SellOrder>> {
        let rows = sqlx::query_as::<_, SellOrderRow>(
            r#"
            SELECT id, store_id, product_id, quantity, unit_price, total_amount,
                   sell_date, customer_name, pricing_type, sub_agent_id, created_at
            FROM sell_orders
            WHERE $1::uuid IS NULL OR store_id = $1
            ORDER BY sell_date DESC, created_at DESC
            "#,
        )
        .bind(store_scope)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(SellOrderRow::into_order).collect()
    }

    /// List a store's sell orders for one calendar date
    pub async fn list_orders_for_date(
        &self,
        store_id: Uuid,
        sell_date: NaiveDate,
    ) -> AppResult<Vec<SellOrder>> {
        let rows = sqlx::query_as::<_, SellOrderRow>(
            r#"
            SELECT id, store_id, product_id, quantity, unit_price, total_amount,
                   sell_date, customer_name, pricing_type, sub_agent_id, created_at
            FROM sell_orders
            WHERE store_id = $1 AND sell_date = $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(store_id)
        .bind(sell_date)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(SellOrderRow::into_order).collect()
    }

    /// Get a sell order by ID
    pub async fn get_order(&self, order_id: Uuid) -> AppResult<SellOrder> {
        let row = sqlx::query_as::<_, SellOrderRow>(
            r#"
            SELECT id, store_id, product_id, quantity, unit_price, total_amount,
                   sell_date, customer_name, pricing_type, sub_agent_id, created_at
            FROM sell_orders
            WHERE id = $1
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Sell order".to_string()))?;

        row.into_order()
    }
}
