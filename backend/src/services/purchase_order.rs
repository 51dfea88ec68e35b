//! Purchase order service
//!
//! Purchase orders are created pending and accepted exactly once; the
//! acceptance brings the returned crates back through the empty-crate
//! ledger in the same transaction.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::models::{line_total, PurchaseOrder};
use shared::types::OrderStatus;
use shared::validation::{validate_accepted_quantity, validate_quantity};

use crate::error::{AppError, AppResult};
use crate::services::EmptyCrateService;

/// Purchase order service
#[derive(Clone)]
pub struct PurchaseOrderService {
    db: PgPool,
}

/// Input for creating a purchase order
///
/// The total cost is computed server-side from the product's purchase
/// price.
#[derive(Debug, Deserialize)]
pub struct CreatePurchaseOrderInput {
    pub store_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub vehicle_id: Uuid,
    pub purchase_date: Option<NaiveDate>,
}

/// Input for editing a pending purchase order
#[derive(Debug, Deserialize)]
pub struct UpdatePurchaseOrderInput {
    pub store_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
    pub quantity: Option<i32>,
    pub vehicle_id: Option<Uuid>,
    pub purchase_date: Option<NaiveDate>,
}

/// Input for accepting a purchase order
#[derive(Debug, Deserialize)]
pub struct AcceptPurchaseOrderInput {
    pub accepted_quantity: i32,
}

/// Row for purchase order queries
#[derive(Debug, FromRow)]
struct PurchaseOrderRow {
    id: Uuid,
    store_id: Uuid,
    product_id: Uuid,
    quantity: i32,
    vehicle_id: Uuid,
    purchase_date: NaiveDate,
    total_cost: Decimal,
    status: String,
    accepted_quantity: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PurchaseOrderRow {
    fn into_order(self) -> AppResult<PurchaseOrder> {
        let status = OrderStatus::parse(&self.status)
            .ok_or_else(|| AppError::Internal(format!("Unknown order status '{}'", self.status)))?;

        Ok(PurchaseOrder {
            id: self.id,
            store_id: self.store_id,
            product_id: self.product_id,
            quantity: self.quantity,
            vehicle_id: self.vehicle_id,
            purchase_date: self.purchase_date,
            total_cost: self.total_cost,
            status,
            accepted_quantity: self.accepted_quantity,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str = r#"id, store_id, product_id, quantity, vehicle_id, purchase_date,
total_cost, status, accepted_quantity, created_at, updated_at"#;

impl PurchaseOrderService {
    /// Create a new PurchaseOrderService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a purchase order in the pending state
    pub async fn create_order(&self, input: CreatePurchaseOrderInput) -> AppResult<PurchaseOrder> {
        validate_quantity(input.quantity).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: msg.to_string(),
        })?;

        self.check_references(input.store_id, input.vehicle_id).await?;

        let purchase_price = self.product_purchase_price(input.product_id).await?;
        let total_cost = line_total(purchase_price, input.quantity);
        let purchase_date = input.purchase_date.unwrap_or_else(|| Utc::now().date_naive());

        let row = sqlx::query_as::<_, PurchaseOrderRow>(&format!(
            r#"
            INSERT INTO purchase_orders (store_id, product_id, quantity, vehicle_id, purchase_date, total_cost)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {SELECT_COLUMNS}
            "#,
        ))
        .bind(input.store_id)
        .bind(input.product_id)
        .bind(input.quantity)
        .bind(input.vehicle_id)
        .bind(purchase_date)
        .bind(total_cost)
        .fetch_one(&self.db)
        .await?;

        row.into_order()
    }

    /// Edit a purchase order while it is still pending
    ///
    /// The total cost is recomputed from the (possibly changed) product
    /// and quantity. Accepted orders cannot be edited.
    pub async fn update_order(
        &self,
        order_id: Uuid,
        input: UpdatePurchaseOrderInput,
    ) -> AppResult<PurchaseOrder> {
        let existing = self.get_order(order_id).await?;

        if existing.status != OrderStatus::Pending {
            return Err(AppError::InvalidStateTransition(
                "Only pending purchase orders can be edited".to_string(),
            ));
        }

        let store_id = input.store_id.unwrap_or(existing.store_id);
        let product_id = input.product_id.unwrap_or(existing.product_id);
        let quantity = input.quantity.unwrap_or(existing.quantity);
        let vehicle_id = input.vehicle_id.unwrap_or(existing.vehicle_id);
        let purchase_date = input.purchase_date.unwrap_or(existing.purchase_date);

        validate_quantity(quantity).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: msg.to_string(),
        })?;

        self.check_references(store_id, vehicle_id).await?;

        let purchase_price = self.product_purchase_price(product_id).await?;
        let total_cost = line_total(purchase_price, quantity);

        let row = sqlx::query_as::<_, PurchaseOrderRow>(&format!(
            r#"
            UPDATE purchase_orders
            SET store_id = $1, product_id = $2, quantity = $3, vehicle_id = $4,
                purchase_date = $5, total_cost = $6, updated_at = NOW()
            WHERE id = $7
            RETURNING {SELECT_COLUMNS}
            "#,
        ))
        .bind(store_id)
        .bind(product_id)
        .bind(quantity)
        .bind(vehicle_id)
        .bind(purchase_date)
        .bind(total_cost)
        .bind(order_id)
        .fetch_one(&self.db)
        .await?;

        row.into_order()
    }

    /// Accept a purchase order, recording the received quantity
    ///
    /// The transition happens exactly once; the status guard in the
    /// update statement makes a concurrent double-accept lose. The
    /// ledger adjustment (plus the accepted quantity) shares the
    /// transaction, so a failed adjustment leaves the order pending.
    pub async fn accept_order(
        &self,
        order_id: Uuid,
        accepted_quantity: i32,
    ) -> AppResult<PurchaseOrder> {
        let existing = self.get_order(order_id).await?;

        if existing.status != OrderStatus::Pending {
            return Err(AppError::InvalidStateTransition(
                "Purchase order has already been accepted".to_string(),
            ));
        }

        validate_accepted_quantity(accepted_quantity, existing.quantity).map_err(|msg| {
            AppError::Validation {
                field: "accepted_quantity".to_string(),
                message: msg.to_string(),
            }
        })?;

        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, PurchaseOrderRow>(&format!(
            r#"
            UPDATE purchase_orders
            SET status = 'accepted', accepted_quantity = $1, updated_at = NOW()
            WHERE id = $2 AND status = 'pending'
            RETURNING {SELECT_COLUMNS}
            "#,
        ))
        .bind(accepted_quantity)
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::InvalidStateTransition(
                "Purchase order has already been accepted".to_string(),
            )
        })?;

        // Crates come back with the supplier
        EmptyCrateService::adjust(
            &mut *tx,
            existing.store_id,
            existing.product_id,
            accepted_quantity,
        )
        .await?;

        tx.commit().await?;

        row.into_order()
    }

    /// List purchase orders, optionally scoped to one store, newest first
    pub async fn list_orders(&self, store_scope: Option<Uuid>) -> AppResult<Vec<PurchaseOrder>> {
        let rows = sqlx::query_as::<_, PurchaseOrderRow>(&format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM purchase_orders
            WHERE $1::uuid IS NULL OR store_id = $1
            ORDER BY created_at DESC
            "#,
        ))
        .bind(store_scope)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(PurchaseOrderRow::into_order).collect()
    }

    /// Get a purchase order by ID
    pub async fn get_order(&self, order_id: Uuid) -> AppResult<PurchaseOrder> {
        let row = sqlx::query_as::<_, PurchaseOrderRow>(&format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM purchase_orders
            WHERE id = $1
            "#,
        ))
        .bind(order_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Purchase order".to_string()))?;

        row.into_order()
    }

    /// Validate store and vehicle references
    async fn check_references(&self, store_id: Uuid, vehicle_id: Uuid) -> AppResult<()> {
        let store_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM stores WHERE id = $1)")
                .bind(store_id)
                .fetch_one(&self.db)
                .await?;

        if !store_exists {
            return Err(AppError::NotFound("Store".to_string()));
        }

        let vehicle_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM vehicles WHERE id = $1)")
                .bind(vehicle_id)
                .fetch_one(&self.db)
                .await?;

        if !vehicle_exists {
            return Err(AppError::NotFound("Vehicle".to_string()));
        }

        Ok(())
    }

    /// Look up a product's purchase price
    async fn product_purchase_price(&self, product_id: Uuid) -> AppResult<Decimal> {
        sqlx::query_scalar::<_, Decimal>("SELECT purchase_price FROM products WHERE id = $1")
            .bind(product_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Product".to_string()))
    }
}
