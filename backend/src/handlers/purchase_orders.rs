//! HTTP handlers for purchase order endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::models::PurchaseOrder;

use crate::error::{AppError, AppResult};
use crate::middleware::{require_admin, AuthUser, CurrentUser};
use crate::services::purchase_order::{
    AcceptPurchaseOrderInput, CreatePurchaseOrderInput, PurchaseOrderService,
    UpdatePurchaseOrderInput,
};
use crate::AppState;

/// Store scope for order listings: admins see every store, other users
/// only their own
fn store_scope(user: &AuthUser) -> AppResult<Option<Uuid>> {
    if user.is_admin() {
        return Ok(None);
    }
    user.store_id
        .map(Some)
        .ok_or_else(|| AppError::Forbidden("No store assigned to this account".to_string()))
}

/// List purchase orders visible to the caller, newest first
pub async fn list_purchase_orders(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<PurchaseOrder>>> {
    let scope = store_scope(&current_user.0)?;
    let service = PurchaseOrderService::new(state.db);
    let orders = service.list_orders(scope).await?;
    Ok(Json(orders))
}

/// Get a purchase order by ID
pub async fn get_purchase_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<PurchaseOrder>> {
    let service = PurchaseOrderService::new(state.db);
    let order = service.get_order(order_id).await?;

    if !current_user.0.can_access_store(order.store_id) {
        return Err(AppError::Forbidden(
            "Purchase order belongs to another store".to_string(),
        ));
    }

    Ok(Json(order))
}

/// Create a purchase order
pub async fn create_purchase_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreatePurchaseOrderInput>,
) -> AppResult<Json<PurchaseOrder>> {
    require_admin(&current_user.0)?;

    let service = PurchaseOrderService::new(state.db);
    let order = service.create_order(input).await?;
    Ok(Json(order))
}

/// Edit a pending purchase order
pub async fn update_purchase_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(order_id): Path<Uuid>,
    Json(input): Json<UpdatePurchaseOrderInput>,
) -> AppResult<Json<PurchaseOrder>> {
    require_admin(&current_user.0)?;

    let service = PurchaseOrderService::new(state.db);
    let order = service.update_order(order_id, input).await?;
    Ok(Json(order))
}

/// Accept a purchase order with a received quantity
pub async fn accept_purchase_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(order_id): Path<Uuid>,
    Json(input): Json<AcceptPurchaseOrderInput>,
) -> AppResult<Json<PurchaseOrder>> {
    let service = PurchaseOrderService::new(state.db);

    let order = service.get_order(order_id).await?;
    if !current_user.0.can_access_store(order.store_id) {
        return Err(AppError::Forbidden(
            "Purchase order belongs to another store".to_string(),
        ));
    }

    let order = service
        .accept_order(order_id, input.accepted_quantity)
        .await?;
    Ok(Json(order))
}
