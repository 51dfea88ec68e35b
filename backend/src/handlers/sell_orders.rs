//! HTTP handlers for sell order endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::models::SellOrder;

use crate::error::{AppError, AppResult};
use crate::middleware::{AuthUser, CurrentUser};
use crate::services::sell_order::{CreateSellOrderInput, SellOrderService};
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

/// List sell orders visible to the caller, newest sale first
pub async fn list_sell_orders(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<SellOrder>>> {
    let scope = store_scope(&current_user.0)?;
    let service = SellOrderService::new(state.db);
    let orders = service.list_orders(scope).await?;
    Ok(Json(orders))
}

/// Get a sell order by ID
pub async fn get_sell_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<SellOrder>> {
    let service = SellOrderService::new(state.db);
    let order = service.get_order(order_id).await?;

    if !current_user.0.can_access_store(order.store_id) {
        return Err(AppError::Forbidden(
            "Sell order belongs to another store".to_string(),
        ));
    }

    Ok(Json(order))
}

/// Record a sell order
pub async fn create_sell_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateSellOrderInput>,
) -> AppResult<Json<SellOrder>> {
    if !current_user.0.can_access_store(input.store_id) {
        return Err(AppError::Forbidden(
            "Sell orders can only be recorded for your own store".to_string(),
        ));
    }

    let service = SellOrderService::new(state.db);
    let order = service.create_order(input).await?;
    Ok(Json(order))
}
