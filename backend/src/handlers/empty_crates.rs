//! HTTP handlers for empty-crate ledger endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::models::EmptyCrateLedger;

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::EmptyCrateService;
use crate::AppState;

/// List the crate ledgers visible to the caller
pub async fn list_empty_crates(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<EmptyCrateLedger>>> {
    let service = EmptyCrateService::new(state.db);
    let ledgers = service.list_ledgers().await?;

    let visible = if current_user.0.is_admin() {
        ledgers
    } else {
        ledgers
            .into_iter()
            .filter(|l| current_user.0.can_access_store(l.store_id))
            .collect()
    };

    Ok(Json(visible))
}

/// Get a store's crate ledger
///
/// Reports not-found until the store's first transaction creates the
/// ledger.
pub async fn get_empty_crates(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(store_id): Path<Uuid>,
) -> AppResult<Json<EmptyCrateLedger>> {
    if !current_user.0.can_access_store(store_id) {
        return Err(AppError::Forbidden(
            "Crate ledger belongs to another store".to_string(),
        ));
    }

    let service = EmptyCrateService::new(state.db);
    let ledger = service.get_ledger(store_id).await?;
    Ok(Json(ledger))
}
