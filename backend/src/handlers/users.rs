//! HTTP handlers for user management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::models::User;

use crate::error::AppResult;
use crate::middleware::{require_admin, CurrentUser};
use crate::services::user::{RegisterUserInput, UpdateUserInput, UserService};
use crate::AppState;

/// List all user accounts
pub async fn list_users(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<User>>> {
    require_admin(&current_user.0)?;

    let service = UserService::new(state.db);
    let users = service.list_users().await?;
    Ok(Json(users))
}

/// Register a new user account
pub async fn register_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<RegisterUserInput>,
) -> AppResult<(StatusCode, Json<User>)> {
    require_admin(&current_user.0)?;

    let service = UserService::new(state.db);
    let user = service.register_user(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Update a user account
pub async fn update_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(user_id): Path<Uuid>,
    Json(input): Json<UpdateUserInput>,
) -> AppResult<Json<User>> {
    require_admin(&current_user.0)?;

    let service = UserService::new(state.db);
    let user = service.update_user(user_id, input).await?;
    Ok(Json(user))
}

/// Delete a user account
pub async fn delete_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    require_admin(&current_user.0)?;

    let service = UserService::new(state.db);
    service.delete_user(user_id).await?;
    Ok(Json(()))
}
