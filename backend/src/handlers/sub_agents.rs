//! HTTP handlers for sub-agent management endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::models::SubAgent;

use crate::error::AppResult;
use crate::middleware::{require_admin, CurrentUser};
use crate::services::sub_agent::{CreateSubAgentInput, SubAgentService, UpdateSubAgentInput};
use crate::AppState;

/// List all sub-agents
pub async fn list_sub_agents(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<SubAgent>>> {
    let service = SubAgentService::new(state.db);
    let sub_agents = service.list_sub_agents().await?;
    Ok(Json(sub_agents))
}

/// Get a sub-agent by ID
pub async fn get_sub_agent(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(sub_agent_id): Path<Uuid>,
) -> AppResult<Json<SubAgent>> {
    let service = SubAgentService::new(state.db);
    let sub_agent = service.get_sub_agent(sub_agent_id).await?;
    Ok(Json(sub_agent))
}

/// Create a sub-agent
pub async fn create_sub_agent(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateSubAgentInput>,
) -> AppResult<Json<SubAgent>> {
    require_admin(&current_user.0)?;

    let service = SubAgentService::new(state.db);
    let sub_agent = service.create_sub_agent(input).await?;
    Ok(Json(sub_agent))
}

/// Update a sub-agent
pub async fn update_sub_agent(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(sub_agent_id): Path<Uuid>,
    Json(input): Json<UpdateSubAgentInput>,
) -> AppResult<Json<SubAgent>> {
    require_admin(&current_user.0)?;

    let service = SubAgentService::new(state.db);
    let sub_agent = service.update_sub_agent(sub_agent_id, input).await?;
    Ok(Json(sub_agent))
}

/// Delete a sub-agent
pub async fn delete_sub_agent(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(sub_agent_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    require_admin(&current_user.0)?;

    let service = SubAgentService::new(state.db);
    service.delete_sub_agent(sub_agent_id).await?;
    Ok(Json(()))
}
