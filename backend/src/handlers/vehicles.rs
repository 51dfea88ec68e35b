//! HTTP handlers for supplier vehicle endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::models::Vehicle;

use crate::error::AppResult;
use crate::middleware::{require_admin, CurrentUser};
use crate::services::vehicle::{CreateVehicleInput, UpdateVehicleInput, VehicleService};
use crate::AppState;

/// List all vehicles
pub async fn list_vehicles(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<Vehicle>>> {
    let service = VehicleService::new(state.db);
    let vehicles = service.list_vehicles().await?;
    Ok(Json(vehicles))
}

/// Get a vehicle by ID
pub async fn get_vehicle(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(vehicle_id): Path<Uuid>,
) -> AppResult<Json<Vehicle>> {
    let service = VehicleService::new(state.db);
    let vehicle = service.get_vehicle(vehicle_id).await?;
    Ok(Json(vehicle))
}

/// Register a vehicle
pub async fn create_vehicle(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateVehicleInput>,
) -> AppResult<Json<Vehicle>> {
    require_admin(&current_user.0)?;

    let service = VehicleService::new(state.db);
    let vehicle = service.create_vehicle(input).await?;
    Ok(Json(vehicle))
}

/// Update a vehicle
pub async fn update_vehicle(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(vehicle_id): Path<Uuid>,
    Json(input): Json<UpdateVehicleInput>,
) -> AppResult<Json<Vehicle>> {
    require_admin(&current_user.0)?;

    let service = VehicleService::new(state.db);
    let vehicle = service.update_vehicle(vehicle_id, input).await?;
    Ok(Json(vehicle))
}

/// Delete a vehicle
pub async fn delete_vehicle(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(vehicle_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    require_admin(&current_user.0)?;

    let service = VehicleService::new(state.db);
    service.delete_vehicle(vehicle_id).await?;
    Ok(Json(()))
}
