//! Supplier vehicle management service

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::models::Vehicle;
use shared::validation::validate_plate_number;

use crate::error::{AppError, AppResult};

/// Vehicle service for supplier vehicle records
#[derive(Clone)]
pub struct VehicleService {
    db: PgPool,
}

/// Input for creating a vehicle
#[derive(Debug, Deserialize)]
pub struct CreateVehicleInput {
    pub driver_name: String,
    pub plate_number: String,
}

/// Input for updating a vehicle
#[derive(Debug, Deserialize)]
pub struct UpdateVehicleInput {
    pub driver_name: Option<String>,
    pub plate_number: Option<String>,
}

#[derive(Debug, FromRow)]
struct VehicleRow {
    id: Uuid,
    driver_name: String,
    plate_number: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl VehicleRow {
    fn into_vehicle(self) -> Vehicle {
        Vehicle {
            id: self.id,
            driver_name: self.driver_name,
            plate_number: self.plate_number,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl VehicleService {
    /// Create a new VehicleService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all vehicles
    pub async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        let rows = sqlx::query_as::<_, VehicleRow>(
            r#"
            SELECT id, driver_name, plate_number, created_at, updated_at
            FROM vehicles
            ORDER BY driver_name ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(VehicleRow::into_vehicle).collect())
    }

    /// Get a vehicle by ID
    pub async fn get_vehicle(&self, vehicle_id: Uuid) -> AppResult<Vehicle> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            SELECT id, driver_name, plate_number, created_at, updated_at
            FROM vehicles
            WHERE id = $1
            "#,
        )
        .bind(vehicle_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehicle".to_string()))?;

        Ok(row.into_vehicle())
    }

    /// Register a vehicle
    pub async fn create_vehicle(&self, input: CreateVehicleInput) -> AppResult<Vehicle> {
        validate_plate_number(&input.plate_number).map_err(|msg| AppError::Validation {
            field: "plate_number".to_string(),
            message: msg.to_string(),
        })?;

        // Check if plate number already exists
        let existing =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM vehicles WHERE plate_number = $1")
                .bind(&input.plate_number)
                .fetch_one(&self.db)
                .await?;

        if existing > 0 {
            return Err(AppError::Conflict {
                resource: "plate_number".to_string(),
                message: "A vehicle with this plate number already exists".to_string(),
            });
        }

        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            INSERT INTO vehicles (driver_name, plate_number)
            VALUES ($1, $2)
            RETURNING id, driver_name, plate_number, created_at, updated_at
            "#,
        )
        .bind(&input.driver_name)
        .bind(&input.plate_number)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into_vehicle())
    }

    /// Update a vehicle
    pub async fn update_vehicle(
        &self,
        vehicle_id: Uuid,
        input: UpdateVehicleInput,
    ) -> AppResult<Vehicle> {
        let existing = self.get_vehicle(vehicle_id).await?;

        let driver_name = input.driver_name.unwrap_or(existing.driver_name);
        let plate_number = input.plate_number.unwrap_or(existing.plate_number);

        validate_plate_number(&plate_number).map_err(|msg| AppError::Validation {
            field: "plate_number".to_string(),
            message: msg.to_string(),
        })?;

        // Plate numbers stay unique across vehicles
        let conflict = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM vehicles WHERE plate_number = $1 AND id <> $2",
        )
        .bind(&plate_number)
        .bind(vehicle_id)
        .fetch_one(&self.db)
        .await?;

        if conflict > 0 {
            return Err(AppError::Conflict {
                resource: "plate_number".to_string(),
                message: "A vehicle with this plate number already exists".to_string(),
            });
        }

        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            UPDATE vehicles
            SET driver_name = $1, plate_number = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING id, driver_name, plate_number, created_at, updated_at
            "#,
        )
        .bind(&driver_name)
        .bind(&plate_number)
        .bind(vehicle_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into_vehicle())
    }

    /// Delete a vehicle
    pub async fn delete_vehicle(&self, vehicle_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(vehicle_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Vehicle".to_string()));
        }

        Ok(())
    }
}
