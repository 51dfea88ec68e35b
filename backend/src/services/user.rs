//! User account management service

use bcrypt::{hash, DEFAULT_COST};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::models::User;
use shared::types::UserRole;
use shared::validation::{validate_password, validate_phone_number, validate_username};

use crate::error::{AppError, AppResult};

/// User service for account administration
#[derive(Clone)]
pub struct UserService {
    db: PgPool,
}

/// Input for registering a new user account
#[derive(Debug, Deserialize)]
pub struct RegisterUserInput {
    pub username: String,
    pub password: String,
    pub phone_number: Option<String>,
    pub role: UserRole,
    pub store_id: Option<Uuid>,
}

/// Input for updating a user account
#[derive(Debug, Deserialize)]
pub struct UpdateUserInput {
    pub phone_number: Option<String>,
    pub role: Option<UserRole>,
    pub store_id: Option<Uuid>,
    pub password: Option<String>,
}

/// Row for user queries
#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    phone_number: Option<String>,
    role: String,
    store_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AppResult<User> {
        let role = UserRole::parse(&self.role)
            .ok_or_else(|| AppError::Internal(format!("Unknown role '{}'", self.role)))?;

        Ok(User {
            id: self.id,
            username: self.username,
            phone_number: self.phone_number,
            role,
            store_id: self.store_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl UserService {
    /// Create a new UserService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all user accounts
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, phone_number, role, store_id, created_at, updated_at
            FROM users
            ORDER BY username ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    /// Get a user account by ID
    pub async fn get_user(&self, user_id: Uuid) -> AppResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, phone_number, role, store_id, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        row.into_user()
    }

    /// Register a new user account
    pub async fn register_user(&self, input: RegisterUserInput) -> AppResult<User> {
        validate_username(&input.username).map_err(|msg| AppError::Validation {
            field: "username".to_string(),
            message: msg.to_string(),
        })?;

        validate_password(&input.password).map_err(|msg| AppError::Validation {
            field: "password".to_string(),
            message: msg.to_string(),
        })?;

        if let Some(phone) = &input.phone_number {
            validate_phone_number(phone).map_err(|msg| AppError::Validation {
                field: "phone_number".to_string(),
                message: msg.to_string(),
            })?;
        }

        // Cashiers are bound to a store
        if input.role == UserRole::Cashier && input.store_id.is_none() {
            return Err(AppError::Validation {
                field: "store_id".to_string(),
                message: "Cashier accounts must be assigned to a store".to_string(),
            });
        }

        // Validate store reference
        if let Some(store_id) = input.store_id {
            let store_exists =
                sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM stores WHERE id = $1)")
                    .bind(store_id)
                    .fetch_one(&self.db)
                    .await?;

            if !store_exists {
                return Err(AppError::NotFound("Store".to_string()));
            }
        }

        // Check if username already exists
        let existing =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE username = $1")
                .bind(&input.username)
                .fetch_one(&self.db)
                .await?;

        if existing > 0 {
            return Err(AppError::Conflict {
                resource: "username".to_string(),
                message: "Username already exists".to_string(),
            });
        }

        // Hash password
        let password_hash = hash(&input.password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, password_hash, phone_number, role, store_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, phone_number, role, store_id, created_at, updated_at
            "#,
        )
        .bind(&input.username)
        .bind(&password_hash)
        .bind(&input.phone_number)
        .bind(input.role.as_str())
        .bind(input.store_id)
        .fetch_one(&self.db)
        .await?;

        row.into_user()
    }

    /// Update a user account
    pub async fn update_user(&self, user_id: Uuid, input: UpdateUserInput) -> AppResult<User> {
        let existing = self.get_user(user_id).await?;

        if let Some(phone) = &input.phone_number {
            validate_phone_number(phone).map_err(|msg| AppError::Validation {
                field: "phone_number".to_string(),
                message: msg.to_string(),
            })?;
        }

        let role = input.role.unwrap_or(existing.role);
        let store_id = input.store_id.or(existing.store_id);
        let phone_number = input.phone_number.or(existing.phone_number);

        if role == UserRole::Cashier && store_id.is_none() {
            return Err(AppError::Validation {
                field: "store_id".to_string(),
                message: "Cashier accounts must be assigned to a store".to_string(),
            });
        }

        // Re-hash password when a new one is supplied
        let password_hash = match &input.password {
            Some(password) => {
                validate_password(password).map_err(|msg| AppError::Validation {
                    field: "password".to_string(),
                    message: msg.to_string(),
                })?;
                Some(
                    hash(password, DEFAULT_COST)
                        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?,
                )
            }
            None => None,
        };

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET phone_number = $1,
                role = $2,
                store_id = $3,
                password_hash = COALESCE($4, password_hash),
                updated_at = NOW()
            WHERE id = $5
            RETURNING id, username, phone_number, role, store_id, created_at, updated_at
            "#,
        )
        .bind(&phone_number)
        .bind(role.as_str())
        .bind(store_id)
        .bind(&password_hash)
        .bind(user_id)
        .fetch_one(&self.db)
        .await?;

        row.into_user()
    }

    /// Delete a user account
    pub async fn delete_user(&self, user_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User".to_string()));
        }

        Ok(())
    }
}
