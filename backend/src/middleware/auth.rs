//! Authentication middleware
//!
//! Validates bearer JWTs and exposes the caller's identity and role to
//! handlers.

use axum::{
    extract::Request,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use shared::types::UserRole;
use uuid::Uuid;

use crate::error::{AppError, ErrorDetail, ErrorResponse};

/// Authenticated user information extracted from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: UserRole,
    pub store_id: Option<Uuid>,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Check whether this user may act on behalf of the given store
    pub fn can_access_store(&self, store_id: Uuid) -> bool {
        self.is_admin() || self.store_id == Some(store_id)
    }
}

/// JWT claims structure
#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct Claims {
    sub: String,
    role: String,
    store_id: Option<String>,
    exp: i64,
    iat: i64,
}

/// Authentication middleware that validates JWT tokens and stores the
/// resulting [`AuthUser`] in the request extensions.
///
/// The secret is read from the environment so the middleware works
/// without router state.
pub async fn auth_middleware(mut request: Request, next: Next) -> Response {
    let token = match bearer_token(request.headers()) {
        Some(token) => token,
        None => return unauthorized_response("Missing or invalid Authorization header"),
    };

    let jwt_secret = std::env::var("SGE__JWT__SECRET")
        .or_else(|_| std::env::var("SGE_JWT_SECRET"))
        .unwrap_or_else(|_| "development-secret-key".to_string());

    let claims = match decode_jwt(token, &jwt_secret) {
        Ok(claims) => claims,
        Err(msg) => return unauthorized_response(&msg),
    };

    let auth_user = match auth_user_from_claims(claims) {
        Ok(user) => user,
        Err(msg) => return unauthorized_response(msg),
    };

    request.extensions_mut().insert(auth_user);

    next.run(request).await
}

/// Pull the token out of a `Bearer` Authorization header
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// Decode and validate JWT token
fn decode_jwt(token: &str, secret: &str) -> Result<Claims, String> {
    use jsonwebtoken::{decode, DecodingKey, Validation};

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("Invalid token: {}", e))
}

/// Build the request identity out of validated claims
fn auth_user_from_claims(claims: Claims) -> Result<AuthUser, &'static str> {
    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| "Invalid user ID in token")?;

    let role = UserRole::parse(&claims.role).ok_or("Invalid role in token")?;

    let store_id = match claims.store_id.as_deref() {
        Some(raw) => Some(Uuid::parse_str(raw).map_err(|_| "Invalid store ID in token")?),
        None => None,
    };

    Ok(AuthUser {
        user_id,
        role,
        store_id,
    })
}

/// Create unauthorized response
fn unauthorized_response(message: &str) -> Response {
    let error = ErrorResponse {
        error: ErrorDetail {
            code: "UNAUTHORIZED".to_string(),
            message: message.to_string(),
            field: None,
        },
    };

    (StatusCode::UNAUTHORIZED, Json(error)).into_response()
}

/// Extractor for authenticated user
/// Use this in handlers to get the current user
#[derive(Clone, Debug)]
pub struct CurrentUser(pub AuthUser);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| {
                let error = ErrorResponse {
                    error: ErrorDetail {
                        code: "UNAUTHORIZED".to_string(),
                        message: "Authentication required".to_string(),
                        field: None,
                    },
                };
                (StatusCode::UNAUTHORIZED, Json(error))
            })
    }
}

/// Admin guard for use in handlers
/// Returns an error if the user is not an admin
pub fn require_admin(user: &AuthUser) -> Result<(), AppError> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Administrator access required".to_string(),
        ))
    }
}
