//! Authentication tests
//!
//! Tests for JWT claim round-trips, role parsing and account
//! validation rules.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::types::UserRole;
use shared::validation::{validate_password, validate_username};

/// Claims shape issued by the login path
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    role: String,
    store_id: Option<String>,
    exp: i64,
    iat: i64,
}

const TEST_SECRET: &str = "test-secret-key";

fn make_claims(role: UserRole, store_id: Option<Uuid>, ttl_seconds: i64) -> Claims {
    let now = chrono::Utc::now();
    Claims {
        sub: Uuid::new_v4().to_string(),
        role: role.as_str().to_string(),
        store_id: store_id.map(|id| id.to_string()),
        exp: (now + chrono::Duration::seconds(ttl_seconds)).timestamp(),
        iat: now.timestamp(),
    }
}

fn encode_token(claims: &Claims) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

fn decode_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(TEST_SECRET.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Claims survive an encode/decode round trip
    #[test]
    fn test_claims_round_trip() {
        let store = Uuid::new_v4();
        let claims = make_claims(UserRole::Cashier, Some(store), 3600);
        let sub = claims.sub.clone();

        let decoded = decode_token(&encode_token(&claims)).unwrap();

        assert_eq!(decoded.sub, sub);
        assert_eq!(decoded.role, "cashier");
        assert_eq!(decoded.store_id, Some(store.to_string()));
    }

    /// Admin claims carry no store binding
    #[test]
    fn test_admin_claims_without_store() {
        let claims = make_claims(UserRole::Admin, None, 3600);
        let decoded = decode_token(&encode_token(&claims)).unwrap();

        assert_eq!(decoded.role, "admin");
        assert_eq!(decoded.store_id, None);
    }

    /// Expired tokens are rejected
    #[test]
    fn test_expired_token_rejected() {
        let claims = make_claims(UserRole::Admin, None, -3600);
        assert!(decode_token(&encode_token(&claims)).is_err());
    }

    /// Tokens signed with another secret are rejected
    #[test]
    fn test_wrong_secret_rejected() {
        let claims = make_claims(UserRole::Admin, None, 3600);
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"other-secret"),
        )
        .unwrap();

        assert!(decode_token(&token).is_err());
    }

    /// Role strings round-trip through parsing
    #[test]
    fn test_role_round_trip() {
        for role in [UserRole::Admin, UserRole::Cashier] {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(UserRole::parse("manager"), None);
    }

    /// Username and password rules applied at registration
    #[test]
    fn test_account_validation_rules() {
        assert!(validate_username("cashier1").is_ok());
        assert!(validate_username("Admin").is_err());
        assert!(validate_password("longenough").is_ok());
        assert!(validate_password("short").is_err());
    }
}
