//! Validation utilities for the SGE Retail Management Platform

use rust_decimal::Decimal;

// ============================================================================
// Order Validations
// ============================================================================

/// Validate an order quantity (must be a positive integer)
pub fn validate_quantity(quantity: i32) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err("Quantity must be a positive integer");
    }
    Ok(())
}

/// Validate an accepted quantity against the ordered quantity
pub fn validate_accepted_quantity(accepted: i32, ordered: i32) -> Result<(), &'static str> {
    if accepted <= 0 {
        return Err("Accepted quantity must be a positive integer");
    }
    if accepted > ordered {
        return Err("Accepted quantity cannot exceed the ordered quantity");
    }
    Ok(())
}

/// Validate a price or cost (must be non-negative)
pub fn validate_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("Price cannot be negative");
    }
    Ok(())
}

// ============================================================================
// Account Validations
// ============================================================================

/// Validate username format (3-32 chars, lowercase alphanumeric plus . _ -)
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.len() < 3 {
        return Err("Username must be at least 3 characters");
    }
    if username.len() > 32 {
        return Err("Username must be at most 32 characters");
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-'))
    {
        return Err("Username must be lowercase alphanumeric with . _ - only");
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

/// Validate phone number format (7-15 digits, optional leading +)
pub fn validate_phone_number(phone: &str) -> Result<(), &'static str> {
    let rest = phone.strip_prefix('+').unwrap_or(phone);
    let digits: String = rest.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() < 7 || digits.len() > 15 {
        return Err("Phone number must contain 7-15 digits");
    }
    if !rest.chars().all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-')) {
        return Err("Phone number may contain digits, spaces and dashes only");
    }
    Ok(())
}

// ============================================================================
// Vehicle Validations
// ============================================================================

/// Validate a vehicle plate number (2-12 uppercase alphanumeric, dashes allowed)
pub fn validate_plate_number(plate: &str) -> Result<(), &'static str> {
    if plate.len() < 2 {
        return Err("Plate number must be at least 2 characters");
    }
    if plate.len() > 12 {
        return Err("Plate number must be at most 12 characters");
    }
    if !plate
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-')
    {
        return Err("Plate number must be uppercase alphanumeric");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Order Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_quantity_valid() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(500).is_ok());
    }

    #[test]
    fn test_validate_quantity_invalid() {
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
    }

    #[test]
    fn test_validate_accepted_quantity_valid() {
        assert!(validate_accepted_quantity(6, 10).is_ok());
        assert!(validate_accepted_quantity(10, 10).is_ok());
    }

    #[test]
    fn test_validate_accepted_quantity_invalid() {
        assert!(validate_accepted_quantity(12, 10).is_err()); // Exceeds ordered
        assert!(validate_accepted_quantity(0, 10).is_err());
        assert!(validate_accepted_quantity(-1, 10).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Decimal::ZERO).is_ok());
        assert!(validate_price(Decimal::from(100)).is_ok());
        assert!(validate_price(Decimal::from(-1)).is_err());
    }

    // ========================================================================
    // Account Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_username_valid() {
        assert!(validate_username("cashier1").is_ok());
        assert!(validate_username("mulu.kebede").is_ok());
        assert!(validate_username("store-admin_2").is_ok());
    }

    #[test]
    fn test_validate_username_invalid() {
        assert!(validate_username("ab").is_err()); // Too short
        assert!(validate_username("Admin").is_err()); // Uppercase
        assert!(validate_username("user name").is_err()); // Space
        assert!(validate_username(&"a".repeat(33)).is_err()); // Too long
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("password123").is_ok());
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password("short").is_err());
    }

    #[test]
    fn test_validate_phone_number_valid() {
        assert!(validate_phone_number("0912345678").is_ok());
        assert!(validate_phone_number("+251911223344").is_ok());
        assert!(validate_phone_number("091-234-5678").is_ok());
    }

    #[test]
    fn test_validate_phone_number_invalid() {
        assert!(validate_phone_number("12345").is_err()); // Too few digits
        assert!(validate_phone_number("1234567890123456").is_err()); // Too many
        assert!(validate_phone_number("phone").is_err());
    }

    // ========================================================================
    // Vehicle Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_plate_number_valid() {
        assert!(validate_plate_number("AA-12345").is_ok());
        assert!(validate_plate_number("B40211").is_ok());
    }

    #[test]
    fn test_validate_plate_number_invalid() {
        assert!(validate_plate_number("a").is_err()); // Too short
        assert!(validate_plate_number("aa-12345").is_err()); // Lowercase
        assert!(validate_plate_number("AA 12345").is_err()); // Space
        assert!(validate_plate_number("AAAAAAAAAAAAA").is_err()); // Too long
    }
}
