//! # Validation Rules
//!
//! Input validation applied before any storage access. Each function checks
//! one field and returns a typed [`ValidationError`] on failure, so the
//! service layer can reject bad input without touching the database.

use crate::error::ValidationError;
use crate::types::NewProduct;
use crate::{MAX_NAME_LEN, MAX_QUANTITY};

/// Validates a product or category name: non-empty after trimming, bounded
/// length.
pub fn validate_name(field: &str, name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    if trimmed.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

/// Validates an initial stock quantity (zero is allowed).
pub fn validate_stock_quantity(quantity: i64) -> Result<(), ValidationError> {
    if !(0..=MAX_QUANTITY).contains(&quantity) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: MAX_QUANTITY,
        });
    }
    Ok(())
}

/// Validates a sale quantity (must be strictly positive).
pub fn validate_sale_quantity(quantity: i64) -> Result<(), ValidationError> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    if quantity > MAX_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_QUANTITY,
        });
    }
    Ok(())
}

/// Validates a price in cents (negative prices never make sense here).
pub fn validate_price_cents(price_cents: i64) -> Result<(), ValidationError> {
    if price_cents < 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }
    Ok(())
}

/// Validates a credential field (username or password) is present.
pub fn validate_credential(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a complete product creation request.
pub fn validate_new_product(new: &NewProduct) -> Result<(), ValidationError> {
    validate_name("name", &new.name)?;
    validate_stock_quantity(new.quantity)?;
    validate_price_cents(new.price_cents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_rules() {
        assert!(validate_name("name", "Widget").is_ok());
        assert!(validate_name("name", "   ").is_err());
        assert!(validate_name("name", "").is_err());
        assert!(validate_name("name", &"x".repeat(MAX_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_stock_quantity_allows_zero() {
        assert!(validate_stock_quantity(0).is_ok());
        assert!(validate_stock_quantity(10).is_ok());
        assert!(validate_stock_quantity(-1).is_err());
        assert!(validate_stock_quantity(MAX_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_sale_quantity_must_be_positive() {
        assert!(validate_sale_quantity(1).is_ok());
        assert!(validate_sale_quantity(0).is_err());
        assert!(validate_sale_quantity(-3).is_err());
    }

    #[test]
    fn test_price_rules() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(599).is_ok());
        assert!(validate_price_cents(-1).is_err());
    }

    #[test]
    fn test_new_product_validation() {
        let new = NewProduct {
            name: "Widget".to_string(),
            quantity: 10,
            price_cents: 500,
            category_id: None,
        };
        assert!(validate_new_product(&new).is_ok());

        let bad = NewProduct {
            name: "".to_string(),
            ..new
        };
        assert!(validate_new_product(&bad).is_err());
    }
}
