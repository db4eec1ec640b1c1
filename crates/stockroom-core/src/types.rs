//! # Domain Types
//!
//! Core domain records for Stockroom.
//!
//! These are plain value holders: the store owns the durable data, and these
//! structs are transient read projections scoped to a single operation.
//!
//! ## Identity
//! Every entity carries an `id` (UUID v4 string), generated by the storage
//! layer at insert time. Names (`Product.name`, `Category.name`,
//! `User.username`) are the human-facing business identifiers and are
//! unique per table.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Role
// =============================================================================

/// Operator role. A single flag, not an access-control system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
pub enum Role {
    Admin,
    User,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::User => write!(f, "user"),
        }
    }
}

// =============================================================================
// Category
// =============================================================================

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Unique, non-empty display name.
    pub name: String,

    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Product
// =============================================================================

/// A product tracked in inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Unique display name.
    pub name: String,

    /// Units on hand. Never negative; only the sale transaction decrements.
    pub quantity: i64,

    /// Unit price in cents.
    pub price_cents: i64,

    /// Optional reference to an existing category.
    pub category_id: Option<String>,

    /// Set on insert and on every stock change.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Unit price as a [`Money`] value.
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// Input for creating a product. The id and timestamp are assigned by the
/// storage layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub quantity: i64,
    pub price_cents: i64,
    pub category_id: Option<String>,
}

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Product this sale drew stock from.
    pub product_id: String,

    /// Units sold. Always positive.
    pub quantity: i64,

    /// Unit price copied from the product at the moment of sale.
    pub unit_price_cents: i64,

    pub sold_at: DateTime<Utc>,
}

impl Sale {
    /// Unit price at the time of sale as a [`Money`] value.
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Total value of the sale.
    pub fn total(&self) -> Money {
        self.unit_price().times(self.quantity)
    }
}

// =============================================================================
// Sales Report
// =============================================================================

/// One line of the sales report: a sale joined to its product name.
///
/// Ordered by `sold_at` when produced by the service, so export adapters
/// can write rows as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SalesReportRow {
    pub sold_at: DateTime<Utc>,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
}

impl SalesReportRow {
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }
}

impl fmt::Display for SalesReportRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {}  x{}  @ {}",
            self.sold_at.format("%Y-%m-%d %H:%M:%S"),
            self.product_name,
            self.quantity,
            self.unit_price()
        )
    }
}

// =============================================================================
// User & Session
// =============================================================================

/// An operator account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Unique login name.
    pub username: String,

    /// Irreversible argon2 hash, never the password itself.
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub role: Role,

    pub created_at: DateTime<Utc>,
}

/// The authenticated operator for the current process.
///
/// No expiry and no lockout: one operator, one desktop, one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub role: Role,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sale_total() {
        let sale = Sale {
            id: "s1".to_string(),
            product_id: "p1".to_string(),
            quantity: 3,
            unit_price_cents: 500,
            sold_at: Utc::now(),
        };
        assert_eq!(sale.total().cents(), 1500);
    }

    #[test]
    fn test_report_row_display() {
        let row = SalesReportRow {
            sold_at: DateTime::parse_from_rfc3339("2026-08-01T10:30:00Z")
                .unwrap()
                .with_timezone(&Utc),
            product_name: "Widget".to_string(),
            quantity: 3,
            unit_price_cents: 500,
        };
        assert_eq!(row.to_string(), "2026-08-01 10:30:00  Widget  x3  @ 5.00");
    }

    #[test]
    fn test_session_role() {
        let session = Session {
            username: "admin".to_string(),
            role: Role::Admin,
        };
        assert!(session.is_admin());
        assert_eq!(session.role.to_string(), "admin");
    }
}
