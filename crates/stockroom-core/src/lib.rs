//! # stockroom-core: Pure Domain Logic for Stockroom
//!
//! This crate contains the domain model of the Stockroom inventory manager
//! as pure types and functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! apps/cli  (command line front end)
//!     │
//!     ▼
//! stockroom-db  (SQLite storage, inventory service, backup)
//!     │
//!     ▼
//! stockroom-core  (THIS CRATE: types • money • validation • errors)
//!
//! NO I/O • NO DATABASE • NO FILE SYSTEM • PURE FUNCTIONS
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain records (Product, Category, Sale, User, Session)
//! - [`money`] - Money type with integer-cents arithmetic (no floating point!)
//! - [`validation`] - Input validation rules
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: deterministic, same input = same output
//! 2. **Integer Money**: all monetary values are cents (i64), never floats
//! 3. **Explicit Errors**: typed error enums, never strings or panics

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// Re-exports so callers can `use stockroom_core::Product` directly.
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

/// Username of the account seeded on first initialization.
///
/// The store guarantees exactly one row with this username exists after
/// startup, regardless of how many times initialization runs.
pub const BOOTSTRAP_ADMIN_USERNAME: &str = "admin";

/// Maximum length accepted for product and category names.
pub const MAX_NAME_LEN: usize = 120;

/// Maximum quantity accepted for a single sale or stock entry.
///
/// Guards against typos (1000 instead of 10) rather than any storage limit.
pub const MAX_QUANTITY: i64 = 999_999;
