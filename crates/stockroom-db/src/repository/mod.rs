//! # Repository Module
//!
//! Database repository implementations for Stockroom.
//!
//! Each repository wraps the shared [`sqlx::SqlitePool`] behind a small,
//! typed API so SQL stays isolated in one place per table:
//!
//! - [`category::CategoryRepository`] - category insert and lookup
//! - [`product::ProductRepository`] - product CRUD
//! - [`sale::SaleRepository`] - sale reporting (inserts happen inside the
//!   service's sale transaction)
//! - [`user::UserRepository`] - operator accounts

pub mod category;
pub mod product;
pub mod sale;
pub mod user;

pub use category::CategoryRepository;
pub use product::ProductRepository;
pub use sale::SaleRepository;
pub use user::UserRepository;
