//! # stockroom-db: Database Layer for Stockroom
//!
//! This crate provides storage and the inventory service for Stockroom.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! apps/cli (command dispatch)
//!     │
//!     ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │                   stockroom-db (THIS CRATE)                   │
//! │                                                               │
//! │  InventoryService (service.rs)                                │
//! │    add_category · add_product · register_sale · sales_report  │
//! │    login · backup                                             │
//! │        │                                                      │
//! │        ▼                                                      │
//! │  Database (pool.rs)  ──►  repositories  ──►  SqlitePool       │
//! │        │                                                      │
//! │        ├── migrations.rs  (embedded schema, idempotent)       │
//! │        ├── auth.rs        (argon2 hash/verify, admin seed)    │
//! │        └── backup.rs      (timestamped file copies)           │
//! └───────────────────────────────────────────────────────────────┘
//!     │
//!     ▼
//! stockroom.db (local SQLite file, WAL mode)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockroom_db::{Database, DbConfig, InventoryService};
//!
//! let db = Database::new(DbConfig::new("stockroom.db")).await?;
//! let mut service = InventoryService::new(db);
//!
//! service.login("admin", "admin123").await?;
//! let sale = service.register_sale(&product_id, 3).await?;
//! ```

pub mod auth;
pub mod backup;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod service;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use service::{InventoryService, ServiceError, ServiceResult};

// Repository re-exports for convenience
pub use repository::category::CategoryRepository;
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
pub use repository::user::UserRepository;
