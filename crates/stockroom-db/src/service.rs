//! # Inventory Service
//!
//! The one component with business logic: product/category creation, the
//! transactional sale, sales reporting, authentication, and backup.
//!
//! ## The Sale Transaction
//! ```text
//! register_sale(product_id, quantity)
//!      │
//!      ▼
//! BEGIN ─► SELECT quantity, price ─► check stock ─► UPDATE products
//!      │                                │               │
//!      │                     not found /│ short         ▼
//!      │                     ROLLBACK ◄─┘          INSERT INTO sales
//!      │                                                │
//!      └───────────────────────────────────────────► COMMIT
//! ```
//!
//! Read, check, decrement, and insert all execute inside a single SQLite
//! transaction, so another writer on the same file can never observe a
//! half-applied sale and a failed sale leaves no trace at all.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth;
use crate::error::DbError;
use crate::pool::Database;
use stockroom_core::{
    validation, Category, CoreError, NewProduct, Product, Sale, SalesReportRow, Session,
    ValidationError,
};

// =============================================================================
// Service Error
// =============================================================================

/// Errors surfaced by the inventory service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Business rule violation (unknown product, insufficient stock,
    /// invalid input).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Storage failure, including typed duplicate-name and foreign-key
    /// violations.
    #[error(transparent)]
    Db(#[from] DbError),

    /// Username unknown or password mismatch. Deliberately carries no
    /// detail about which of the two failed.
    #[error("Invalid credentials")]
    InvalidCredentials,
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Core(CoreError::Validation(err))
    }
}

impl ServiceError {
    /// True when the failure is a duplicate-name violation, so callers can
    /// distinguish it from other storage errors.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, ServiceError::Db(db) if db.is_unique_violation())
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Inventory Service
// =============================================================================

/// Service facade over the store: every operation the application performs
/// goes through here.
///
/// Holds the process-wide [`Database`] handle and the current operator
/// session. Single operator, synchronous use; the only atomicity the system
/// needs is the sale transaction below.
#[derive(Debug)]
pub struct InventoryService {
    db: Database,
    session: Option<Session>,
}

impl InventoryService {
    /// Creates a service over an initialized database.
    pub fn new(db: Database) -> Self {
        InventoryService { db, session: None }
    }

    /// The underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// The operator authenticated by the last successful [`login`], if any.
    ///
    /// [`login`]: InventoryService::login
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    // -------------------------------------------------------------------------
    // Categories & Products
    // -------------------------------------------------------------------------

    /// Creates a category.
    ///
    /// A duplicate name fails with a typed unique-violation error
    /// (check [`ServiceError::is_duplicate`]) and changes nothing.
    pub async fn add_category(&self, name: &str) -> ServiceResult<Category> {
        validation::validate_name("name", name)?;

        let category = self.db.categories().insert(name).await?;
        info!(name = %category.name, "Category created");
        Ok(category)
    }

    /// Creates a product.
    ///
    /// The optional category reference is enforced by the store's foreign
    /// key; a duplicate name fails with a typed unique-violation error.
    pub async fn add_product(&self, new: NewProduct) -> ServiceResult<Product> {
        validation::validate_new_product(&new)?;

        let product = self.db.products().insert(&new).await?;
        info!(name = %product.name, quantity = product.quantity, "Product created");
        Ok(product)
    }

    // -------------------------------------------------------------------------
    // Sales
    // -------------------------------------------------------------------------

    /// Registers a sale: checks stock, decrements it, and records the sale
    /// in one atomic unit.
    ///
    /// ## Failure Semantics
    /// * unknown product → [`CoreError::ProductNotFound`], nothing written
    /// * `quantity` exceeds stock → [`CoreError::InsufficientStock`],
    ///   nothing written
    ///
    /// On success the sale row carries the product's unit price as it was
    /// *before* this call.
    pub async fn register_sale(&self, product_id: &str, quantity: i64) -> ServiceResult<Sale> {
        validation::validate_sale_quantity(quantity)?;

        debug!(product_id = %product_id, quantity, "Registering sale");

        let mut tx = self.db.pool().begin().await.map_err(DbError::from)?;

        let product: Option<(i64, i64, String)> =
            sqlx::query_as("SELECT quantity, price_cents, name FROM products WHERE id = ?1")
                .bind(product_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(DbError::from)?;

        let (available, price_cents, name) = match product {
            None => return Err(CoreError::ProductNotFound(product_id.to_string()).into()),
            Some(row) => row,
        };

        if available < quantity {
            // Dropping the transaction rolls it back; no partial mutation.
            return Err(CoreError::InsufficientStock {
                name,
                available,
                requested: quantity,
            }
            .into());
        }

        let now = Utc::now();

        sqlx::query("UPDATE products SET quantity = quantity - ?2, updated_at = ?3 WHERE id = ?1")
            .bind(product_id)
            .bind(quantity)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)?;

        let sale = Sale {
            id: Uuid::new_v4().to_string(),
            product_id: product_id.to_string(),
            quantity,
            unit_price_cents: price_cents,
            sold_at: now,
        };

        sqlx::query(
            "INSERT INTO sales (id, product_id, quantity, unit_price_cents, sold_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&sale.id)
        .bind(&sale.product_id)
        .bind(sale.quantity)
        .bind(sale.unit_price_cents)
        .bind(sale.sold_at)
        .execute(&mut *tx)
        .await
        .map_err(DbError::from)?;

        tx.commit().await.map_err(DbError::from)?;

        info!(
            product = %name,
            quantity,
            remaining = available - quantity,
            "Sale registered"
        );
        Ok(sale)
    }

    /// Sales report over the inclusive timestamp range, ordered by sale
    /// time and joined to product names.
    pub async fn sales_report(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ServiceResult<Vec<SalesReportRow>> {
        let rows = self.db.sales().report_between(start, end).await?;
        Ok(rows)
    }

    // -------------------------------------------------------------------------
    // Authentication & Backup
    // -------------------------------------------------------------------------

    /// Authenticates an operator and sets the current session on success.
    ///
    /// No lockout and no retry limit: a failed login simply returns
    /// [`ServiceError::InvalidCredentials`] and leaves any existing session
    /// untouched.
    pub async fn login(&mut self, username: &str, password: &str) -> ServiceResult<Session> {
        validation::validate_credential("username", username)?;
        validation::validate_credential("password", password)?;

        let user = self.db.users().get_by_username(username).await?;

        let user = match user {
            Some(u) if auth::verify_password(password, &u.password_hash) => u,
            _ => {
                debug!(username = %username, "Login rejected");
                return Err(ServiceError::InvalidCredentials);
            }
        };

        let session = Session {
            username: user.username,
            role: user.role,
        };
        info!(username = %session.username, role = %session.role, "Login");

        self.session = Some(session.clone());
        Ok(session)
    }

    /// Copies the database file to a timestamped backup and returns the
    /// path written.
    pub async fn backup(&self) -> ServiceResult<PathBuf> {
        let path = self.db.backup().await?;
        Ok(path)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;
    use chrono::Duration;

    async fn service() -> InventoryService {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        InventoryService::new(db)
    }

    async fn widget(service: &InventoryService) -> Product {
        service
            .add_product(NewProduct {
                name: "Widget".to_string(),
                quantity: 10,
                price_cents: 500,
                category_id: None,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_sale_decrements_stock_and_records_pre_sale_price() {
        let service = service().await;
        let product = widget(&service).await;

        let sale = service.register_sale(&product.id, 3).await.unwrap();
        assert_eq!(sale.quantity, 3);
        assert_eq!(sale.unit_price_cents, 500);

        let product = service
            .database()
            .products()
            .get_by_id(&product.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(product.quantity, 7);
        assert_eq!(service.database().sales().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_insufficient_stock_leaves_no_trace() {
        let service = service().await;
        let product = widget(&service).await;

        service.register_sale(&product.id, 3).await.unwrap();

        // 7 remain; asking for 8 must fail without touching anything.
        let err = service.register_sale(&product.id, 8).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Core(CoreError::InsufficientStock {
                available: 7,
                requested: 8,
                ..
            })
        ));

        let product = service
            .database()
            .products()
            .get_by_id(&product.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(product.quantity, 7);
        assert_eq!(service.database().sales().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unknown_product_sale_fails_cleanly() {
        let service = service().await;
        widget(&service).await;

        let err = service.register_sale("no-such-id", 1).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Core(CoreError::ProductNotFound(_))
        ));
        assert_eq!(service.database().sales().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_sale_quantity_must_be_positive() {
        let service = service().await;
        let product = widget(&service).await;

        assert!(service.register_sale(&product.id, 0).await.is_err());
        assert!(service.register_sale(&product.id, -2).await.is_err());
        assert_eq!(service.database().sales().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_selling_exactly_the_stock_empties_it() {
        let service = service().await;
        let product = widget(&service).await;

        service.register_sale(&product.id, 10).await.unwrap();

        let product = service
            .database()
            .products()
            .get_by_id(&product.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(product.quantity, 0);
    }

    #[tokio::test]
    async fn test_duplicate_category_is_typed_and_changes_nothing() {
        let service = service().await;
        service.add_category("Tools").await.unwrap();

        let err = service.add_category("Tools").await.unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(service.database().categories().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_product_is_typed_and_changes_nothing() {
        let service = service().await;
        widget(&service).await;

        let err = service
            .add_product(NewProduct {
                name: "Widget".to_string(),
                quantity: 1,
                price_cents: 100,
                category_id: None,
            })
            .await
            .unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(service.database().products().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_product_with_unknown_category_is_rejected() {
        let service = service().await;

        let err = service
            .add_product(NewProduct {
                name: "Widget".to_string(),
                quantity: 1,
                price_cents: 100,
                category_id: Some("no-such-category".to_string()),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Db(DbError::ForeignKeyViolation { .. })
        ));
    }

    #[tokio::test]
    async fn test_product_in_category() {
        let service = service().await;
        let category = service.add_category("Tools").await.unwrap();

        let product = service
            .add_product(NewProduct {
                name: "Hammer".to_string(),
                quantity: 4,
                price_cents: 1250,
                category_id: Some(category.id.clone()),
            })
            .await
            .unwrap();
        assert_eq!(product.category_id.as_deref(), Some(category.id.as_str()));
    }

    #[tokio::test]
    async fn test_sales_report_range_is_inclusive_and_ordered() {
        let service = service().await;
        let product = widget(&service).await;

        let first = service.register_sale(&product.id, 2).await.unwrap();
        let second = service.register_sale(&product.id, 1).await.unwrap();

        let rows = service
            .sales_report(
                first.sold_at - Duration::days(1),
                second.sold_at + Duration::days(1),
            )
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].quantity, 2);
        assert_eq!(rows[1].quantity, 1);
        assert_eq!(rows[0].product_name, "Widget");
        assert!(rows[0].sold_at <= rows[1].sold_at);

        // A window that ends before the sales happened sees nothing.
        let empty = service
            .sales_report(
                first.sold_at - Duration::days(2),
                first.sold_at - Duration::days(1),
            )
            .await
            .unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn test_login_happy_path_sets_session() {
        let mut service = service().await;

        let session = service.login("admin", "admin123").await.unwrap();
        assert_eq!(session.username, "admin");
        assert!(session.is_admin());
        assert_eq!(service.session(), Some(&session));
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password_and_unknown_user() {
        let mut service = service().await;

        let err = service.login("admin", "nope").await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidCredentials));
        assert!(service.session().is_none());

        let err = service.login("ghost", "admin123").await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_custom_bootstrap_password() {
        let config = DbConfig::in_memory().bootstrap_password("s3cret");
        let db = Database::new(config).await.unwrap();
        let mut service = InventoryService::new(db);

        assert!(service.login("admin", "admin123").await.is_err());
        assert!(service.login("admin", "s3cret").await.is_ok());
    }
}
