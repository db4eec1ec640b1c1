//! # Sale Repository
//!
//! Read-side queries over recorded sales. Sale rows are only ever written by
//! the inventory service's transaction, which decrements stock and inserts
//! the sale atomically; there is no standalone insert here on purpose.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use stockroom_core::{Sale, SalesReportRow};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Gets a sale by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            "SELECT id, product_id, quantity, unit_price_cents, sold_at \
             FROM sales WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Lists sales for one product, oldest first.
    pub async fn list_for_product(&self, product_id: &str) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            "SELECT id, product_id, quantity, unit_price_cents, sold_at \
             FROM sales WHERE product_id = ?1 ORDER BY sold_at",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Sales report rows for the inclusive range, joined to product names
    /// and ordered by sale timestamp.
    pub async fn report_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DbResult<Vec<SalesReportRow>> {
        debug!(%start, %end, "Building sales report");

        let rows = sqlx::query_as::<_, SalesReportRow>(
            "SELECT s.sold_at, p.name AS product_name, s.quantity, s.unit_price_cents \
             FROM sales s \
             JOIN products p ON s.product_id = p.id \
             WHERE s.sold_at BETWEEN ?1 AND ?2 \
             ORDER BY s.sold_at",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Counts sale rows (for diagnostics and tests).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
