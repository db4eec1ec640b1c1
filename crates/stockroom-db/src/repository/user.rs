//! # User Repository
//!
//! Operator accounts. The only write path in scope is the idempotent
//! bootstrap seed; there is no update or delete.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use stockroom_core::{Role, User};

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a user unless the username already exists.
    ///
    /// `INSERT OR IGNORE` keyed on the unique username makes this safe to
    /// call on every startup. Returns whether a row was actually inserted.
    pub async fn insert_ignore(
        &self,
        username: &str,
        password_hash: &str,
        role: Role,
    ) -> DbResult<bool> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        debug!(username = %username, "Seeding user (insert-or-ignore)");

        let result = sqlx::query(
            "INSERT OR IGNORE INTO users (id, username, password_hash, role, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&id)
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Gets a user by username.
    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, role, created_at \
             FROM users WHERE username = ?1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Counts rows with the given username (0 or 1 given the unique index).
    pub async fn count_by_username(&self, username: &str) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?1")
            .bind(username)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Counts all users.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
