//! # Database Pool Management
//!
//! Connection pool creation and store initialization.
//!
//! ## Startup Sequence
//! ```text
//! DbConfig::new(path)          configure pool, backup dir, bootstrap
//!        │
//!        ▼
//! Database::new(config).await  create pool (WAL, foreign keys on)
//!        │                     run embedded migrations (idempotent)
//!        │                     seed bootstrap admin (INSERT OR IGNORE)
//!        │                     ensure backup directory exists
//!        ▼
//! Database handle              repositories, service, backup
//! ```
//!
//! The handle is opened once at process start and closed at shutdown; it is
//! passed by reference into the service layer rather than living in ambient
//! global state.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use chrono::Local;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::auth;
use crate::backup;
use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::category::CategoryRepository;
use crate::repository::product::ProductRepository;
use crate::repository::sale::SaleRepository;
use crate::repository::user::UserRepository;
use stockroom_core::BOOTSTRAP_ADMIN_USERNAME;

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("stockroom.db").backup_dir("backups");
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Directory that receives timestamped backup copies.
    /// Default: `backups`
    pub backup_dir: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5 (plenty for a single-operator desktop app)
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,

    /// Whether to seed the bootstrap admin account on connect.
    /// Default: true
    pub seed_admin: bool,

    /// Password for the bootstrap admin account.
    ///
    /// Kept for parity with the original system; deployments that care
    /// should override it before first run.
    pub bootstrap_password: String,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    /// The file is created on first connect if it does not exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            backup_dir: PathBuf::from("backups"),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
            seed_admin: true,
            bootstrap_password: "admin123".to_string(),
        }
    }

    /// Sets the backup directory.
    pub fn backup_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.backup_dir = dir.into();
        self
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the bootstrap admin password used on first initialization.
    pub fn bootstrap_password(mut self, password: impl Into<String>) -> Self {
        self.bootstrap_password = password.into();
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// In-memory SQLite gives each connection its own database, so the pool
    /// is pinned to a single connection.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            backup_dir: PathBuf::from("backups"),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
            seed_admin: true,
            bootstrap_password: "admin123".to_string(),
        }
    }

    fn is_in_memory(&self) -> bool {
        self.database_path == Path::new(":memory:")
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access and backups.
///
/// Cloning is cheap (the pool is reference-counted); ownership of the handle
/// marks who is responsible for calling [`Database::close`] at shutdown.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
    database_path: PathBuf,
    backup_dir: PathBuf,
    in_memory: bool,
}

impl Database {
    /// Opens the store and brings it to a usable state.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Configures SQLite: WAL journal, NORMAL synchronous, foreign keys on
    /// 3. Runs embedded migrations (idempotent)
    /// 4. Seeds the bootstrap admin account (idempotent, `INSERT OR IGNORE`)
    /// 5. Ensures the backup directory exists
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database"
        );

        // sqlite://path?mode=rwc creates the file if missing
        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            // WAL mode: readers and the writer do not block each other
            .journal_mode(SqliteJournalMode::Wal)
            // NORMAL synchronous: safe from corruption, may lose the last
            // transaction on a power cut
            .synchronous(SqliteSynchronous::Normal)
            // SQLite ships with foreign keys off for backwards compatibility
            .foreign_keys(true)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        debug!(max_connections = config.max_connections, "Pool created");

        let db = Database {
            pool,
            database_path: config.database_path.clone(),
            backup_dir: config.backup_dir.clone(),
            in_memory: config.is_in_memory(),
        };

        if config.run_migrations {
            migrations::run_migrations(&db.pool).await?;
        }

        if config.seed_admin {
            db.seed_bootstrap_admin(&config.bootstrap_password).await?;
        }

        if !db.in_memory {
            std::fs::create_dir_all(&db.backup_dir)?;
        }

        Ok(db)
    }

    /// Seeds the bootstrap admin account.
    ///
    /// `INSERT OR IGNORE` keyed on the unique username makes this safe to
    /// run on every startup: after any number of initializations exactly one
    /// `admin` row exists.
    async fn seed_bootstrap_admin(&self, password: &str) -> DbResult<()> {
        let hash = auth::hash_password(password)?;
        let inserted = self
            .users()
            .insert_ignore(BOOTSTRAP_ADMIN_USERNAME, &hash, stockroom_core::Role::Admin)
            .await?;

        if inserted {
            info!(username = BOOTSTRAP_ADMIN_USERNAME, "Bootstrap admin created");
        }
        Ok(())
    }

    /// Returns a reference to the connection pool, for queries not covered
    /// by the repositories.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Path of the underlying database file.
    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    /// Directory that receives backups.
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Returns the category repository.
    pub fn categories(&self) -> CategoryRepository {
        CategoryRepository::new(self.pool.clone())
    }

    /// Returns the product repository.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    /// Returns the sale repository.
    pub fn sales(&self) -> SaleRepository {
        SaleRepository::new(self.pool.clone())
    }

    /// Returns the user repository.
    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.pool.clone())
    }

    /// Copies the database file to a timestamped file in the backup
    /// directory and returns the path written.
    ///
    /// The WAL is checkpointed first so the main file contains every
    /// committed transaction before it is copied.
    pub async fn backup(&self) -> DbResult<PathBuf> {
        if self.in_memory {
            return Err(DbError::BackupSourceMissing(self.database_path.clone()));
        }

        sqlx::query("PRAGMA wal_checkpoint(TRUNCATE)")
            .execute(&self.pool)
            .await?;

        let written = backup::create_backup(
            &self.database_path,
            &self.backup_dir,
            Local::now().naive_local(),
        )?;

        info!(path = %written.display(), "Backup written");
        Ok(written)
    }

    /// Closes the database connection pool. Call at application shutdown;
    /// all repository operations fail afterwards.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.health_check().await);
    }

    #[tokio::test]
    async fn test_bootstrap_admin_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stockroom.db");
        let config = DbConfig::new(&path).backup_dir(dir.path().join("backups"));

        // Initialize twice against the same file.
        let db = Database::new(config.clone()).await.unwrap();
        db.close().await;
        let db = Database::new(config).await.unwrap();

        let admins = db
            .users()
            .count_by_username(BOOTSTRAP_ADMIN_USERNAME)
            .await
            .unwrap();
        assert_eq!(admins, 1);

        let admin = db
            .users()
            .get_by_username(BOOTSTRAP_ADMIN_USERNAME)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.role, stockroom_core::Role::Admin);
    }

    #[tokio::test]
    async fn test_backup_of_in_memory_database_fails() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = db.backup().await.unwrap_err();
        assert!(matches!(err, DbError::BackupSourceMissing(_)));
    }

    #[tokio::test]
    async fn test_file_backup_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let config = DbConfig::new(dir.path().join("stockroom.db"))
            .backup_dir(dir.path().join("backups"));
        let db = Database::new(config).await.unwrap();

        let written = db.backup().await.unwrap();
        assert!(written.exists());
        assert!(written
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("backup_"));
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/test.db")
            .max_connections(10)
            .backup_dir("/tmp/backups");

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.backup_dir, PathBuf::from("/tmp/backups"));
    }
}
