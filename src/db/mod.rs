use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, SqlErr, Statement};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::facility::FacilityRepository;
pub use repositories::menu::MenuRepository;
pub use repositories::notification::NotificationRepository;
pub use repositories::report::ReportRepository;
pub use repositories::user::{UserCredentials, UserRepository};
pub use repositories::wellness::WellnessRepository;

/// Failure of a single repository call.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint rejected the write.
    #[error("{0} already exists")]
    Conflict(String),

    /// An update or lookup-by-id found no row.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl StoreError {
    /// Maps a failed insert/update, turning unique violations into [`StoreError::Conflict`].
    pub fn from_write(err: DbErr, what: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::Conflict(what.to_string()),
            _ => Self::Database(err),
        }
    }

    #[must_use]
    pub const fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound { entity, id }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Owns the connection pool. Cloning shares the pool.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if db_url.starts_with("sqlite:") && !db_url.contains(":memory:") {
            let path_str = db_url
                .trim_start_matches("sqlite:")
                .trim_start_matches("//")
                .split('?')
                .next()
                .unwrap_or_default();
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    /// Closes the pool. Clones held elsewhere stop working afterwards.
    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        Ok(())
    }

    #[must_use]
    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn facilities(&self) -> FacilityRepository {
        FacilityRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn reports(&self) -> ReportRepository {
        ReportRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn wellness(&self) -> WellnessRepository {
        WellnessRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn menus(&self) -> MenuRepository {
        MenuRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn notifications(&self) -> NotificationRepository {
        NotificationRepository::new(self.conn.clone())
    }
}
