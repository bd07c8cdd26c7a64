//! # Studio DB
//!
//! Database pool, migrations and repositories for the Studio API.
//!
//! Handlers and services never touch SQL directly. They work against the
//! repository traits in [`repositories`], backed by PostgreSQL in production
//! ([`postgres`]) and by an in-memory store in tests (`memory`, behind the
//! `test-utils` feature).
//!
//! # Example
//!
//! ```ignore
//! use studio_db::{init_db_pool, run_migrations, Repositories};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = init_db_pool().await?;
//!     run_migrations(&pool).await?;
//!     let repositories = Repositories::postgres(pool);
//!     Ok(())
//! }
//! ```

use std::env;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

#[cfg(feature = "test-utils")]
pub mod memory;
pub mod postgres;
pub mod repositories;

pub use repositories::{SessionRepository, TeacherRepository, UserRepository};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Initializes a PostgreSQL connection pool.
///
/// Reads `DATABASE_URL` and the optional `DATABASE_MAX_CONNECTIONS`
/// (default 10). The returned pool is cheaply cloneable.
///
/// # Errors
///
/// Fails if `DATABASE_URL` is unset or the database is unreachable.
pub async fn init_db_pool() -> anyhow::Result<PgPool> {
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_MAX_CONNECTIONS);

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    info!(max_connections, "Database pool initialized");
    Ok(pool)
}

/// Applies the SQL migrations embedded from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

/// The repositories handed to the application state.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub teachers: Arc<dyn TeacherRepository>,
    pub sessions: Arc<dyn SessionRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(postgres::PgUserRepository::new(pool.clone())),
            teachers: Arc::new(postgres::PgTeacherRepository::new(pool.clone())),
            sessions: Arc::new(postgres::PgSessionRepository::new(pool)),
        }
    }

    /// Repositories sharing one fresh in-memory store.
    #[cfg(feature = "test-utils")]
    pub fn in_memory() -> Self {
        let store = Arc::new(memory::InMemoryStore::default());
        Self {
            users: store.clone(),
            teachers: store.clone(),
            sessions: store,
        }
    }
}
