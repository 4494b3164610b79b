//! # ThriftersFind DB
//!
//! Database pool, migrations, and session storage for the ThriftersFind OMS.
//!
//! - [`sessions`]: The [`SessionStore`] seam with PostgreSQL and in-memory
//!   implementations
//!
//! # Example
//!
//! ```ignore
//! use thriftersfind_db::{PgSessionStore, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool().await?;
//! run_migrations(&pool).await?;
//! let sessions = PgSessionStore::new(pool.clone());
//! ```

use std::env;

use sqlx::postgres::PgPoolOptions;

pub mod sessions;

pub use sessions::{MemorySessionStore, PgSessionStore, SessionStore};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

/// Initializes a PostgreSQL connection pool.
///
/// Reads the connection string from `DATABASE_URL` and the pool size from
/// `DATABASE_MAX_CONNECTIONS` (default: 5).
///
/// # Errors
///
/// Fails if `DATABASE_URL` is not set or the database cannot be reached.
pub async fn init_db_pool() -> Result<PgPool, sqlx::Error> {
    let database_url = env::var("DATABASE_URL")
        .map_err(|_| sqlx::Error::Configuration("DATABASE_URL must be set".into()))?;
    let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(5);

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&database_url)
        .await?;

    Ok(pool)
}

/// Applies the bundled SQL migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}
