//! # Panelgate DB
//!
//! Database pool and migrations for the Panelgate API.
//!
//! # Example
//!
//! ```ignore
//! use panelgate_db::{init_db_pool, run_migrations};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sqlx::Error> {
//!     let pool = init_db_pool(&std::env::var("DATABASE_URL").unwrap()).await?;
//!     run_migrations(&pool).await?;
//!     Ok(())
//! }
//! ```

use sqlx::postgres::PgPoolOptions;
use tracing::info;

/// Initializes a PostgreSQL connection pool.
///
/// The returned pool is cheaply cloneable and is shared through the
/// application state.
///
/// # Errors
///
/// Returns the connection error when the database cannot be reached.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("Database pool initialized");
    Ok(pool)
}

/// Applies the workspace migrations in `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

// Re-export PgPool for convenience
pub use sqlx::PgPool;
