//! Database layer: connection pool, migrations, models, and repositories.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub mod models;
pub mod repositories;

/// Convenience alias used throughout the api crate.
pub type DbPool = PgPool;

/// Default page size when a paginated list request omits `per_page`.
pub const DEFAULT_PER_PAGE: i64 = 20;

/// Upper bound on `per_page` to keep unbounded client values from turning
/// into unbounded result sets.
pub const MAX_PER_PAGE: i64 = 100;

/// Create a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// Translate 1-based `page` / `per_page` query values into a clamped
/// `(limit, offset)` pair for SQL.
pub fn page_bounds(page: i64, per_page: Option<i64>) -> (i64, i64) {
    let limit = per_page
        .unwrap_or(DEFAULT_PER_PAGE)
        .clamp(1, MAX_PER_PAGE);
    let offset = (page.max(1) - 1) * limit;
    (limit, offset)
}

#[cfg(test)]
mod tests {
    use super::page_bounds;

    #[test]
    fn page_bounds_defaults_to_twenty_per_page() {
        assert_eq!(page_bounds(1, None), (20, 0));
        assert_eq!(page_bounds(3, None), (20, 40));
    }

    #[test]
    fn page_bounds_clamps_per_page_and_page() {
        assert_eq!(page_bounds(0, Some(50)), (50, 0));
        assert_eq!(page_bounds(-2, Some(0)), (1, 0));
        assert_eq!(page_bounds(2, Some(10_000)), (100, 100));
    }
}
