//! PostgreSQL pool for `trivia serve` and `trivia seed`

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

/// Pool size used by `trivia seed` and when `--max-connections` is not given.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// How long a request waits for a free connection before failing with a 500.
pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Parse `database_url`, then open a pool of at most `max_connections`.
///
/// A malformed URL fails before any network access.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    let options: PgConnectOptions = database_url.parse()?;
    // host/db only; the URL may carry a password
    tracing::info!(
        host = options.get_host(),
        database = options.get_database().unwrap_or("<default>"),
        max_connections,
        "connecting to PostgreSQL"
    );

    PgPoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(options)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn malformed_url_is_rejected_without_connecting() {
        let err = create_pool("not-a-database-url").await.unwrap_err();
        assert!(!matches!(err, sqlx::Error::PoolTimedOut));
    }

    // DATABASE_URL=postgres://... cargo test -p trivia-server -- --ignored
    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_counts_questions() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool_with_options(&url, 1).await.expect("pool creation failed");
        crate::db::schema::run(&pool).await.expect("schema bootstrap failed");

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM questions")
            .fetch_one(&pool)
            .await
            .expect("query failed");
        assert!(count >= 0);
    }
}
