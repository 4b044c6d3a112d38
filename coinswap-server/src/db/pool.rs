//! Postgres pool shared by every request
//!
//! Handlers borrow a connection per query. With `max_connections = 1` all
//! requests queue on one connection, the single-connection model; larger
//! pools let independent requests run their stored procedures in parallel.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// `[database] max_connections` when unset.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Connect with the default pool size.
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Connect with `max_connections` slots, at least one.
///
/// Fails fast when the first connection cannot be opened, so `serve` and
/// `db init` report a bad `DATABASE_URL` before doing anything else.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    let max_connections = max_connections.max(1);
    tracing::debug!(max_connections, "connecting to postgres");
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn zero_is_raised_to_one_connection() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool_with_options(&url, 0)
            .await
            .expect("pool creation failed");
        assert_eq!(pool.options().get_max_connections(), 1);

        let one: i32 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");
        assert_eq!(one, 1);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn single_connection_pool_serves_concurrent_tasks() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool_with_options(&url, 1)
            .await
            .expect("pool creation failed");

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let pool = pool.clone();
                tokio::spawn(async move {
                    let result: (i32,) = sqlx::query_as("SELECT $1::int")
                        .bind(i)
                        .fetch_one(&pool)
                        .await
                        .expect("concurrent query failed");
                    result.0
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.await.expect("task panicked");
            assert_eq!(result, i as i32);
        }
    }
}
