//! Liveness plus connection pool state

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct PoolHealth {
    /// Open connections, idle or in use
    pub connections: u32,
    pub idle: usize,
    pub max_connections: u32,
    pub closed: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub pool: PoolHealth,
}

/// GET /api/health - never touches the database
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let pool = &state.pool;
    let closed = pool.is_closed();
    Json(HealthResponse {
        status: if closed { "closing" } else { "ok" },
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        pool: PoolHealth {
            connections: pool.size(),
            idle: pool.num_idle(),
            max_connections: pool.options().get_max_connections(),
            closed,
        },
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinswap_core::CoinswapConfig;
    use sqlx::postgres::PgPoolOptions;

    fn state(max_connections: u32) -> Arc<AppState> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_lazy("postgres://coinswap@localhost/coinswap_unused")
            .unwrap();
        Arc::new(AppState::new(pool, &CoinswapConfig::default()))
    }

    #[tokio::test]
    async fn lazy_pool_reports_no_connections() {
        let Json(body) = health(State(state(1))).await;
        assert_eq!(body.status, "ok");
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(body.pool.connections, 0);
        assert_eq!(body.pool.max_connections, 1);
        assert!(!body.pool.closed);
    }

    #[tokio::test]
    async fn closed_pool_reports_closing() {
        let state = state(5);
        state.pool.close().await;
        let Json(body) = health(State(state)).await;
        assert_eq!(body.status, "closing");
        assert!(body.pool.closed);
    }
}
