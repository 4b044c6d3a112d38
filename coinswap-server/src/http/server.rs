//! Axum server setup
//!
//! Server skeleton with:
//! - Localhost-only CORS by default (credentials allowed for the cookie)
//! - Tracing middleware
//! - Optional /static file serving
//! - Graceful shutdown on SIGTERM/Ctrl+C, then the pool is closed

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use coinswap_core::{CoinswapConfig, PagesSection};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::routes;
use super::session::SessionCookies;

/// Origins allowed when CORS is not permissive
const LOCAL_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:3030",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:3030",
];

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:3030)
    pub bind_addr: SocketAddr,

    /// Allow permissive CORS (default: false = localhost only)
    ///
    /// WARNING: Setting this to true allows any origin.
    pub cors_permissive: bool,

    /// Directory served under /static
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_config(&CoinswapConfig::default())
    }
}

impl ServerConfig {
    pub fn from_config(config: &CoinswapConfig) -> Self {
        Self {
            bind_addr: config.server.bind,
            cors_permissive: config.server.cors_permissive,
            static_dir: config.server.static_dir.clone(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub cookies: SessionCookies,
    /// Redirect targets for the form endpoints
    pub pages: PagesSection,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(pool: PgPool, config: &CoinswapConfig) -> Self {
        Self {
            pool,
            cookies: SessionCookies::from_config(&config.session),
            pages: config.pages.clone(),
            started_at: Instant::now(),
        }
    }
}

fn cors_layer(permissive: bool) -> CorsLayer {
    if permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(LOCAL_ORIGINS.map(HeaderValue::from_static))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Build the application router.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let mut app = Router::new()
        .merge(routes::health::router())
        .merge(routes::auth::router())
        .merge(routes::catalog::router())
        .merge(routes::collection::router())
        .merge(routes::wanted::router())
        .merge(routes::swaps::router());

    if let Some(dir) = &config.static_dir {
        tracing::info!(dir = %dir.display(), "Serving static files under /static");
        app = app.nest_service("/static", ServeDir::new(dir));
    }

    app.layer(cors_layer(config.cors_permissive))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server until a shutdown signal arrives.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&database_url).await?;
/// let state = AppState::new(pool, &config);
/// run_server(state, ServerConfig::from_config(&config)).await?;
/// ```
pub async fn run_server(state: AppState, config: ServerConfig) -> Result<(), ServerError> {
    let pool = state.pool.clone();
    let app = build_router(state, &config);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.bind_addr,
            source,
        })?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
///
/// If a handler cannot be installed, that branch never completes.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    // Lazily connected: only routes that never reach the database are exercised.
    fn test_app(config: &ServerConfig) -> Router {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://coinswap@localhost/coinswap_unused")
            .unwrap();
        build_router(AppState::new(pool, &CoinswapConfig::default()), config)
    }

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 3030);
        assert!(!config.cors_permissive);
        assert!(config.static_dir.is_none());
    }

    #[tokio::test]
    async fn health_endpoint() {
        let response = test_app(&ServerConfig::default())
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn blank_lookup_returns_empty_array() {
        let app = test_app(&ServerConfig::default());
        for uri in [
            "/api/coin",
            "/api/coin?coinId=",
            "/api/coinMintages",
            "/api/coinsByCountry?country=%20",
            "/api/searchCoins?q=",
            "/api/userCoin",
            "/api/userSwapCoins",
            "/api/swapOfferCoins?offerId=",
        ] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");

            let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            assert_eq!(&body[..], b"[]", "{uri}");
        }
    }

    #[tokio::test]
    async fn write_without_required_field_is_400() {
        let response = test_app(&ServerConfig::default())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/swapOffer")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"recipient": "bob"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn login_with_missing_fields_redirects_with_error() {
        let response = test_app(&ServerConfig::default())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/login")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(Body::from("username=alice"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers()["location"],
            "/static/login.html?error=validation_error"
        );
        assert!(response.headers().get("set-cookie").is_none());
    }

    #[tokio::test]
    async fn serves_static_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>coins</h1>").unwrap();

        let config = ServerConfig {
            static_dir: Some(dir.path().to_path_buf()),
            ..ServerConfig::default()
        };
        let response = test_app(&config)
            .oneshot(
                Request::builder()
                    .uri("/static/index.html")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"<h1>coins</h1>");
    }

    #[tokio::test]
    async fn localhost_cors_allows_credentials() {
        let response = test_app(&ServerConfig::default())
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/health")
                    .header("origin", "http://localhost:3000")
                    .header("access-control-request-method", "GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "http://localhost:3000");
        assert_eq!(headers["access-control-allow-credentials"], "true");
    }
}
