//! HTTP layer
//!
//! Axum server with:
//! - Form/JSON binding with array coercion
//! - Session cookie issue/clear
//! - CORS (localhost only by default)
//! - Request tracing
//! - Graceful shutdown
//! - JSON error responses

pub mod error;
pub mod extractors;
pub mod form;
pub mod routes;
pub mod server;
pub mod session;

pub use error::ApiError;
pub use extractors::AccessToken;
pub use form::FormFields;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
pub use session::SessionCookies;
