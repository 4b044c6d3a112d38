//! Sign-up, login and logout form endpoints, plus the session lookup
//!
//! The form endpoints answer with redirects, never JSON: success goes to
//! the index page with a fresh cookie, failure goes back to the form page
//! with `?error=<code>` and no cookie.

use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    routing::post,
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;

use crate::db::SessionRepo;
use crate::http::error::ApiError;
use crate::http::extractors::AccessToken;
use crate::http::form::FormFields;
use crate::http::server::AppState;
use crate::models::{Credentials, SessionInfo, SessionToken, SignUp};

/// Append `error=<code>` to a page path.
fn with_error(page: &str, code: &str) -> String {
    let separator = if page.contains('?') { '&' } else { '?' };
    format!("{}{}error={}", page, separator, code)
}

fn failure_redirect(page: &str, err: &ApiError) -> Response {
    match err {
        ApiError::Database(e) => tracing::error!("Database error: {}", e),
        ApiError::Internal { message } => tracing::error!("Internal error: {}", message),
        _ => {}
    }
    Redirect::to(&with_error(page, err.code())).into_response()
}

fn success_redirect(state: &AppState, jar: CookieJar, token: &SessionToken) -> Response {
    let jar = jar.add(state.cookies.issue(token));
    (jar, Redirect::to(&state.pages.index)).into_response()
}

async fn register(state: &AppState, fields: &FormFields) -> Result<SessionToken, ApiError> {
    let input = SignUp::new(
        fields.required_text("username")?,
        fields.required_text("email")?,
        fields.required_text("password")?,
    )?;
    let token = SessionRepo::new(&state.pool).sign_up(&input).await?;
    tracing::info!(username = %input.username, "User signed up");
    Ok(token)
}

async fn authenticate(state: &AppState, fields: &FormFields) -> Result<SessionToken, ApiError> {
    let credentials = Credentials::new(
        fields.required_text("username")?,
        fields.required_text("password")?,
    )?;
    SessionRepo::new(&state.pool)
        .login(&credentials)
        .await?
        .ok_or_else(|| {
            tracing::warn!(username = %credentials.username, "Login rejected");
            ApiError::Unauthorized {
                message: "invalid username or password".to_string(),
            }
        })
}

/// POST /signUp
async fn sign_up(State(state): State<Arc<AppState>>, jar: CookieJar, fields: FormFields) -> Response {
    match register(&state, &fields).await {
        Ok(token) => success_redirect(&state, jar, &token),
        Err(e) => {
            tracing::warn!(error = e.code(), "Sign-up rejected");
            failure_redirect(&state.pages.sign_up, &e)
        }
    }
}

/// POST /login
async fn login(State(state): State<Arc<AppState>>, jar: CookieJar, fields: FormFields) -> Response {
    match authenticate(&state, &fields).await {
        Ok(token) => success_redirect(&state, jar, &token),
        Err(e) => failure_redirect(&state.pages.login, &e),
    }
}

/// GET|POST /logout - the cookie is cleared even if the database call fails
async fn logout(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
    jar: CookieJar,
) -> Response {
    if let Some(token) = token.as_deref() {
        if let Err(e) = SessionRepo::new(&state.pool).logout(token).await {
            tracing::error!("Logout failed: {}", e);
        }
    }
    let jar = jar.add(state.cookies.clear());
    (jar, Redirect::to(&state.pages.login)).into_response()
}

/// GET /api/session
async fn session(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
) -> Result<Json<Vec<SessionInfo>>, ApiError> {
    let rows = SessionRepo::new(&state.pool).info(token.as_deref()).await?;
    Ok(Json(rows))
}

/// Auth routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/signUp", post(sign_up))
        .route("/login", post(login))
        .route("/logout", get(logout).post(logout))
        .route("/api/session", get(session))
}
