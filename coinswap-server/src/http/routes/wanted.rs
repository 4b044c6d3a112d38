//! Wanted-list endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::db::WantedRepo;
use crate::http::error::ApiError;
use crate::http::extractors::AccessToken;
use crate::http::form::FormFields;
use crate::http::server::AppState;
use crate::models::WantedCoin;

/// GET /api/wantedCoins
async fn wanted_coins(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
) -> Result<Json<Vec<WantedCoin>>, ApiError> {
    let rows = WantedRepo::new(&state.pool).list(token.as_deref()).await?;
    Ok(Json(rows))
}

/// POST /api/addWantedCoin
async fn add_wanted_coin(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
    fields: FormFields,
) -> Result<Json<Vec<WantedCoin>>, ApiError> {
    let coin_id = fields.required("coinId")?;
    let rows = WantedRepo::new(&state.pool)
        .add(token.as_deref(), coin_id)
        .await?;
    Ok(Json(rows))
}

/// POST /api/removeWantedCoin
async fn remove_wanted_coin(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
    fields: FormFields,
) -> Result<StatusCode, ApiError> {
    let coin_id = fields.required("coinId")?;
    WantedRepo::new(&state.pool)
        .remove(token.as_deref(), coin_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Wanted-list routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/wantedCoins", get(wanted_coins))
        .route("/api/addWantedCoin", post(add_wanted_coin))
        .route("/api/removeWantedCoin", post(remove_wanted_coin))
}
