//! Public catalog endpoints
//!
//! Lookups without their key parameter answer `[]` without querying.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::db::CatalogRepo;
use crate::http::error::ApiError;
use crate::http::form::FormFields;
use crate::http::server::AppState;
use crate::models::{Coin, CoinMintage, CountrySummary, SearchTerm};

/// GET /api/indexCoinsRequest - whole catalog, by country then year
async fn index_coins(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Coin>>, ApiError> {
    let coins = CatalogRepo::new(&state.pool).list().await?;
    Ok(Json(coins))
}

/// GET /api/coin?coinId=
async fn coin(
    State(state): State<Arc<AppState>>,
    fields: FormFields,
) -> Result<Json<Vec<Coin>>, ApiError> {
    let Some(coin_id) = fields.parse::<i32>("coinId")? else {
        tracing::debug!("coinId missing, skipping lookup");
        return Ok(Json(Vec::new()));
    };
    let coins = CatalogRepo::new(&state.pool).get(coin_id).await?;
    Ok(Json(coins))
}

/// GET /api/coinMintages?coinId=
async fn coin_mintages(
    State(state): State<Arc<AppState>>,
    fields: FormFields,
) -> Result<Json<Vec<CoinMintage>>, ApiError> {
    let Some(coin_id) = fields.parse::<i32>("coinId")? else {
        tracing::debug!("coinId missing, skipping lookup");
        return Ok(Json(Vec::new()));
    };
    let mintages = CatalogRepo::new(&state.pool).mintages(coin_id).await?;
    Ok(Json(mintages))
}

/// GET /api/countries
async fn countries(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CountrySummary>>, ApiError> {
    let countries = CatalogRepo::new(&state.pool).countries().await?;
    Ok(Json(countries))
}

/// GET /api/coinsByCountry?country=
async fn coins_by_country(
    State(state): State<Arc<AppState>>,
    fields: FormFields,
) -> Result<Json<Vec<Coin>>, ApiError> {
    let Some(country) = fields.lookup("country") else {
        tracing::debug!("country missing, skipping lookup");
        return Ok(Json(Vec::new()));
    };
    let coins = CatalogRepo::new(&state.pool).by_country(country).await?;
    Ok(Json(coins))
}

/// GET /api/searchCoins?q=
async fn search_coins(
    State(state): State<Arc<AppState>>,
    fields: FormFields,
) -> Result<Json<Vec<Coin>>, ApiError> {
    let Some(raw) = fields.lookup("q") else {
        return Ok(Json(Vec::new()));
    };
    let term = SearchTerm::new(raw)?;
    let coins = CatalogRepo::new(&state.pool).search(&term).await?;
    Ok(Json(coins))
}

/// Catalog routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/indexCoinsRequest", get(index_coins))
        .route("/api/coin", get(coin))
        .route("/api/coinMintages", get(coin_mintages))
        .route("/api/countries", get(countries))
        .route("/api/coinsByCountry", get(coins_by_country))
        .route("/api/searchCoins", get(search_coins))
}
