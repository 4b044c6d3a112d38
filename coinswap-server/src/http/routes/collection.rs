//! Collection endpoints - the caller's added coins and the swap market

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::db::CollectionRepo;
use crate::http::error::ApiError;
use crate::http::extractors::AccessToken;
use crate::http::form::FormFields;
use crate::http::server::AppState;
use crate::models::{AddedCoin, CoinDetails, NewAddedCoin, ValidationError};

/// Optional metadata fields shared by add and update.
fn details(fields: &FormFields) -> Result<CoinDetails, ValidationError> {
    CoinDetails::new(
        fields.text("grade"),
        fields.parse("value")?,
        fields.parse("amount")?,
        fields.text("comment"),
        fields.flag("swap")?,
    )
}

/// POST /addCoin
async fn add_coin(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
    fields: FormFields,
) -> Result<Json<Vec<AddedCoin>>, ApiError> {
    let coin = NewAddedCoin {
        coin_id: fields.required("coinId")?,
        mintage_id: fields.parse("mintageId")?,
        details: details(&fields)?,
    };
    let rows = CollectionRepo::new(&state.pool)
        .add(token.as_deref(), &coin)
        .await?;
    Ok(Json(rows))
}

/// POST /updateCoin
async fn update_coin(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
    fields: FormFields,
) -> Result<Json<Vec<AddedCoin>>, ApiError> {
    let added_coin_id = fields.required("addedCoinId")?;
    let details = details(&fields)?;
    let rows = CollectionRepo::new(&state.pool)
        .update(token.as_deref(), added_coin_id, &details)
        .await?;
    Ok(Json(rows))
}

/// POST /deleteCoin
async fn delete_coin(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
    fields: FormFields,
) -> Result<StatusCode, ApiError> {
    let added_coin_id = fields.required("addedCoinId")?;
    CollectionRepo::new(&state.pool)
        .delete(token.as_deref(), added_coin_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/userCoins
async fn user_coins(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
) -> Result<Json<Vec<AddedCoin>>, ApiError> {
    let rows = CollectionRepo::new(&state.pool)
        .user_coins(token.as_deref())
        .await?;
    Ok(Json(rows))
}

/// GET /api/userCoin?addedCoinId=
async fn user_coin(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
    fields: FormFields,
) -> Result<Json<Vec<AddedCoin>>, ApiError> {
    let Some(added_coin_id) = fields.parse("addedCoinId")? else {
        tracing::debug!("addedCoinId missing, skipping lookup");
        return Ok(Json(Vec::new()));
    };
    let rows = CollectionRepo::new(&state.pool)
        .user_coin(token.as_deref(), added_coin_id)
        .await?;
    Ok(Json(rows))
}

/// POST /api/setSwap
async fn set_swap(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
    fields: FormFields,
) -> Result<Json<Vec<AddedCoin>>, ApiError> {
    let added_coin_id = fields.required("addedCoinId")?;
    let swap = fields
        .flag("swap")?
        .ok_or(ValidationError::Missing { field: "swap" })?;
    let rows = CollectionRepo::new(&state.pool)
        .set_swap(token.as_deref(), added_coin_id, swap)
        .await?;
    Ok(Json(rows))
}

/// GET /api/swapCoins
async fn swap_coins(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
) -> Result<Json<Vec<AddedCoin>>, ApiError> {
    let rows = CollectionRepo::new(&state.pool)
        .swap_coins(token.as_deref())
        .await?;
    Ok(Json(rows))
}

/// GET /api/matchingSwapCoins
async fn matching_swap_coins(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
) -> Result<Json<Vec<AddedCoin>>, ApiError> {
    let rows = CollectionRepo::new(&state.pool)
        .matching_swap_coins(token.as_deref())
        .await?;
    Ok(Json(rows))
}

/// GET /api/userSwapCoins?username=
async fn user_swap_coins(
    State(state): State<Arc<AppState>>,
    fields: FormFields,
) -> Result<Json<Vec<AddedCoin>>, ApiError> {
    let Some(username) = fields.lookup("username") else {
        tracing::debug!("username missing, skipping lookup");
        return Ok(Json(Vec::new()));
    };
    let rows = CollectionRepo::new(&state.pool)
        .user_swap_coins(username)
        .await?;
    Ok(Json(rows))
}

/// Collection routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/addCoin", post(add_coin))
        .route("/updateCoin", post(update_coin))
        .route("/deleteCoin", post(delete_coin))
        .route("/api/userCoins", get(user_coins))
        .route("/api/userCoin", get(user_coin))
        .route("/api/setSwap", post(set_swap))
        .route("/api/swapCoins", get(swap_coins))
        .route("/api/matchingSwapCoins", get(matching_swap_coins))
        .route("/api/userSwapCoins", get(user_swap_coins))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_bind_optional_fields() {
        let fields = FormFields::from_pairs([
            ("grade", "UNC"),
            ("value", "1.5"),
            ("swap", "on"),
        ]);
        let details = details(&fields).unwrap();
        assert_eq!(details.grade.as_deref(), Some("UNC"));
        assert_eq!(details.value, Some(1.5));
        assert_eq!(details.amount, None);
        assert_eq!(details.comment, None);
        assert_eq!(details.swap, Some(true));
    }

    #[test]
    fn details_reject_unparseable_amount() {
        let fields = FormFields::from_pairs([("amount", "lots")]);
        assert!(matches!(
            details(&fields),
            Err(ValidationError::InvalidValue { field: "amount", .. })
        ));
    }
}
