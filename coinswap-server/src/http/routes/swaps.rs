//! Swap offer/request endpoints
//!
//! `addedCoinIds` may arrive as a single id or as an array in any of the
//! forms `FormFields` understands; the whole list goes to the database in
//! one call.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::db::SwapRepo;
use crate::http::error::ApiError;
use crate::http::extractors::AccessToken;
use crate::http::form::FormFields;
use crate::http::server::AppState;
use crate::models::{NewSwap, SwapKind, SwapOffer, SwapOfferCoin};

fn new_swap(kind: SwapKind, fields: &FormFields) -> Result<NewSwap, ApiError> {
    let counterpart_field = match kind {
        SwapKind::Offer => "recipient",
        SwapKind::Request => "owner",
    };
    let swap = NewSwap::new(
        kind,
        fields.required_text(counterpart_field)?,
        fields.list("addedCoinIds")?,
        fields.text("message"),
    )?;
    Ok(swap)
}

async fn create(
    state: &AppState,
    token: AccessToken,
    swap: NewSwap,
) -> Result<Json<Vec<SwapOffer>>, ApiError> {
    let rows = SwapRepo::new(&state.pool)
        .create(token.as_deref(), &swap)
        .await?;
    if let Some(offer) = rows.first() {
        tracing::info!(
            swap_offer_id = offer.swap_offer_id,
            kind = ?offer.kind,
            coins = offer.coin_count,
            "Swap created"
        );
    }
    Ok(Json(rows))
}

/// POST /api/swapOffer
async fn swap_offer(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
    fields: FormFields,
) -> Result<Json<Vec<SwapOffer>>, ApiError> {
    let swap = new_swap(SwapKind::Offer, &fields)?;
    create(&state, token, swap).await
}

/// POST /api/swapRequest
async fn swap_request(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
    fields: FormFields,
) -> Result<Json<Vec<SwapOffer>>, ApiError> {
    let swap = new_swap(SwapKind::Request, &fields)?;
    create(&state, token, swap).await
}

/// GET /api/swapOffersSent
async fn swap_offers_sent(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
) -> Result<Json<Vec<SwapOffer>>, ApiError> {
    let rows = SwapRepo::new(&state.pool).sent(token.as_deref()).await?;
    Ok(Json(rows))
}

/// GET /api/swapOffersReceived
async fn swap_offers_received(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
) -> Result<Json<Vec<SwapOffer>>, ApiError> {
    let rows = SwapRepo::new(&state.pool)
        .received(token.as_deref())
        .await?;
    Ok(Json(rows))
}

/// GET /api/swapOfferCoins?offerId=
async fn swap_offer_coins(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
    fields: FormFields,
) -> Result<Json<Vec<SwapOfferCoin>>, ApiError> {
    let Some(offer_id) = fields.parse("offerId")? else {
        tracing::debug!("offerId missing, skipping lookup");
        return Ok(Json(Vec::new()));
    };
    let rows = SwapRepo::new(&state.pool)
        .coins(token.as_deref(), offer_id)
        .await?;
    Ok(Json(rows))
}

async fn respond(
    state: &AppState,
    token: AccessToken,
    fields: &FormFields,
    accept: bool,
) -> Result<Json<Vec<SwapOffer>>, ApiError> {
    let offer_id = fields.required("offerId")?;
    let rows = SwapRepo::new(&state.pool)
        .respond(token.as_deref(), offer_id, accept)
        .await?;
    tracing::info!(swap_offer_id = offer_id, accept, "Swap answered");
    Ok(Json(rows))
}

/// POST /api/acceptSwapOffer
async fn accept_swap_offer(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
    fields: FormFields,
) -> Result<Json<Vec<SwapOffer>>, ApiError> {
    respond(&state, token, &fields, true).await
}

/// POST /api/rejectSwapOffer
async fn reject_swap_offer(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
    fields: FormFields,
) -> Result<Json<Vec<SwapOffer>>, ApiError> {
    respond(&state, token, &fields, false).await
}

/// POST /api/cancelSwapOffer
async fn cancel_swap_offer(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
    fields: FormFields,
) -> Result<Json<Vec<SwapOffer>>, ApiError> {
    let offer_id = fields.required("offerId")?;
    let rows = SwapRepo::new(&state.pool)
        .cancel(token.as_deref(), offer_id)
        .await?;
    Ok(Json(rows))
}

/// Swap routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/swapOffer", post(swap_offer))
        .route("/api/swapRequest", post(swap_request))
        .route("/api/swapOffersSent", get(swap_offers_sent))
        .route("/api/swapOffersReceived", get(swap_offers_received))
        .route("/api/swapOfferCoins", get(swap_offer_coins))
        .route("/api/acceptSwapOffer", post(accept_swap_offer))
        .route("/api/rejectSwapOffer", post(reject_swap_offer))
        .route("/api/cancelSwapOffer", post(cancel_swap_offer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_id_and_array_build_the_same_swap() {
        let single = FormFields::from_json(json!({ "recipient": "bob", "addedCoinIds": 3 })).unwrap();
        let array =
            FormFields::from_json(json!({ "recipient": "bob", "addedCoinIds": [3] })).unwrap();

        assert_eq!(
            new_swap(SwapKind::Offer, &single).unwrap(),
            new_swap(SwapKind::Offer, &array).unwrap()
        );
    }

    #[test]
    fn request_needs_owner() {
        let fields = FormFields::from_pairs([("recipient", "bob"), ("addedCoinIds", "3")]);
        let err = new_swap(SwapKind::Request, &fields).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation(crate::models::ValidationError::Missing { field: "owner" })
        ));
    }
}
