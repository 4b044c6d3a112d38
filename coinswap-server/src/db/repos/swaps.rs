//! Swap repository - offers and requests between collectors

use sqlx::PgPool;

use crate::db::DbError;
use crate::models::{NewSwap, SwapKind, SwapOffer, SwapOfferCoin};

/// Swap offer/request repository
pub struct SwapRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> SwapRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist an offer or request with its full coin list in one call.
    ///
    /// The ids are bound as a single INTEGER[] argument.
    pub async fn create(&self, token: Option<&str>, swap: &NewSwap) -> Result<Vec<SwapOffer>, DbError> {
        let sql = match swap.kind {
            SwapKind::Offer => "SELECT * FROM create_swap_offer($1, $2, $3, $4)",
            SwapKind::Request => "SELECT * FROM create_swap_request($1, $2, $3, $4)",
        };

        let rows = sqlx::query_as::<_, SwapOffer>(sql)
            .bind(token)
            .bind(&swap.counterpart)
            .bind(&swap.added_coin_ids)
            .bind(swap.message.as_deref())
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn sent(&self, token: Option<&str>) -> Result<Vec<SwapOffer>, DbError> {
        let rows = sqlx::query_as::<_, SwapOffer>("SELECT * FROM swap_offers_sent($1)")
            .bind(token)
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn received(&self, token: Option<&str>) -> Result<Vec<SwapOffer>, DbError> {
        let rows = sqlx::query_as::<_, SwapOffer>("SELECT * FROM swap_offers_received($1)")
            .bind(token)
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    /// Coins of an offer; empty unless the caller sent or received it.
    pub async fn coins(
        &self,
        token: Option<&str>,
        swap_offer_id: i32,
    ) -> Result<Vec<SwapOfferCoin>, DbError> {
        let rows = sqlx::query_as::<_, SwapOfferCoin>("SELECT * FROM swap_offer_coins($1, $2)")
            .bind(token)
            .bind(swap_offer_id)
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    /// Accept or reject a pending offer addressed to the caller.
    pub async fn respond(
        &self,
        token: Option<&str>,
        swap_offer_id: i32,
        accept: bool,
    ) -> Result<Vec<SwapOffer>, DbError> {
        let rows = sqlx::query_as::<_, SwapOffer>("SELECT * FROM respond_swap_offer($1, $2, $3)")
            .bind(token)
            .bind(swap_offer_id)
            .bind(accept)
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    /// Withdraw a pending offer the caller sent.
    pub async fn cancel(
        &self,
        token: Option<&str>,
        swap_offer_id: i32,
    ) -> Result<Vec<SwapOffer>, DbError> {
        let rows = sqlx::query_as::<_, SwapOffer>("SELECT * FROM cancel_swap_offer($1, $2)")
            .bind(token)
            .bind(swap_offer_id)
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }
}
