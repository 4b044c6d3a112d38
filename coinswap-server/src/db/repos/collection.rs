//! Collection repository - a user's added coins and the swap market

use sqlx::PgPool;

use crate::db::DbError;
use crate::models::{AddedCoin, CoinDetails, NewAddedCoin};

/// Added-coin repository
pub struct CollectionRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CollectionRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// The caller's coins; empty without a live session.
    pub async fn user_coins(&self, token: Option<&str>) -> Result<Vec<AddedCoin>, DbError> {
        let rows = sqlx::query_as::<_, AddedCoin>("SELECT * FROM user_coins($1)")
            .bind(token)
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn user_coin(
        &self,
        token: Option<&str>,
        added_coin_id: i32,
    ) -> Result<Vec<AddedCoin>, DbError> {
        let rows = sqlx::query_as::<_, AddedCoin>("SELECT * FROM user_coin($1, $2)")
            .bind(token)
            .bind(added_coin_id)
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn add(
        &self,
        token: Option<&str>,
        coin: &NewAddedCoin,
    ) -> Result<Vec<AddedCoin>, DbError> {
        let details = &coin.details;
        let rows = sqlx::query_as::<_, AddedCoin>(
            "SELECT * FROM add_coin($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(token)
        .bind(coin.coin_id)
        .bind(coin.mintage_id)
        .bind(details.grade.as_deref())
        .bind(details.value)
        .bind(details.amount)
        .bind(details.comment.as_deref())
        .bind(details.swap)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Update metadata; unknown or foreign coins are `DbError::NotFound`.
    pub async fn update(
        &self,
        token: Option<&str>,
        added_coin_id: i32,
        details: &CoinDetails,
    ) -> Result<Vec<AddedCoin>, DbError> {
        let rows = sqlx::query_as::<_, AddedCoin>(
            "SELECT * FROM update_coin($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(token)
        .bind(added_coin_id)
        .bind(details.grade.as_deref())
        .bind(details.value)
        .bind(details.amount)
        .bind(details.comment.as_deref())
        .bind(details.swap)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn set_swap(
        &self,
        token: Option<&str>,
        added_coin_id: i32,
        swap: bool,
    ) -> Result<Vec<AddedCoin>, DbError> {
        let rows = sqlx::query_as::<_, AddedCoin>("SELECT * FROM set_swap($1, $2, $3)")
            .bind(token)
            .bind(added_coin_id)
            .bind(swap)
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn delete(&self, token: Option<&str>, added_coin_id: i32) -> Result<(), DbError> {
        let deleted: bool = sqlx::query_scalar("SELECT delete_coin($1, $2)")
            .bind(token)
            .bind(added_coin_id)
            .fetch_one(self.pool)
            .await?;

        if deleted {
            Ok(())
        } else {
            Err(DbError::NotFound(format!("added coin {}", added_coin_id)))
        }
    }

    /// Swap-flagged coins of every other user; empty without a live session.
    pub async fn swap_coins(&self, token: Option<&str>) -> Result<Vec<AddedCoin>, DbError> {
        let rows = sqlx::query_as::<_, AddedCoin>("SELECT * FROM swap_coins($1)")
            .bind(token)
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    /// Other users' swap coins whose catalog coin is on the caller's wanted list.
    pub async fn matching_swap_coins(
        &self,
        token: Option<&str>,
    ) -> Result<Vec<AddedCoin>, DbError> {
        let rows = sqlx::query_as::<_, AddedCoin>("SELECT * FROM matching_swap_coins($1)")
            .bind(token)
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    /// Public list of one user's swap coins.
    pub async fn user_swap_coins(&self, username: &str) -> Result<Vec<AddedCoin>, DbError> {
        let rows = sqlx::query_as::<_, AddedCoin>("SELECT * FROM user_swap_coins($1)")
            .bind(username)
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }
}
