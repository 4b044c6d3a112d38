//! Wanted-coin repository

use sqlx::PgPool;

use crate::db::DbError;
use crate::models::WantedCoin;

/// Wanted-coin repository
pub struct WantedRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> WantedRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, token: Option<&str>) -> Result<Vec<WantedCoin>, DbError> {
        let rows = sqlx::query_as::<_, WantedCoin>("SELECT * FROM wanted_coins($1)")
            .bind(token)
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    /// Mark a coin as wanted (idempotent).
    pub async fn add(&self, token: Option<&str>, coin_id: i32) -> Result<Vec<WantedCoin>, DbError> {
        let rows = sqlx::query_as::<_, WantedCoin>("SELECT * FROM add_wanted_coin($1, $2)")
            .bind(token)
            .bind(coin_id)
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn remove(&self, token: Option<&str>, coin_id: i32) -> Result<(), DbError> {
        let removed: bool = sqlx::query_scalar("SELECT remove_wanted_coin($1, $2)")
            .bind(token)
            .bind(coin_id)
            .fetch_one(self.pool)
            .await?;

        if removed {
            Ok(())
        } else {
            Err(DbError::NotFound(format!("wanted coin {}", coin_id)))
        }
    }
}
