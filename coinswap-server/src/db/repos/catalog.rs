//! Catalog repository - public coin and mintage lookups

use sqlx::PgPool;

use crate::db::DbError;
use crate::models::{Coin, CoinMintage, CountrySummary, SearchTerm};

const COIN_COLUMNS: &str =
    "coin_id, country, name, denomination, issue_year, material, diameter_mm, weight_g, description";

/// Upper bound on search results
const SEARCH_LIMIT: i64 = 200;

/// Catalog repository
pub struct CatalogRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All catalog coins ordered by country, then issue year.
    pub async fn list(&self) -> Result<Vec<Coin>, DbError> {
        let sql = format!(
            "SELECT {} FROM coin ORDER BY country, issue_year, coin_id",
            COIN_COLUMNS
        );
        let coins = sqlx::query_as::<_, Coin>(&sql).fetch_all(self.pool).await?;
        Ok(coins)
    }

    /// Single coin as a (possibly empty) row set.
    pub async fn get(&self, coin_id: i32) -> Result<Vec<Coin>, DbError> {
        let sql = format!("SELECT {} FROM coin WHERE coin_id = $1", COIN_COLUMNS);
        let coins = sqlx::query_as::<_, Coin>(&sql)
            .bind(coin_id)
            .fetch_all(self.pool)
            .await?;
        Ok(coins)
    }

    pub async fn mintages(&self, coin_id: i32) -> Result<Vec<CoinMintage>, DbError> {
        let mintages = sqlx::query_as::<_, CoinMintage>(
            r#"
            SELECT mintage_id, coin_id, year, mint_mark, quantity
            FROM coin_mintage
            WHERE coin_id = $1
            ORDER BY year, mint_mark
            "#,
        )
        .bind(coin_id)
        .fetch_all(self.pool)
        .await?;
        Ok(mintages)
    }

    /// Countries with their coin counts (single GROUP BY query).
    pub async fn countries(&self) -> Result<Vec<CountrySummary>, DbError> {
        let countries = sqlx::query_as::<_, CountrySummary>(
            r#"
            SELECT country, COUNT(*) AS coin_count
            FROM coin
            GROUP BY country
            ORDER BY country
            "#,
        )
        .fetch_all(self.pool)
        .await?;
        Ok(countries)
    }

    pub async fn by_country(&self, country: &str) -> Result<Vec<Coin>, DbError> {
        let sql = format!(
            "SELECT {} FROM coin WHERE country = $1 ORDER BY issue_year, coin_id",
            COIN_COLUMNS
        );
        let coins = sqlx::query_as::<_, Coin>(&sql)
            .bind(country)
            .fetch_all(self.pool)
            .await?;
        Ok(coins)
    }

    /// Case-insensitive substring search over name, country, denomination
    /// and description.
    pub async fn search(&self, term: &SearchTerm) -> Result<Vec<Coin>, DbError> {
        let sql = format!(
            r#"
            SELECT {}
            FROM coin
            WHERE name ILIKE $1
               OR country ILIKE $1
               OR denomination ILIKE $1
               OR description ILIKE $1
            ORDER BY country, issue_year, coin_id
            LIMIT $2
            "#,
            COIN_COLUMNS
        );
        let coins = sqlx::query_as::<_, Coin>(&sql)
            .bind(term.like_pattern())
            .bind(SEARCH_LIMIT)
            .fetch_all(self.pool)
            .await?;
        Ok(coins)
    }
}
