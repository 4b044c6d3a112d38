//! Session repository - sign_up / login / logout procedures

use sqlx::PgPool;

use crate::db::DbError;
use crate::models::{Credentials, SessionInfo, SessionToken, SignUp};

/// Session repository
pub struct SessionRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> SessionRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Register a user and open their first session.
    ///
    /// Duplicate usernames/emails surface as `DbError::Conflict`,
    /// rule violations as `DbError::Rejected`.
    pub async fn sign_up(&self, input: &SignUp) -> Result<SessionToken, DbError> {
        let token = sqlx::query_as::<_, SessionToken>(
            "SELECT access_token, expiration FROM sign_up($1, $2, $3)",
        )
        .bind(&input.username)
        .bind(&input.email)
        .bind(&input.password)
        .fetch_one(self.pool)
        .await?;
        Ok(token)
    }

    /// Open a session, or `None` when the credentials do not match.
    pub async fn login(&self, credentials: &Credentials) -> Result<Option<SessionToken>, DbError> {
        let token = sqlx::query_as::<_, SessionToken>(
            "SELECT access_token, expiration FROM login($1, $2)",
        )
        .bind(&credentials.username)
        .bind(&credentials.password)
        .fetch_optional(self.pool)
        .await?;
        Ok(token)
    }

    /// Invalidate a session server-side.
    pub async fn logout(&self, token: &str) -> Result<(), DbError> {
        sqlx::query("SELECT logout($1)")
            .bind(token)
            .execute(self.pool)
            .await?;
        Ok(())
    }

    /// Live session details; empty for a missing or expired token.
    pub async fn info(&self, token: Option<&str>) -> Result<Vec<SessionInfo>, DbError> {
        let rows = sqlx::query_as::<_, SessionInfo>(
            "SELECT user_id, username, email, expiration FROM session_info($1)",
        )
        .bind(token)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }
}
