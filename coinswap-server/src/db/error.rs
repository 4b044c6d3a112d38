//! Database error type
//!
//! Stored procedures report failures with SQLSTATE codes; those are mapped
//! to variants the HTTP layer can turn into status codes.

use std::path::PathBuf;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    #[error("not found: {0}")]
    NotFound(String),

    /// Missing or expired session (SQLSTATE 28000)
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Unique constraint violated (SQLSTATE 23505)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Input refused by a constraint or procedure (22xxx, 23xxx, P0001)
    #[error("rejected: {0}")]
    Rejected(String),

    /// Schema script could not be read
    #[error("failed to read SQL script {path:?}: {source}")]
    Script {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl DbError {
    /// Map a SQLSTATE code to a client-facing variant, if it has one.
    pub fn from_sqlstate(code: &str, message: String) -> Option<Self> {
        match code {
            "28000" => Some(Self::Unauthorized(message)),
            "P0002" => Some(Self::NotFound(message)),
            "23505" => Some(Self::Conflict(message)),
            "P0001" => Some(Self::Rejected(message)),
            c if c.starts_with("22") || c.starts_with("23") => Some(Self::Rejected(message)),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        let classified = err
            .as_database_error()
            .and_then(|e| e.code().map(|c| (c.into_owned(), e.message().to_owned())));

        match classified.and_then(|(code, message)| Self::from_sqlstate(&code, message)) {
            Some(mapped) => mapped,
            None => Self::Sqlx(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_session_errors_to_unauthorized() {
        let err = DbError::from_sqlstate("28000", "not logged in".into());
        assert!(matches!(err, Some(DbError::Unauthorized(m)) if m == "not logged in"));
    }

    #[test]
    fn maps_constraint_classes() {
        assert!(matches!(
            DbError::from_sqlstate("23505", String::new()),
            Some(DbError::Conflict(_))
        ));
        assert!(matches!(
            DbError::from_sqlstate("23514", String::new()),
            Some(DbError::Rejected(_))
        ));
        assert!(matches!(
            DbError::from_sqlstate("22023", String::new()),
            Some(DbError::Rejected(_))
        ));
        assert!(matches!(
            DbError::from_sqlstate("P0001", String::new()),
            Some(DbError::Rejected(_))
        ));
        assert!(matches!(
            DbError::from_sqlstate("P0002", String::new()),
            Some(DbError::NotFound(_))
        ));
    }

    #[test]
    fn infrastructure_codes_stay_unclassified() {
        assert!(DbError::from_sqlstate("08006", String::new()).is_none());
        assert!(DbError::from_sqlstate("42P01", String::new()).is_none());
    }

    #[test]
    fn non_database_errors_are_sqlx() {
        let err = DbError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, DbError::Sqlx(sqlx::Error::RowNotFound)));
    }
}
