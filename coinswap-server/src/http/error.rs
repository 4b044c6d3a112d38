//! API error types with IntoResponse
//!
//! Errors are converted to `{"error": code, "message": text}` JSON bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Body could not be decoded (400)
    Malformed { message: String },

    /// Missing or expired session on a write (401)
    Unauthorized { message: String },

    /// Resource not found (404)
    NotFound { message: String },

    /// Unique constraint violated (409)
    Conflict { message: String },

    /// Refused by a stored procedure or constraint (422)
    Rejected { message: String },

    /// Database error (500, logged)
    Database(DbError),

    /// Internal error (500, logged)
    Internal { message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Malformed { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Rejected { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Database(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short machine-readable code, also used for login/sign-up redirects.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::Malformed { .. } => "malformed_request",
            Self::Unauthorized { .. } => "unauthorized",
            Self::NotFound { .. } => "not_found",
            Self::Conflict { .. } => "conflict",
            Self::Rejected { .. } => "rejected",
            Self::Database(_) | Self::Internal { .. } => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let message = match self {
            Self::Validation(e) => e.to_string(),
            Self::Malformed { message }
            | Self::Unauthorized { message }
            | Self::NotFound { message }
            | Self::Conflict { message }
            | Self::Rejected { message } => message,
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                "an internal error occurred".to_string()
            }
            Self::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                "an internal error occurred".to_string()
            }
        };

        (
            status,
            Json(json!({
                "error": code,
                "message": message
            })),
        )
            .into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound(message) => Self::NotFound { message },
            DbError::Unauthorized(message) => Self::Unauthorized { message },
            DbError::Conflict(message) => Self::Conflict { message },
            DbError::Rejected(message) => Self::Rejected { message },
            other => Self::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::Validation(ValidationError::Missing { field: "coinId" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["message"], "coinId is required");
    }

    #[tokio::test]
    async fn database_error_hides_details() {
        let err = ApiError::from(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "an internal error occurred");
    }

    #[test]
    fn db_errors_map_to_statuses() {
        let cases = [
            (DbError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (DbError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (DbError::Conflict("x".into()), StatusCode::CONFLICT),
            (DbError::Rejected("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
        ];
        for (db, status) in cases {
            assert_eq!(ApiError::from(db).status(), status);
        }
    }

    #[tokio::test]
    async fn rejected_keeps_procedure_message() {
        let response = ApiError::from(DbError::Rejected("coin is not marked for swap".into()))
            .into_response();
        let body = body_json(response).await;
        assert_eq!(body["error"], "rejected");
        assert_eq!(body["message"], "coin is not marked for swap");
    }
}
