//! API error types with IntoResponse
//!
//! Storage details are logged and never sent to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;

/// API error type with automatic HTTP status mapping
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Store could not be reached (503, logged)
    #[error("storage unavailable")]
    Unavailable(#[source] DbError),

    /// Any other database failure (500, logged)
    #[error("database error")]
    Database(#[source] DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            Self::Unavailable(e) => {
                tracing::error!("Storage unavailable: {}", e);
                (StatusCode::SERVICE_UNAVAILABLE, "storage_unavailable")
            }
            Self::Database(e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        let body = json!({
            "error": code,
            "message": self.to_string()
        });

        (status, Json(body)).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        if e.is_unavailable() {
            Self::Unavailable(e)
        } else {
            Self::Database(e)
        }
    }
}
