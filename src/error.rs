use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Error taxonomy for the whole service.
///
/// Every handler and service converts failures into one of these variants at
/// its own boundary; raw sqlx errors never reach the wire. Nothing is retried
/// here; re-invoking after a `Conflict` is the caller's decision.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// A lifecycle transaction hit an unexpected zero-rows outcome (or an
    /// empty precondition) and was rolled back.
    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the caller. Database and internal failures are logged
    /// with full detail server-side but surface only a generic message.
    fn public_message(&self) -> String {
        match self {
            AppError::Validation(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => msg.clone(),
            AppError::Database(_) | AppError::Internal(_) => {
                "Internal server error, please try again".to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Database(e) => tracing::error!(error = %e, "database error"),
            AppError::Internal(msg) => tracing::error!(error = %msg, "internal error"),
            AppError::Conflict(msg) => tracing::warn!(reason = %msg, "operation rejected"),
            _ => {}
        }

        let status = self.status_code();
        let body = Json(json!({ "message": self.public_message() }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let error = AppError::Validation("missing fields".to_string());
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.public_message(), "missing fields");
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let error = AppError::NotFound("Client 7 not found".to_string());
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_maps_to_500_with_descriptive_message() {
        let error = AppError::Conflict("nothing to cancel".to_string());
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.public_message(), "nothing to cancel");
    }

    #[test]
    fn test_database_error_does_not_leak_detail() {
        let error = AppError::Database(sqlx::Error::RowNotFound);
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!error.public_message().to_lowercase().contains("row"));
    }

    #[tokio::test]
    async fn test_response_body_carries_message_field() {
        let response = AppError::Validation("bad input".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "bad input");
    }
}
