//! API error types with IntoResponse
//!
//! Every error is rendered as `{"success": false, "error": <status>, "message": ...}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::error::Error;
use crate::models::ValidationError;

/// Message for duplicate question text
pub const DUPLICATE_MESSAGE: &str = "Question already exists, please insert a new one";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or invalid input (400)
    BadRequest { message: String },

    /// Resource not found (404)
    NotFound { message: String },

    /// Path exists but not for this verb (405)
    MethodNotAllowed,

    /// Database error (500, logged)
    Database(DbError),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::BadRequest { message } | Self::NotFound { message } => message,
            Self::MethodNotAllowed => "Method Not Allowed".to_owned(),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                "An internal error occurred".to_owned()
            }
        };

        let body = json!({
            "success": false,
            "error": status.as_u16(),
            "message": message,
        });

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::bad_request(e.to_string())
    }
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        match e {
            Error::NotFound(message) => Self::NotFound { message },
            Error::Validation(e) => e.into(),
            Error::DuplicateEntry(_) => Self::bad_request(DUPLICATE_MESSAGE),
            Error::UnknownCategory(id) => Self::bad_request(format!("Category {} does not exist", id)),
            Error::Database(e) => Self::Database(e),
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
    async fn not_found_envelope() {
        let response = ApiError::not_found("Question not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(
            body,
            json!({"success": false, "error": 404, "message": "Question not found"})
        );
    }

    #[tokio::test]
    async fn method_not_allowed_message() {
        let response = ApiError::MethodNotAllowed.into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Method Not Allowed");
        assert_eq!(body["error"], 405);
    }

    #[tokio::test]
    async fn duplicate_is_400() {
        let err = ApiError::from(Error::DuplicateEntry("Who?".into()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], DUPLICATE_MESSAGE);
    }

    #[tokio::test]
    async fn database_error_hides_details() {
        let err = ApiError::from(Error::Database(DbError::Sqlx(sqlx::Error::PoolTimedOut)));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "An internal error occurred");
    }
}
