use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use uuid::Uuid;
use wantbox_shared::{StoreError, ValidationError};

use crate::metrics;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Map a store failure for `operation`, keeping the response generic.
    ///
    /// `NotFound` becomes 404 "Item not found"; anything else is logged and
    /// reported as 500 with `public_message`.
    pub fn from_store(operation: &str, public_message: &str, err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::not_found("Item not found"),
            StoreError::Storage(source) => {
                tracing::error!(operation = operation, error = ?source, "database operation failed");
                metrics::STORAGE_ERRORS.with_label_values(&[operation]).inc();
                Self::internal(public_message)
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::bad_request(err.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let correlation_id = Uuid::new_v4().to_string();
        if self.status.is_server_error() {
            tracing::warn!(
                correlation_id = %correlation_id,
                status = self.status.as_u16(),
                message = %self.message,
                "request failed"
            );
        } else {
            tracing::debug!(
                correlation_id = %correlation_id,
                status = self.status.as_u16(),
                message = %self.message,
                "request rejected"
            );
        }

        let payload = ErrorResponse {
            error: self.message,
        };

        let mut response = (self.status, Json(payload)).into_response();
        if let Ok(value) = HeaderValue::from_str(&correlation_id) {
            response
                .headers_mut()
                .insert(header::HeaderName::from_static("x-correlation-id"), value);
        }
        response
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_error_body_and_correlation_header() {
        let response = ApiError::bad_request("invalid price").into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().contains_key("x-correlation-id"));
        assert_eq!(body_json(response).await, serde_json::json!({"error": "invalid price"}));
    }

    #[test]
    fn test_validation_error_maps_to_400() {
        let err: ApiError = ValidationError::new("price", "invalid price").into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "invalid price");
    }

    #[test]
    fn test_store_errors_are_generic() {
        let err = ApiError::from_store(
            "get wishlist item",
            "Failed to retrieve item",
            StoreError::NotFound {
                entity: "wishlist item",
                id: 3,
            },
        );
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Item not found");

        let err = ApiError::from_store(
            "create wishlist item",
            "Failed to save item",
            StoreError::Storage(sqlx::Error::PoolClosed),
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Failed to save item");
    }
}
