//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use super::dto::{ErrorDetail, ValidationErrorResponse};
use crate::db::RepositoryError;
use crate::models::ValidationErrors;

pub use crate::db::repository::error::ITEM_NOT_FOUND;

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Request path or body failed validation
    Validation(ValidationErrors),
    /// Request rejected before validation (e.g. body too large)
    Rejected { status: StatusCode, detail: String },
    /// Store lookup miss
    Repository(RepositoryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationErrorResponse { detail: errors.0 }),
            )
                .into_response(),
            AppError::Rejected { status, detail } => {
                (status, Json(ErrorDetail::new(detail))).into_response()
            }
            AppError::Repository(RepositoryError::NotFound { message, context }) => {
                debug!("{} {}", message, context);
                (StatusCode::NOT_FOUND, Json(ErrorDetail::new(message))).into_response()
            }
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FieldError, ItemId};

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_repository_not_found_maps_to_fixed_detail() {
        let err: AppError = RepositoryError::item_not_found("get_item", ItemId::new(1)).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"detail": ITEM_NOT_FOUND})
        );
    }

    #[tokio::test]
    async fn test_validation_maps_to_422() {
        let err: AppError = ValidationErrors::single(FieldError::missing(vec![
            "body".into(),
            "name".into(),
        ]))
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["detail"][0]["type"], "missing");
        assert_eq!(body["detail"][0]["loc"], serde_json::json!(["body", "name"]));
    }

    #[tokio::test]
    async fn test_rejection_keeps_status() {
        let err = AppError::Rejected {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            detail: "length limit exceeded".to_string(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"detail": "length limit exceeded"})
        );
    }
}
