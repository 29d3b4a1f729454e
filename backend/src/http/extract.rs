//! Request extractors that validate before a handler runs.
//!
//! Both extractors reject with [`AppError::Validation`], so a handler only ever sees
//! a well-formed identity and a fully validated body.

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde_json::Value;

use super::error::AppError;
use crate::models::{FieldError, ItemId, Validate, ValidationErrors};

/// Item identity taken from the `{item_id}` path segment.
#[derive(Debug, Clone, Copy)]
pub struct ItemIdPath(pub ItemId);

impl<S> FromRequestParts<S> for ItemIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                AppError::Validation(ValidationErrors::single(FieldError::new(
                    "int_parsing",
                    vec!["path".to_string(), "item_id".to_string()],
                    "Input should be a valid integer, unable to parse string as an integer",
                )))
            })?;
        Ok(Self(ItemId::new(raw)))
    }
}

/// JSON body run through [`Validate`].
///
/// The body is parsed without looking at `Content-Type`. An empty body counts as a
/// missing body.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Rejected {
                status: rejection.status(),
                detail: rejection.body_text(),
            })?;

        let root = T::ROOT.to_string();
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(ValidationErrors::single(FieldError::missing(vec![root])).into());
        }

        let value: Value = serde_json::from_slice(&bytes).map_err(|e| {
            ValidationErrors::single(FieldError::new(
                "json_invalid",
                vec![root, e.column().to_string()],
                format!("JSON decode error: {}", e),
            ))
        })?;

        Ok(Self(T::validate(&value)?))
    }
}
