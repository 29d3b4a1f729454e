//! Data Transfer Objects for the HTTP API.
//!
//! Item payloads are the domain types from [`crate::models`]; this module only holds
//! the shapes that exist purely at the HTTP boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use crate::models::{FieldError, Item, ItemPayload, Message};

/// Service information returned by `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RootResponse {
    /// Welcome text
    pub message: String,
    /// Version of the service
    pub version: String,
    /// Location of the interactive documentation
    pub docs: String,
    /// Location of the health endpoint
    pub health: String,
    /// Location of the landing page
    pub landing_page: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Status of the service
    #[schema(example = "healthy")]
    pub status: String,
    /// Version of the service
    pub version: String,
    /// Time the check was answered
    pub timestamp: DateTime<Utc>,
}

/// Error body with a single human-readable detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    #[schema(example = "Item not found")]
    pub detail: String,
}

impl ErrorDetail {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Error body listing every field that failed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub detail: Vec<FieldError>,
}
