//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service layer.
//! The `#[utoipa::path]` attributes feed the generated API document.

use axum::{extract::State, http::StatusCode, response::Html, Json};
use chrono::Utc;

use super::dto::{
    ErrorDetail, HealthResponse, Item, ItemPayload, Message, RootResponse,
    ValidationErrorResponse,
};
use super::error::AppError;
use super::extract::{ItemIdPath, ValidatedJson};
use super::state::AppState;
use crate::config::{APP_TITLE, DOCS_PATH, HEALTH_PATH, LANDING_PAGE_PATH, VERSION};
use crate::db::services as db_services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

const LANDING_PAGE: &str = include_str!("../../static/index.html");

// =============================================================================
// Root & Health
// =============================================================================

/// GET /
///
/// Basic service information and links.
#[utoipa::path(
    get,
    path = "/",
    tag = "Root",
    responses((status = 200, description = "Service information", body = RootResponse))
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: format!("Welcome to {}", APP_TITLE),
        version: VERSION.to_string(),
        docs: DOCS_PATH.to_string(),
        health: HEALTH_PATH.to_string(),
        landing_page: LANDING_PAGE_PATH.to_string(),
    })
}

/// GET /index.html
pub async fn landing_page() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

/// GET /health
///
/// Liveness check. Does not touch the item store.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service is alive", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: VERSION.to_string(),
        timestamp: Utc::now(),
    })
}

// =============================================================================
// Items CRUD
// =============================================================================

/// GET /api/items
///
/// List all items in creation order.
#[utoipa::path(
    get,
    path = "/api/items",
    tag = "Items",
    responses((status = 200, description = "All items", body = Vec<Item>))
)]
pub async fn list_items(State(state): State<AppState>) -> HandlerResult<Vec<Item>> {
    let items = db_services::list_items(state.repository.as_ref()).await?;
    Ok(Json(items))
}

/// GET /api/items/{item_id}
#[utoipa::path(
    get,
    path = "/api/items/{item_id}",
    tag = "Items",
    params(("item_id" = i64, Path, description = "Item identity")),
    responses(
        (status = 200, description = "The item", body = Item),
        (status = 404, description = "Item not found", body = ErrorDetail),
        (status = 422, description = "Invalid identity", body = ValidationErrorResponse)
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    ItemIdPath(id): ItemIdPath,
) -> HandlerResult<Item> {
    let item = db_services::get_item(state.repository.as_ref(), id).await?;
    Ok(Json(item))
}

/// POST /api/items
///
/// Create an item. Client-supplied `id` and `created_at` are ignored.
#[utoipa::path(
    post,
    path = "/api/items",
    tag = "Items",
    request_body = ItemPayload,
    responses(
        (status = 200, description = "The created item", body = Item),
        (status = 422, description = "Validation error", body = ValidationErrorResponse)
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ItemPayload>,
) -> HandlerResult<Item> {
    let item = db_services::create_item(state.repository.as_ref(), payload).await?;
    Ok(Json(item))
}

/// PUT /api/items/{item_id}
///
/// Replace an item. Its identity and creation time are kept.
#[utoipa::path(
    put,
    path = "/api/items/{item_id}",
    tag = "Items",
    params(("item_id" = i64, Path, description = "Item identity")),
    request_body = ItemPayload,
    responses(
        (status = 200, description = "The updated item", body = Item),
        (status = 404, description = "Item not found", body = ErrorDetail),
        (status = 422, description = "Validation error", body = ValidationErrorResponse)
    )
)]
pub async fn update_item(
    State(state): State<AppState>,
    ItemIdPath(id): ItemIdPath,
    ValidatedJson(payload): ValidatedJson<ItemPayload>,
) -> HandlerResult<Item> {
    let item = db_services::update_item(state.repository.as_ref(), id, payload).await?;
    Ok(Json(item))
}

/// DELETE /api/items/{item_id}
///
/// Delete an item. Responds with a confirmation envelope, not the item.
#[utoipa::path(
    delete,
    path = "/api/items/{item_id}",
    tag = "Items",
    params(("item_id" = i64, Path, description = "Item identity")),
    responses(
        (status = 200, description = "Deletion confirmation", body = Message),
        (status = 404, description = "Item not found", body = ErrorDetail),
        (status = 422, description = "Invalid identity", body = ValidationErrorResponse)
    )
)]
pub async fn delete_item(
    State(state): State<AppState>,
    ItemIdPath(id): ItemIdPath,
) -> HandlerResult<Message> {
    db_services::delete_item(state.repository.as_ref(), id).await?;
    Ok(Json(Message::new("Item deleted successfully")))
}

// =============================================================================
// Fallbacks
// =============================================================================

pub async fn route_not_found() -> (StatusCode, Json<ErrorDetail>) {
    (StatusCode::NOT_FOUND, Json(ErrorDetail::new("Not Found")))
}

pub async fn method_not_allowed() -> (StatusCode, Json<ErrorDetail>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorDetail::new("Method Not Allowed")),
    )
}
