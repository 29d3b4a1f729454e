//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use super::handlers;
use super::openapi;
use super::state::AppState;
use crate::config::{
    CorsSettings, API_PREFIX, DOCS_PATH, HEALTH_PATH, LANDING_PAGE_PATH, MAX_BODY_BYTES,
    OPENAPI_PATH,
};

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    create_router_with_cors(state, &CorsSettings::default())
}

/// Same as [`create_router`] with an explicit CORS policy.
pub fn create_router_with_cors(state: AppState, cors: &CorsSettings) -> Router {
    let items = format!("{}/items", API_PREFIX);
    let item = format!("{}/items/{{item_id}}", API_PREFIX);

    Router::new()
        // Root and health
        .route("/", get(handlers::root))
        .route(LANDING_PAGE_PATH, get(handlers::landing_page))
        .route(HEALTH_PATH, get(handlers::health_check))
        // Items CRUD
        .route(&items, get(handlers::list_items).post(handlers::create_item))
        .route(
            &item,
            get(handlers::get_item)
                .put(handlers::update_item)
                .delete(handlers::delete_item),
        )
        // Documentation
        .route(DOCS_PATH, get(openapi::swagger_ui))
        .route(OPENAPI_PATH, get(openapi::openapi_json))
        .fallback(handlers::route_not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors))
        .with_state(state)
}

/// Build the CORS layer for `settings`.
///
/// Browsers refuse a literal `*` on credentialed requests, so wildcards combined with
/// credentials echo the request's origin, method and headers instead.
pub fn cors_layer(settings: &CorsSettings) -> CorsLayer {
    let credentials = settings.allow_credentials;

    let origin = match (settings.any_origin(), credentials) {
        (true, true) => AllowOrigin::mirror_request(),
        (true, false) => Any.into(),
        (false, _) => AllowOrigin::list(parse_all(&settings.allow_origins, |o| {
            o.parse::<HeaderValue>().ok()
        })),
    };

    let methods = match (settings.any_method(), credentials) {
        (true, true) => AllowMethods::mirror_request(),
        (true, false) => Any.into(),
        (false, _) => AllowMethods::list(parse_all(&settings.allow_methods, |m| {
            Method::from_bytes(m.to_uppercase().as_bytes()).ok()
        })),
    };

    let headers = match (settings.any_header(), credentials) {
        (true, true) => AllowHeaders::mirror_request(),
        (true, false) => Any.into(),
        (false, _) => AllowHeaders::list(parse_all(&settings.allow_headers, |h| {
            h.parse::<HeaderName>().ok()
        })),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(credentials)
}

fn parse_all<T>(values: &[String], parse: impl Fn(&str) -> Option<T>) -> Vec<T> {
    values
        .iter()
        .filter_map(|raw| {
            let parsed = parse(raw);
            if parsed.is_none() {
                warn!("Ignoring invalid CORS entry '{}'", raw);
            }
            parsed
        })
        .collect()
}
