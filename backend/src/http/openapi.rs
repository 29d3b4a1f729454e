//! Generated API document and the Swagger UI page that renders it.
//!
//! The document is derived from the `#[utoipa::path]` attributes on the handlers and
//! the `ToSchema` derives on the payload types. Only Swagger UI is served; there is no
//! ReDoc page.

use axum::{response::Html, Json};
use utoipa::OpenApi;

use super::dto::{
    ErrorDetail, FieldError, HealthResponse, Item, ItemPayload, Message, RootResponse,
    ValidationErrorResponse,
};
use super::handlers;
use crate::config::{APP_DESCRIPTION, APP_TITLE, OPENAPI_PATH, VERSION};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::root,
        handlers::health_check,
        handlers::list_items,
        handlers::get_item,
        handlers::create_item,
        handlers::update_item,
        handlers::delete_item
    ),
    components(schemas(
        Item,
        ItemPayload,
        Message,
        FieldError,
        ErrorDetail,
        ValidationErrorResponse,
        RootResponse,
        HealthResponse
    )),
    tags(
        (name = "Root", description = "Service information"),
        (name = "Health", description = "Liveness"),
        (name = "Items", description = "Item CRUD operations")
    )
)]
pub struct ApiDoc;

/// The API document with the service metadata filled in.
pub fn api_doc() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = APP_TITLE.to_string();
    doc.info.version = VERSION.to_string();
    doc.info.description = Some(APP_DESCRIPTION.to_string());
    doc
}

/// GET /openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(api_doc())
}

/// GET /docs
pub async fn swagger_ui() -> Html<String> {
    Html(swagger_ui_html(&format!("{} - Swagger UI", APP_TITLE), OPENAPI_PATH))
}

/// Swagger UI page loading the document from `spec_url`.
pub fn swagger_ui_html(title: &str, spec_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui.css">
    <style>
        body {{
            margin: 0;
            padding: 0;
        }}
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = function() {{
            window.ui = SwaggerUIBundle({{
                url: '{spec_url}',
                dom_id: '#swagger-ui',
                deepLinking: true,
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIBundle.SwaggerUIStandalonePreset
                ],
                layout: "BaseLayout"
            }});
        }};
    </script>
</body>
</html>"#,
        title = title,
        spec_url = spec_url
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_metadata() {
        let doc = api_doc();
        assert_eq!(doc.info.title, APP_TITLE);
        assert_eq!(doc.info.version, VERSION);
    }

    #[test]
    fn test_document_lists_every_route() {
        let doc = serde_json::to_value(api_doc()).unwrap();
        let paths = doc["paths"].as_object().unwrap();
        for path in ["/", "/health", "/api/items", "/api/items/{item_id}"] {
            assert!(paths.contains_key(path), "missing {}", path);
        }
        let item_ops = paths["/api/items/{item_id}"].as_object().unwrap();
        assert!(item_ops.contains_key("get"));
        assert!(item_ops.contains_key("put"));
        assert!(item_ops.contains_key("delete"));
        assert!(doc["components"]["schemas"]["Item"].is_object());
    }

    #[test]
    fn test_swagger_page_points_at_document() {
        let html = swagger_ui_html("Docs", "/openapi.json");
        assert!(html.contains("<title>Docs</title>"));
        assert!(html.contains("url: '/openapi.json'"));
    }
}
