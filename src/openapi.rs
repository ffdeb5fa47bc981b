//! OpenAPI documentation
//!
//! The document is generated from the handler annotations and served with
//! Swagger UI at `/docs`; the raw JSON lives at `/api-docs/openapi.json`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::health::{self, Health};
use crate::products::handlers;
use crate::products::{NewProduct, Product, ProductUpdate};
use crate::validation::{FieldLocation, ValidationErrors, ValidationIssue};

/// OpenAPI document for the product API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "REST API de Productos",
        version = "1.0.0",
        description = "API docs for products"
    ),
    paths(
        handlers::list_products,
        handlers::create_product,
        handlers::get_product,
        handlers::update_product,
        handlers::toggle_availability,
        handlers::delete_product,
        health::health,
    ),
    components(schemas(
        Product,
        NewProduct,
        ProductUpdate,
        ValidationErrors,
        ValidationIssue,
        FieldLocation,
        Health,
    )),
    tags(
        (name = "Products", description = "API operations related to products"),
        (name = "Health", description = "Service liveness")
    )
)]
pub struct ApiDoc;

/// Swagger UI router for `/docs`
pub fn docs_routes() -> Router {
    SwaggerUi::new("/docs")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_includes_every_route() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/products"));
        assert!(doc.paths.paths.contains_key("/api/products/{id}"));
        assert!(doc.paths.paths.contains_key("/health"));
    }

    #[test]
    fn test_document_metadata() {
        let doc = ApiDoc::openapi();
        assert_eq!(doc.info.title, "REST API de Productos");
        assert_eq!(doc.info.version, "1.0.0");
        assert_eq!(doc.info.description.as_deref(), Some("API docs for products"));
    }
}
