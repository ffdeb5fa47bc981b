//! Router assembly
//!
//! All product routes live under `/api/products`; `/api` is a plain
//! reachability index and `/docs` serves the Swagger UI.

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::health;
use crate::openapi;
use crate::products::handlers;
use crate::state::AppState;

/// Build the full application router
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/products", product_routes())
        .route("/api", get(api_index))
        .route("/health", get(health::health))
        .with_state(state)
        .merge(openapi::docs_routes())
}

fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/{id}",
            get(handlers::get_product)
                .put(handlers::update_product)
                .patch(handlers::toggle_availability)
                .delete(handlers::delete_product),
        )
}

/// Plain index the frontend pings to confirm the API is reachable
async fn api_index() -> Json<Value> {
    Json(json!({ "msg": "Desde API" }))
}
