//! Product HTTP handlers
//!
//! Handlers only run with already validated input (see
//! [`crate::validation`]) and always produce exactly one response: a
//! missing product returns early with 404, and store failures propagate
//! with `?` into the generic 500 mapping.

use axum::{extract::State, Json};
use tracing::{info, instrument};

use crate::error::{ApiError, HandlerResult};
use crate::products::{NewProduct, Product, ProductUpdate};
use crate::responses::{Created, Success};
use crate::state::AppState;
use crate::validation::{
    NewProductInput, ProductId, ToggleProductInput, UpdateProductInput, ValidationErrors,
};

/// Confirmation body for successful deletes
pub const PRODUCT_DELETED: &str = "Producto Eliminado";

/// List every product, ordered by ascending id
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    responses(
        (status = 200, description = "All products, ascending by id", body = Vec<Product>)
    )
)]
#[instrument(skip(state))]
pub async fn list_products(State(state): State<AppState>) -> HandlerResult<Success<Vec<Product>>> {
    let products = state.products().find_all().await?;
    Ok(Success::new(products))
}

/// Fetch one product by id
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product", body = Product),
        (status = 400, description = "Invalid id", body = ValidationErrors),
        (status = 404, description = "Product not found")
    )
)]
#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> HandlerResult<Success<Product>> {
    let product = state
        .products()
        .find_by_id(id)
        .await?
        .ok_or(ApiError::ProductNotFound)?;

    Ok(Success::new(product))
}

/// Create a product
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = NewProduct,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Validation failed", body = ValidationErrors)
    )
)]
#[instrument(skip(state))]
pub async fn create_product(
    State(state): State<AppState>,
    NewProductInput(input): NewProductInput,
) -> HandlerResult<Created<Product>> {
    let product = state.products().create(input).await?;
    info!(id = product.id, "Product created");

    let location = format!("/api/products/{}", product.id);
    Ok(Created::new(product).with_location(location))
}

/// Replace every field of a product
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id")),
    request_body = ProductUpdate,
    responses(
        (status = 200, description = "Updated product", body = Product),
        (status = 400, description = "Validation failed", body = ValidationErrors),
        (status = 404, description = "Product not found")
    )
)]
#[instrument(skip(state))]
pub async fn update_product(
    State(state): State<AppState>,
    input: UpdateProductInput,
) -> HandlerResult<Success<Product>> {
    let UpdateProductInput { id, update } = input;

    let mut product = state
        .products()
        .find_by_id(id)
        .await?
        .ok_or(ApiError::ProductNotFound)?;

    product.name = update.name;
    product.price = update.price;
    product.availability = update.availability;
    state.products().save(&product).await?;

    Ok(Success::new(product))
}

/// Flip a product's stored availability
///
/// The new value is the negation of what is persisted; clients cannot pick
/// a target value.
#[utoipa::path(
    patch,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product with availability flipped", body = Product),
        (status = 400, description = "Validation failed", body = ValidationErrors),
        (status = 404, description = "Product not found")
    )
)]
#[instrument(skip(state))]
pub async fn toggle_availability(
    State(state): State<AppState>,
    input: ToggleProductInput,
) -> HandlerResult<Success<Product>> {
    let mut product = state
        .products()
        .find_by_id(input.id)
        .await?
        .ok_or(ApiError::ProductNotFound)?;

    product.availability = !product.availability;
    state.products().save(&product).await?;

    Ok(Success::new(product))
}

/// Remove a product
///
/// Responds with a bare confirmation string rather than a data envelope.
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Deletion confirmation", body = String),
        (status = 400, description = "Invalid id", body = ValidationErrors),
        (status = 404, description = "Product not found")
    )
)]
#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> HandlerResult<Json<&'static str>> {
    let product = state
        .products()
        .find_by_id(id)
        .await?
        .ok_or(ApiError::ProductNotFound)?;

    state.products().destroy(&product).await?;
    info!(id, "Product deleted");

    Ok(Json(PRODUCT_DELETED))
}
