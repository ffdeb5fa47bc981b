//! Product model types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A catalog product as returned by every endpoint
///
/// This is the full API shape; storage-side timestamp columns never appear
/// here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Product {
    /// Store-assigned identifier, immutable once created
    #[schema(example = 1)]
    pub id: i32,

    #[schema(example = "Monitor Curvo de 49 Pulgadas")]
    pub name: String,

    #[schema(example = 300.0)]
    pub price: f64,

    /// Defaults to `true` when not supplied at creation
    #[schema(example = true)]
    pub availability: bool,
}

/// Validated input for creating a product
#[derive(Debug, Clone, PartialEq, ToSchema)]
pub struct NewProduct {
    #[schema(example = "Monitor Curvo de 49 Pulgadas")]
    pub name: String,

    #[schema(example = 300.0)]
    pub price: f64,
}

/// Validated input for a full update; every field replaces the stored value
#[derive(Debug, Clone, PartialEq, ToSchema)]
pub struct ProductUpdate {
    #[schema(example = "Monitor Curvo de 49 Pulgadas")]
    pub name: String,

    #[schema(example = 300.0)]
    pub price: f64,

    #[schema(example = true)]
    pub availability: bool,
}
