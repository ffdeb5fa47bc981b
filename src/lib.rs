//! # productos-api
//!
//! REST API for a product catalog, backed by PostgreSQL with an in-memory
//! fallback store for local development and tests.
//!
//! ## Features
//!
//! - **CRUD over `/api/products`**: list, fetch, create, full update, availability toggle, delete
//! - **Field validation**: ordered, accumulated errors with Spanish user-facing messages
//! - **Storage**: `sqlx` PostgreSQL pool with retry/backoff, or an in-memory store
//! - **Observability**: structured JSON logs via `tracing`
//! - **OpenAPI**: Swagger UI served at `/docs`
//! - **Graceful shutdown**: SIGTERM/SIGINT handling
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use productos_api::prelude::*;
//! use productos_api::repository::InMemoryProductRepository;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Load configuration
//!     let config = Config::load()?;
//!
//!     // Initialize tracing
//!     init_tracing(&config)?;
//!
//!     // Build application state over an in-memory store
//!     let state = AppState::new(config.clone(), Arc::new(InMemoryProductRepository::new()));
//!
//!     // Create router and run the server
//!     let app = api_router(state);
//!     Server::new(config).serve(app).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod health;
pub mod observability;
pub mod openapi;
pub mod products;
pub mod repository;
pub mod responses;
pub mod routes;
pub mod server;
pub mod state;
pub mod validation;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{Config, CorsConfig, DatabaseConfig, ServiceConfig};

    pub use crate::error::{ApiError, Error, HandlerResult, Result};

    pub use crate::health::health;
    pub use crate::observability::init_tracing;
    pub use crate::products::{NewProduct, Product, ProductUpdate};
    pub use crate::repository::{
        ProductRepository, RepositoryError, RepositoryErrorKind, RepositoryOperation,
        RepositoryResult,
    };
    pub use crate::responses::{Created, Success};
    pub use crate::routes::api_router;
    pub use crate::server::Server;
    pub use crate::state::AppState;
    pub use crate::validation::{
        FieldLocation, NewProductInput, ProductId, ToggleProductInput, UpdateProductInput,
        ValidationErrors, ValidationIssue,
    };

    pub use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::{IntoResponse, Json, Response},
        routing::{delete, get, patch, post, put},
        Router,
    };

    pub use serde::{Deserialize, Serialize};

    // Re-export tracing macros for handler code
    pub use tracing::{debug, error, info, instrument, trace, warn};

    // Re-export async-trait for store implementations
    pub use async_trait::async_trait;
}
