//! Store port for products
//!
//! Handlers never talk to the database driver directly; they go through
//! [`ProductRepository`], held as `Arc<dyn ProductRepository>` in the
//! application state. That keeps the Postgres and in-memory backends
//! interchangeable and lets tests inject a failing store.

use async_trait::async_trait;

use super::error::RepositoryError;
use crate::products::{NewProduct, Product};

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Store operations the product handlers rely on
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product. The store assigns the id and defaults
    /// availability to `true`.
    async fn create(&self, input: NewProduct) -> RepositoryResult<Product>;

    /// All products, ordered by ascending id.
    async fn find_all(&self) -> RepositoryResult<Vec<Product>>;

    /// Look up one product. `Ok(None)` when the id does not exist.
    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;

    /// Persist the product's current field values under its id.
    async fn save(&self, product: &Product) -> RepositoryResult<()>;

    /// Remove the product. Removing an already absent row is not an error.
    async fn destroy(&self, product: &Product) -> RepositoryResult<()>;
}
