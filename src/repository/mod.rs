//! Product persistence: the store port and its implementations

mod error;
mod memory;
mod postgres;
mod traits;

pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
pub use memory::InMemoryProductRepository;
pub use postgres::PgProductRepository;
pub use traits::{ProductRepository, RepositoryResult};
