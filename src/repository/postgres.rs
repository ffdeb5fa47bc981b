//! Postgres-backed product store
//!
//! Queries select only the four API-visible columns; the table's timestamp
//! columns stay out of responses by construction.

use async_trait::async_trait;
use sqlx::PgPool;

use super::error::{RepositoryError, RepositoryOperation};
use super::traits::{ProductRepository, RepositoryResult};
use crate::products::{NewProduct, Product};

/// Product store backed by the `products` table
#[derive(Debug, Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: NewProduct) -> RepositoryResult<Product> {
        sqlx::query_as::<_, Product>(
            "INSERT INTO products (name, price) VALUES ($1, $2) \
             RETURNING id, name, price, availability",
        )
        .bind(&input.name)
        .bind(input.price)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| RepositoryError::from_sqlx(RepositoryOperation::Create, err))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Product>> {
        sqlx::query_as::<_, Product>(
            "SELECT id, name, price, availability FROM products ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|err| RepositoryError::from_sqlx(RepositoryOperation::FindAll, err))
    }

    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<Product>> {
        sqlx::query_as::<_, Product>(
            "SELECT id, name, price, availability FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| RepositoryError::from_sqlx(RepositoryOperation::FindById, err))
    }

    async fn save(&self, product: &Product) -> RepositoryResult<()> {
        sqlx::query(
            "UPDATE products SET name = $2, price = $3, availability = $4, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(product.availability)
        .execute(&self.pool)
        .await
        .map_err(|err| RepositoryError::from_sqlx(RepositoryOperation::Update, err))?;

        Ok(())
    }

    async fn destroy(&self, product: &Product) -> RepositoryResult<()> {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product.id)
            .execute(&self.pool)
            .await
            .map_err(|err| RepositoryError::from_sqlx(RepositoryOperation::Delete, err))?;

        Ok(())
    }
}
