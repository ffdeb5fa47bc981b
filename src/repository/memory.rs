//! In-memory product store
//!
//! Selected when no `[database]` section is configured; also backs the
//! router tests. Ids are assigned sequentially starting at 1, like a
//! SERIAL column.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::traits::{ProductRepository, RepositoryResult};
use crate::products::{NewProduct, Product};

/// Product store kept in process memory
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: i32,
    products: BTreeMap<i32, Product>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: NewProduct) -> RepositoryResult<Product> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let product = Product {
            id: inner.next_id,
            name: input.name,
            price: input.price,
            availability: true,
        };
        inner.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Product>> {
        // BTreeMap iterates in key order, which is ascending id
        Ok(self.inner.read().await.products.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<Product>> {
        Ok(self.inner.read().await.products.get(&id).cloned())
    }

    async fn save(&self, product: &Product) -> RepositoryResult<()> {
        let mut inner = self.inner.write().await;
        if let Some(stored) = inner.products.get_mut(&product.id) {
            *stored = product.clone();
        }
        Ok(())
    }

    async fn destroy(&self, product: &Product) -> RepositoryResult<()> {
        self.inner.write().await.products.remove(&product.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor() -> NewProduct {
        NewProduct {
            name: "Monitor Curvo de 49 Pulgadas".to_string(),
            price: 300.0,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids_and_defaults_availability() {
        let repo = InMemoryProductRepository::new();

        let first = repo.create(monitor()).await.unwrap();
        let second = repo
            .create(NewProduct {
                name: "Teclado".to_string(),
                price: 50.0,
            })
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(first.availability);
        assert!(second.availability);
    }

    #[tokio::test]
    async fn test_find_all_is_ascending_by_id() {
        let repo = InMemoryProductRepository::new();
        for price in [10.0, 20.0, 30.0] {
            repo.create(NewProduct {
                name: format!("Producto {price}"),
                price,
            })
            .await
            .unwrap();
        }

        let all = repo.find_all().await.unwrap();
        let ids: Vec<i32> = all.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_find_by_id_absent_is_none() {
        let repo = InMemoryProductRepository::new();
        assert!(repo.find_by_id(2000).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_persists_field_changes() {
        let repo = InMemoryProductRepository::new();
        let mut product = repo.create(monitor()).await.unwrap();

        product.price = 250.0;
        product.availability = false;
        repo.save(&product).await.unwrap();

        let stored = repo.find_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(stored.price, 250.0);
        assert!(!stored.availability);
    }

    #[tokio::test]
    async fn test_save_on_removed_product_does_not_resurrect() {
        let repo = InMemoryProductRepository::new();
        let product = repo.create(monitor()).await.unwrap();

        repo.destroy(&product).await.unwrap();
        repo.save(&product).await.unwrap();

        assert!(repo.find_by_id(product.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_destroy_removes_and_is_tolerant_of_absence() {
        let repo = InMemoryProductRepository::new();
        let product = repo.create(monitor()).await.unwrap();

        repo.destroy(&product).await.unwrap();
        assert!(repo.find_by_id(product.id).await.unwrap().is_none());

        // Second destroy of the same product is a no-op
        repo.destroy(&product).await.unwrap();
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_destroy() {
        let repo = InMemoryProductRepository::new();
        let first = repo.create(monitor()).await.unwrap();
        repo.destroy(&first).await.unwrap();

        let next = repo.create(monitor()).await.unwrap();
        assert_eq!(next.id, 2);
    }
}
