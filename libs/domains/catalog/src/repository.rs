use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::Product;

/// Repository trait for Product persistence
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Create a new product
    async fn create(&self, product: Product) -> CatalogResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>>;

    /// List all products, newest first
    async fn list_all(&self) -> CatalogResult<Vec<Product>>;

    /// Update an existing product record in full
    async fn update(&self, product: Product) -> CatalogResult<Product>;

    /// Delete a product by ID; returns whether a record was removed
    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;

    /// Case-insensitive substring search over name and description
    async fn search(&self, query: &str) -> CatalogResult<Vec<Product>>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

fn sorted_newest_first(mut products: Vec<Product>) -> Vec<Product> {
    products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    products
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: Product) -> CatalogResult<Product> {
        let mut products = self.products.write().await;
        products.insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, name = %product.name, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn list_all(&self) -> CatalogResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(sorted_newest_first(products.values().cloned().collect()))
    }

    async fn update(&self, product: Product) -> CatalogResult<Product> {
        let mut products = self.products.write().await;

        if !products.contains_key(&product.id) {
            return Err(CatalogError::NotFound(product.id));
        }

        products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let mut products = self.products.write().await;

        if products.remove(&id).is_some() {
            tracing::info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn search(&self, query: &str) -> CatalogResult<Vec<Product>> {
        let needle = query.to_lowercase();
        let products = self.products.read().await;

        let matches = products
            .values()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();

        Ok(sorted_newest_first(matches))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, description: &str) -> Product {
        Product::new(
            Uuid::now_v7(),
            name.to_string(),
            9.99,
            description.to_string(),
        )
    }

    #[tokio::test]
    async fn create_and_get_product() {
        let repo = InMemoryProductRepository::new();

        let created = repo.create(product("Lamp", "A lamp")).await.unwrap();
        let fetched = repo.get_by_id(created.id).await.unwrap();

        assert_eq!(fetched.unwrap().name, "Lamp");
    }

    #[tokio::test]
    async fn search_matches_name_or_description_case_insensitively() {
        let repo = InMemoryProductRepository::new();
        repo.create(product("Test Product 1", "First")).await.unwrap();
        repo.create(product("Test Product 2", "Second")).await.unwrap();
        repo.create(product("Another Product", "nothing here"))
            .await
            .unwrap();
        repo.create(product("Misc", "useful for a test setup"))
            .await
            .unwrap();

        let by_name = repo.search("test product").await.unwrap();
        assert_eq!(by_name.len(), 2);

        // "test" also matches the description of "Misc"
        let broad = repo.search("TEST").await.unwrap();
        assert_eq!(broad.len(), 3);

        let none = repo.search("widget").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn update_missing_product_is_not_found() {
        let repo = InMemoryProductRepository::new();
        let result = repo.update(product("Ghost", "never created")).await;
        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_reports_whether_a_record_existed() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(product("Lamp", "A lamp")).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn list_all_returns_newest_first() {
        let repo = InMemoryProductRepository::new();
        let first = repo.create(product("First", "a")).await.unwrap();
        let second = repo.create(product("Second", "b")).await.unwrap();

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
    }
}
