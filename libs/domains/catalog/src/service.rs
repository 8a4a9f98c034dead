use std::sync::Arc;
use uuid::Uuid;

use access_control::{authorize, Actor, Decision, Operation};

use crate::error::{CatalogError, CatalogResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Service layer for catalog business logic.
///
/// Every operation takes the requesting actor (or `None` for an
/// unauthenticated request) and checks the access policy before
/// touching the repository, so a denied caller cannot learn whether a
/// record exists.
#[derive(Clone)]
pub struct CatalogService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> CatalogService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a product owned by the requesting actor
    pub async fn create_product(
        &self,
        actor: Option<&Actor>,
        input: CreateProduct,
    ) -> CatalogResult<Product> {
        self.ensure(authorize(actor, Operation::CreateProduct, None))?;

        // ensure() above guarantees an actor
        let owner_id = actor.map(|a| a.id).ok_or(CatalogError::Unauthenticated)?;

        let product = Product::new(owner_id, input.name, input.price, input.description);
        let created = self.repository.create(product).await?;

        tracing::info!(product_id = %created.id, owner_id = %owner_id, "Created product");
        Ok(created)
    }

    /// Fetch a single product
    pub async fn get_product(&self, actor: Option<&Actor>, id: Uuid) -> CatalogResult<Product> {
        self.ensure(authorize(actor, Operation::ViewProduct, None))?;

        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }

    /// Replace a product's mutable fields (admin only, regardless of owner)
    pub async fn update_product(
        &self,
        actor: Option<&Actor>,
        id: Uuid,
        input: UpdateProduct,
    ) -> CatalogResult<Product> {
        self.ensure(authorize(actor, Operation::UpdateProduct, None))?;

        let mut product = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))?;

        product.apply_update(input);

        let updated = self.repository.update(product).await?;

        tracing::info!(product_id = %updated.id, "Updated product");
        Ok(updated)
    }

    /// Delete a product (admin only, regardless of owner)
    pub async fn delete_product(&self, actor: Option<&Actor>, id: Uuid) -> CatalogResult<()> {
        self.ensure(authorize(actor, Operation::DeleteProduct, None))?;

        if !self.repository.delete(id).await? {
            return Err(CatalogError::NotFound(id));
        }

        tracing::info!(product_id = %id, "Deleted product");
        Ok(())
    }

    /// List the full catalog (admin only)
    pub async fn list_products(&self, actor: Option<&Actor>) -> CatalogResult<Vec<Product>> {
        self.ensure(authorize(actor, Operation::ListProducts, None))?;
        self.repository.list_all().await
    }

    /// Case-insensitive substring search over name and description
    pub async fn search_products(
        &self,
        actor: Option<&Actor>,
        query: &str,
    ) -> CatalogResult<Vec<Product>> {
        self.ensure(authorize(actor, Operation::SearchProducts, None))?;
        self.repository.search(query).await
    }

    fn ensure(&self, decision: Decision) -> CatalogResult<()> {
        match decision {
            Decision::Allowed => Ok(()),
            Decision::DeniedUnauthenticated => Err(CatalogError::Unauthenticated),
            Decision::DeniedForbidden => Err(CatalogError::Forbidden),
        }
    }
}
