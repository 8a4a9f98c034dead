use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DbBackend, FromQueryResult, Statement};
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::Product;
use crate::repository::ProductRepository;

/// PostgreSQL implementation of ProductRepository using SeaORM
#[derive(Clone)]
pub struct PostgresProductRepository {
    db: sea_orm::DatabaseConnection,
}

impl PostgresProductRepository {
    pub fn new(db: sea_orm::DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Helper struct for deserializing product rows from the database
#[derive(Debug, FromQueryResult)]
struct ProductRow {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    price: f64,
    description: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
            price: row.price,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn create(&self, product: Product) -> CatalogResult<Product> {
        let sql = r#"
            INSERT INTO products (id, owner_id, name, price, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
        "#;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                product.id.into(),
                product.owner_id.into(),
                product.name.clone().into(),
                product.price.into(),
                product.description.clone().into(),
                product.created_at.into(),
                product.updated_at.into(),
            ],
        );

        let row = ProductRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| CatalogError::Internal(format!("Database error: {}", e)))?
            .ok_or_else(|| CatalogError::Internal("Failed to create product".to_string()))?;

        Ok(row.into())
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let sql = "SELECT * FROM products WHERE id = $1";

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [id.into()]);

        let row = ProductRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| CatalogError::Internal(format!("Database error: {}", e)))?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_all(&self) -> CatalogResult<Vec<Product>> {
        let sql = "SELECT * FROM products ORDER BY created_at DESC";

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, []);

        let rows = ProductRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(|e| CatalogError::Internal(format!("Database error: {}", e)))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn update(&self, product: Product) -> CatalogResult<Product> {
        let sql = r#"
            UPDATE products
            SET name = $2, price = $3, description = $4, updated_at = $5
            WHERE id = $1
            RETURNING *
        "#;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                product.id.into(),
                product.name.clone().into(),
                product.price.into(),
                product.description.clone().into(),
                product.updated_at.into(),
            ],
        );

        let row = ProductRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| CatalogError::Internal(format!("Database error: {}", e)))?;

        row.map(|r| r.into())
            .ok_or(CatalogError::NotFound(product.id))
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let sql = "DELETE FROM products WHERE id = $1";

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [id.into()]);

        let result = self
            .db
            .execute(stmt)
            .await
            .map_err(|e| CatalogError::Internal(format!("Database error: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn search(&self, query: &str) -> CatalogResult<Vec<Product>> {
        let sql = r#"
            SELECT * FROM products
            WHERE name ILIKE '%' || $1 || '%' OR description ILIKE '%' || $1 || '%'
            ORDER BY created_at DESC
        "#;

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [query.into()]);

        let rows = ProductRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(|e| CatalogError::Internal(format!("Database error: {}", e)))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}
