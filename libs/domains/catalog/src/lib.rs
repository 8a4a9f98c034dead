//! Catalog Domain
//!
//! Product records with owner attribution: create, view, update,
//! delete, list, and substring search. Reads and creates are open to
//! any authenticated actor; updates, deletes, and the full listing are
//! admin operations.

pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{CatalogError, CatalogResult};
pub use handlers::{ApiDoc, CatalogState};
pub use models::{CreateProduct, Product, SearchQuery, UpdateProduct};
pub use postgres::PostgresProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::CatalogService;
