use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use axum_helpers::{extract_session_token, ErrorResponse, ValidatedJson};
use serde::Serialize;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use access_control::Actor;
use domain_accounts::{AccountService, UserRepository};

use crate::error::{CatalogError, CatalogResult};
use crate::models::{CreateProduct, Product, SearchQuery, UpdateProduct};
use crate::repository::ProductRepository;
use crate::service::CatalogService;

/// OpenAPI documentation for the Catalog API
#[derive(OpenApi)]
#[openapi(
    paths(
        store_product,
        update_product,
        delete_product,
        show_product,
        list_products,
        search_products,
    ),
    components(schemas(
        Product,
        CreateProduct,
        UpdateProduct,
        DeletedResponse,
        ErrorResponse
    )),
    tags(
        (name = "Catalog", description = "Product management endpoints")
    )
)]
pub struct ApiDoc;

/// Application state for catalog handlers.
///
/// Carries the accounts service alongside the catalog service so each
/// request can resolve its session credential into an actor.
pub struct CatalogState<R: ProductRepository, A: UserRepository> {
    pub catalog: CatalogService<R>,
    pub accounts: AccountService<A>,
}

/// Create the catalog router with all HTTP endpoints
pub fn router<R, A>(catalog: CatalogService<R>, accounts: AccountService<A>) -> Router
where
    R: ProductRepository + 'static,
    A: UserRepository + 'static,
{
    let state = Arc::new(CatalogState { catalog, accounts });

    Router::new()
        .route("/product/store", post(store_product))
        .route("/product/update/{id}", put(update_product))
        .route("/product/{id}", delete(delete_product))
        .route("/product/show/{id}", get(show_product))
        .route("/products", get(list_products))
        .route("/products/search", get(search_products))
        .with_state(state)
}

#[derive(Debug, Serialize, ToSchema)]
struct DeletedResponse {
    message: String,
    id: Uuid,
}

/// Resolve the requesting actor from the session credential, if any
async fn current_actor<R: ProductRepository, A: UserRepository>(
    state: &CatalogState<R, A>,
    headers: &HeaderMap,
) -> CatalogResult<Option<Actor>> {
    let token = extract_session_token(headers);
    state
        .accounts
        .authenticate(token.as_deref())
        .await
        .map_err(|e| CatalogError::Internal(format!("Session lookup failed: {}", e)))
}

/// Create a product owned by the requesting actor
#[utoipa::path(
    post,
    path = "/product/store",
    tag = "Catalog",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
async fn store_product<R: ProductRepository, A: UserRepository>(
    State(state): State<Arc<CatalogState<R, A>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> CatalogResult<impl IntoResponse> {
    let actor = current_actor(&state, &headers).await?;
    let product = state.catalog.create_product(actor.as_ref(), input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product (admin only)
#[utoipa::path(
    put,
    path = "/product/update/{id}",
    tag = "Catalog",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
async fn update_product<R: ProductRepository, A: UserRepository>(
    State(state): State<Arc<CatalogState<R, A>>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> CatalogResult<Json<Product>> {
    let actor = current_actor(&state, &headers).await?;
    let product = state
        .catalog
        .update_product(actor.as_ref(), id, input)
        .await?;
    Ok(Json(product))
}

/// Delete a product (admin only)
#[utoipa::path(
    delete,
    path = "/product/{id}",
    tag = "Catalog",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted", body = DeletedResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository, A: UserRepository>(
    State(state): State<Arc<CatalogState<R, A>>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> CatalogResult<Json<DeletedResponse>> {
    let actor = current_actor(&state, &headers).await?;
    state.catalog.delete_product(actor.as_ref(), id).await?;

    Ok(Json(DeletedResponse {
        message: "Product deleted".to_string(),
        id,
    }))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/product/show/{id}",
    tag = "Catalog",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
async fn show_product<R: ProductRepository, A: UserRepository>(
    State(state): State<Arc<CatalogState<R, A>>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> CatalogResult<Json<Product>> {
    let actor = current_actor(&state, &headers).await?;
    let product = state.catalog.get_product(actor.as_ref(), id).await?;
    Ok(Json(product))
}

/// List the full catalog (admin only)
#[utoipa::path(
    get,
    path = "/products",
    tag = "Catalog",
    responses(
        (status = 200, description = "All products, newest first", body = Vec<Product>),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    )
)]
async fn list_products<R: ProductRepository, A: UserRepository>(
    State(state): State<Arc<CatalogState<R, A>>>,
    headers: HeaderMap,
) -> CatalogResult<Json<Vec<Product>>> {
    let actor = current_actor(&state, &headers).await?;
    let products = state.catalog.list_products(actor.as_ref()).await?;
    Ok(Json(products))
}

/// Search products by name or description substring
#[utoipa::path(
    get,
    path = "/products/search",
    tag = "Catalog",
    params(
        ("query" = String, Query, description = "Substring matched case-insensitively against name and description")
    ),
    responses(
        (status = 200, description = "Matching products, newest first", body = Vec<Product>),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 422, description = "Missing or blank query", body = ErrorResponse)
    )
)]
async fn search_products<R: ProductRepository, A: UserRepository>(
    State(state): State<Arc<CatalogState<R, A>>>,
    headers: HeaderMap,
    Query(params): Query<SearchQuery>,
) -> CatalogResult<Json<Vec<Product>>> {
    let query = params
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| CatalogError::Validation("The query parameter is required".to_string()))?;

    let actor = current_actor(&state, &headers).await?;
    let products = state.catalog.search_products(actor.as_ref(), query).await?;
    Ok(Json(products))
}
