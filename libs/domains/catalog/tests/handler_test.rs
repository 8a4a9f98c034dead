//! Handler tests for the Catalog domain
//!
//! The catalog endpoints resolve the requesting actor from the session
//! credential, so these tests mount the accounts router alongside the
//! catalog router and drive full register/login flows over HTTP.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use domain_accounts::{AccountService, InMemoryUserRepository};
use domain_catalog::{handlers, CatalogService, InMemoryProductRepository};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    let accounts = AccountService::new(InMemoryUserRepository::new());
    let catalog = CatalogService::new(InMemoryProductRepository::new());

    Router::new()
        .merge(domain_accounts::handlers::router(accounts.clone()))
        .merge(handlers::router(catalog, accounts))
}

// Helper to parse JSON response body
async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Register through the API and return the session token
async fn register(app: &Router, email: &str, role: &str) -> String {
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/register",
            None,
            Some(json!({
                "name": "Test User",
                "email": email,
                "password": "secret1",
                "role": role
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .strip_prefix("session_id=")
        .and_then(|rest| rest.split(';').next())
        .unwrap()
        .to_string()
}

async fn create_product(app: &Router, token: &str, name: &str, description: &str) -> Value {
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/product/store",
            Some(token),
            Some(json!({"name": name, "price": 9.99, "description": description})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn store_product_requires_a_session() {
    let app = app();

    let response = app
        .oneshot(request(
            "POST",
            "/product/store",
            None,
            Some(json!({"name": "Lamp", "price": 9.99, "description": "A lamp"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn store_product_attributes_the_owner() {
    let app = app();
    let token = register(&app, "ann@example.com", "customer").await;

    let product = create_product(&app, &token, "Lamp", "A lamp").await;
    assert_eq!(product["name"], "Lamp");
    assert!(product["owner_id"].is_string());

    // Any authenticated actor can view it
    let other = register(&app, "bob@example.com", "customer").await;
    let response = app
        .oneshot(request(
            "GET",
            &format!("/product/show/{}", product["id"].as_str().unwrap()),
            Some(&other),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn store_product_validates_input() {
    let app = app();
    let token = register(&app, "ann@example.com", "customer").await;

    let response = app
        .oneshot(request(
            "POST",
            "/product/store",
            Some(&token),
            Some(json!({"name": "Lamp", "price": -1.0, "description": "A lamp"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn customer_cannot_delete_even_their_own_product() {
    let app = app();
    let token = register(&app, "ann@example.com", "customer").await;

    let product = create_product(&app, &token, "Lamp", "A lamp").await;
    let id = product["id"].as_str().unwrap();

    let response = app
        .oneshot(request("DELETE", &format!("/product/{}", id), Some(&token), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_delete_then_show_returns_404() {
    let app = app();
    let customer = register(&app, "ann@example.com", "customer").await;
    let admin = register(&app, "root@example.com", "admin").await;

    let product = create_product(&app, &customer, "Lamp", "A lamp").await;
    let id = product["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(request("DELETE", &format!("/product/{}", id), Some(&admin), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["id"], *id);

    let response = app
        .oneshot(request(
            "GET",
            &format!("/product/show/{}", id),
            Some(&admin),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_replaces_all_fields_and_is_admin_only() {
    let app = app();
    let customer = register(&app, "ann@example.com", "customer").await;
    let admin = register(&app, "root@example.com", "admin").await;

    let product = create_product(&app, &customer, "Lamp", "A lamp").await;
    let id = product["id"].as_str().unwrap();

    let update = json!({"name": "Desk Lamp", "price": 19.99, "description": "A desk lamp"});

    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/product/update/{}", id),
            Some(&customer),
            Some(update.clone()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/product/update/{}", id),
            Some(&admin),
            Some(update),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["name"], "Desk Lamp");
    assert_eq!(body["price"], 19.99);

    // A partial update body is rejected; every field is required
    let response = app
        .oneshot(request(
            "PUT",
            &format!("/product/update/{}", id),
            Some(&admin),
            Some(json!({"name": "Floor Lamp"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn listing_is_admin_only() {
    let app = app();
    let customer = register(&app, "ann@example.com", "customer").await;
    let admin = register(&app, "root@example.com", "admin").await;

    create_product(&app, &customer, "Lamp", "A lamp").await;

    let response = app
        .clone()
        .oneshot(request("GET", "/products", Some(&customer), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(request("GET", "/products", Some(&admin), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn search_without_a_query_is_rejected_not_answered() {
    let app = app();
    let token = register(&app, "ann@example.com", "customer").await;

    create_product(&app, &token, "Lamp", "A lamp").await;

    // No query parameter at all: the catalog must not be dumped
    let response = app
        .clone()
        .oneshot(request("GET", "/products/search", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");

    // A blank query is just as meaningless
    let response = app
        .oneshot(request(
            "GET",
            "/products/search?query=%20%20",
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn search_is_case_insensitive_over_name_and_description() {
    let app = app();
    let token = register(&app, "ann@example.com", "customer").await;

    create_product(&app, &token, "Test Product 1", "First").await;
    create_product(&app, &token, "Test Product 2", "Second").await;
    create_product(&app, &token, "Another Product", "nothing").await;

    let response = app
        .clone()
        .oneshot(request("GET", "/products/search?query=test", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let response = app
        .oneshot(request("GET", "/products/search?query=widget", Some(&token), None))
        .await
        .unwrap();
    let body = json_body(response.into_body()).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[test]
fn openapi_document_covers_every_endpoint() {
    use utoipa::OpenApi;

    let doc = serde_json::to_value(domain_catalog::ApiDoc::openapi()).unwrap();
    let paths = doc["paths"].as_object().unwrap();

    for (path, method) in [
        ("/product/store", "post"),
        ("/product/update/{id}", "put"),
        ("/product/{id}", "delete"),
        ("/product/show/{id}", "get"),
        ("/products", "get"),
        ("/products/search", "get"),
    ] {
        assert!(
            paths.get(path).and_then(|p| p.get(method)).is_some(),
            "{} {} missing from the OpenAPI document",
            method,
            path
        );
    }
}
