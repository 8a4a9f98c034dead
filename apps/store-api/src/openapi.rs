//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Root mount path for nested domain API docs. The derive macro rejects an
/// empty string literal in `nest(path = ...)`, but accepts an expression.
const ROOT: &str = "";

/// Combined OpenAPI documentation for the Store API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Store API",
        version = "0.1.0",
        description = "Session-authenticated shop backend: accounts, profiles, and product catalog"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = ROOT, api = domain_accounts::ApiDoc),
        (path = ROOT, api = domain_catalog::ApiDoc)
    ),
    tags(
        (name = "Accounts", description = "Registration, sessions, and profiles"),
        (name = "Catalog", description = "Product management endpoints")
    )
)]
pub struct ApiDoc;
