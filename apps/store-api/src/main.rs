//! Store API - session-authenticated shop backend

use axum::Router;
use axum_helpers::{create_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_from_config_with_retry, run_migrations};
use domain_accounts::{AccountService, PostgresUserRepository};
use domain_catalog::{CatalogService, PostgresProductRepository};
use migration::Migrator;
use tracing::info;

mod config;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let db = connect_from_config_with_retry(&config.database, None).await?;
    run_migrations::<Migrator>(&db, "store-api").await?;

    let accounts = AccountService::new(PostgresUserRepository::new(db.clone()));
    let catalog = CatalogService::new(PostgresProductRepository::new(db));

    let api_routes = Router::new()
        .merge(domain_accounts::handlers::router(accounts.clone()))
        .merge(domain_catalog::handlers::router(catalog, accounts));

    let app = create_router::<openapi::ApiDoc>(api_routes);

    info!(
        environment = ?config.environment,
        "Starting Store API on {}",
        config.server.address()
    );

    create_app(app, &config.server).await?;

    info!("Store API shutdown complete");
    Ok(())
}
