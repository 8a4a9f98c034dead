//! Database library providing the PostgreSQL connector for the store backend.
//!
//! # Example
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let config = PostgresConfig::from_env()?;
//! let db = postgres::connect_from_config_with_retry(&config, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "store-api").await?;
//! ```

pub mod postgres;
