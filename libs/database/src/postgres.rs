use core_config::{env_or_default, env_required, ConfigError, FromEnv};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::{info, log::LevelFilter, warn};

/// PostgreSQL connection configuration
#[derive(Clone, Debug)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections in the pool
    pub min_connections: u32,
    /// Connection and acquire timeout in seconds
    pub connect_timeout_secs: u64,
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 20,
            min_connections: 2,
            connect_timeout_secs: 8,
        }
    }

    /// Convert into sea-orm connection options with pool settings applied
    pub fn into_connect_options(self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(self.url);
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .acquire_timeout(Duration::from_secs(self.connect_timeout_secs))
            .sqlx_logging(true)
            .sqlx_logging_level(LevelFilter::Debug);
        opt
    }
}

impl FromEnv for PostgresConfig {
    /// Reads configuration from environment variables:
    /// - `DATABASE_URL` (required)
    /// - `DATABASE_MAX_CONNECTIONS` (default 20)
    /// - `DATABASE_MIN_CONNECTIONS` (default 2)
    fn from_env() -> Result<Self, ConfigError> {
        let url = env_required("DATABASE_URL")?;
        let mut config = Self::new(url);

        config.max_connections = env_or_default("DATABASE_MAX_CONNECTIONS", "20")
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "DATABASE_MAX_CONNECTIONS".to_string(),
                details: format!("{}", e),
            })?;
        config.min_connections = env_or_default("DATABASE_MIN_CONNECTIONS", "2")
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "DATABASE_MIN_CONNECTIONS".to_string(),
                details: format!("{}", e),
            })?;

        Ok(config)
    }
}

/// Connect to PostgreSQL with the given configuration
pub async fn connect_from_config(config: &PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(config.clone().into_connect_options()).await?;
    info!("Successfully connected to PostgreSQL database");
    Ok(db)
}

/// Connect with bounded retry, for transient failures during startup.
///
/// Delay doubles between attempts, starting at 500ms. `attempts` defaults
/// to 5 when `None`.
pub async fn connect_from_config_with_retry(
    config: &PostgresConfig,
    attempts: Option<u32>,
) -> Result<DatabaseConnection, DbErr> {
    let attempts = attempts.unwrap_or(5).max(1);
    let mut delay = Duration::from_millis(500);

    for attempt in 1..=attempts {
        match connect_from_config(config).await {
            Ok(db) => return Ok(db),
            Err(e) if attempt < attempts => {
                warn!(
                    attempt,
                    attempts,
                    error = %e,
                    "Database connection failed, retrying in {:?}",
                    delay
                );
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
            Err(e) => return Err(e),
        }
    }

    unreachable!("retry loop returns on final attempt")
}

/// Run pending migrations for the given migrator
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> Result<(), DbErr> {
    info!("Running {} database migrations", app_name);
    M::up(db, None).await?;
    info!("Migrations completed successfully for {}", app_name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_from_env_requires_url() {
        temp_env::with_var_unset("DATABASE_URL", || {
            assert!(PostgresConfig::from_env().is_err());
        });
    }

    #[test]
    fn config_from_env_with_pool_overrides() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://localhost/store")),
                ("DATABASE_MAX_CONNECTIONS", Some("50")),
                ("DATABASE_MIN_CONNECTIONS", Some("5")),
            ],
            || {
                let config = PostgresConfig::from_env().unwrap();
                assert_eq!(config.url, "postgresql://localhost/store");
                assert_eq!(config.max_connections, 50);
                assert_eq!(config.min_connections, 5);
            },
        );
    }

    #[test]
    fn config_from_env_rejects_bad_pool_size() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://localhost/store")),
                ("DATABASE_MAX_CONNECTIONS", Some("lots")),
            ],
            || {
                assert!(PostgresConfig::from_env().is_err());
            },
        );
    }
}
