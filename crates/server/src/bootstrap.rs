use ops_core::config::{AppConfig, ConfigError, LoadOptions};
use ops_db::{connect_with_settings, migrations, seed_directory, DbPool, SeedError, SeedReport};
use thiserror::Error;
use tracing::info;

pub struct Application {
    pub config: AppConfig,
    pub db_pool: DbPool,
    pub seed_report: Option<SeedReport>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database connection failed: {0}")]
    DatabaseConnect(#[source] sqlx::Error),
    #[error("database migration failed: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),
    #[error("seeding from `{}` failed: {source}", data_dir.display())]
    Seed { data_dir: std::path::PathBuf, source: SeedError },
}

#[cfg(test)]
pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let db_pool = connect_with_settings(
        &config.database.url,
        config.database.max_connections,
        config.database.timeout_secs,
    )
    .await
    .map_err(BootstrapError::DatabaseConnect)?;
    info!(
        event_name = "system.bootstrap.database_connected",
        correlation_id = "bootstrap",
        "database connection established"
    );

    migrations::run_pending(&db_pool).await.map_err(BootstrapError::Migration)?;
    info!(
        event_name = "system.bootstrap.migrations_applied",
        correlation_id = "bootstrap",
        "database migrations applied"
    );

    let seed_report = if config.seed.on_startup {
        let report = seed_directory(&db_pool, &config.seed.data_dir).await.map_err(|source| {
            BootstrapError::Seed { data_dir: config.seed.data_dir.clone(), source }
        })?;
        info!(
            event_name = "system.bootstrap.seeded",
            correlation_id = "bootstrap",
            data_dir = %config.seed.data_dir.display(),
            inserted = report.inserted_total(),
            summary = %report.summary(),
            "seed data reconciled"
        );
        Some(report)
    } else {
        None
    };

    Ok(Application { config, db_pool, seed_report })
}
