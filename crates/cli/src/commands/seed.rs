use std::path::PathBuf;

use ops_core::config::ConfigOverrides;
use ops_db::{connect_with_settings, seed_directory, SeedReport};

use crate::commands::{load_config, runtime, CommandResult};

pub fn run(data_dir: Option<PathBuf>) -> CommandResult {
    let overrides = ConfigOverrides { data_dir, ..ConfigOverrides::default() };
    let config = match load_config("seed", overrides) {
        Ok(config) => config,
        Err(failure) => return failure,
    };
    let runtime = match runtime("seed") {
        Ok(runtime) => runtime,
        Err(failure) => return failure,
    };

    let result = runtime.block_on(async {
        let pool = connect_with_settings(
            &config.database.url,
            config.database.max_connections,
            config.database.timeout_secs,
        )
        .await
        .map_err(|error| ("db_connectivity", error.to_string(), 4u8))?;

        // Migrations run inside the loader, so a fresh database is fine here.
        let report = seed_directory(&pool, &config.seed.data_dir).await;
        pool.close().await;
        report.map_err(|error| ("seed_execution", error.to_string(), 5u8))
    });

    match result {
        Ok(report) => CommandResult::success("seed", seed_message(&config.seed.data_dir, &report)),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("seed", error_class, message, exit_code)
        }
    }
}

fn seed_message(data_dir: &std::path::Path, report: &SeedReport) -> String {
    format!(
        "seeded {} new rows from {} ({})",
        report.inserted_total(),
        data_dir.display(),
        report.summary()
    )
}
