//! CLI command implementations
//!
//! `serve` boots the HTTP server against the configured backend;
//! `seed` inserts the sample fleet into the configured database.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::api::{HttpServer, HttpServerConfig};
use crate::model::Car;
use crate::store::{CarStore, MemoryCarStore, SqliteCarStore};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Dispatch a parsed command.
pub fn dispatch(command: Command) -> CliResult<()> {
    match command {
        Command::Serve { config } => serve(&config),
        Command::Seed { config } => seed(&config),
    }
}

/// Load configuration from file, falling back to defaults when the file
/// does not exist.
fn load_config(path: &Path) -> CliResult<HttpServerConfig> {
    if !path.exists() {
        return Ok(HttpServerConfig::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| CliError::config_error(format!("failed to read config: {}", e)))?;

    let config: HttpServerConfig = serde_json::from_str(&content)?;
    Ok(config)
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().map_err(|e| CliError::boot_failed(e.to_string()))
}

/// Open the configured store backend: SQLite when `database_url` is set,
/// in-memory otherwise.
async fn open_store(config: &HttpServerConfig) -> CliResult<Arc<dyn CarStore>> {
    match &config.database_url {
        Some(url) => {
            let store = SqliteCarStore::connect(url)
                .await
                .map_err(|e| CliError::boot_failed(e.to_string()))?;
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("no database_url configured, using in-memory store");
            Ok(Arc::new(MemoryCarStore::new()))
        }
    }
}

fn serve(config_path: &Path) -> CliResult<()> {
    init_tracing();
    let config = load_config(config_path)?;

    runtime()?.block_on(async {
        let store = open_store(&config).await?;
        let server = HttpServer::with_config(config, store);
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(e.to_string()))
    })
}

fn seed(config_path: &Path) -> CliResult<()> {
    init_tracing();
    let config = load_config(config_path)?;

    let Some(url) = config.database_url else {
        return Err(CliError::config_error(
            "seed requires a database_url in the config file",
        ));
    };

    runtime()?.block_on(async {
        let store = SqliteCarStore::connect(&url)
            .await
            .map_err(|e| CliError::boot_failed(e.to_string()))?;

        for car in sample_fleet() {
            store
                .save(&car)
                .await
                .map_err(|e| CliError::boot_failed(e.to_string()))?;
        }

        tracing::info!("sample fleet seeded");
        Ok(())
    })
}

/// The four-car sample fleet used for seeding.
fn sample_fleet() -> Vec<Car> {
    vec![
        Car::new(1, "black", "BMW x5", 25000.0),
        Car::new(2, "green", "Audi A4", 15000.0),
        Car::new(3, "white", "MB A220", 18000.0),
        Car::new(4, "red", "Ferrari", 250000.0),
    ]
}
