use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use forno_core::config::{AppConfig, ConfigError};
use forno_store::{CatalogStore, FileCatalogStore, FileOrderLog, OrderStore};

pub struct Application {
    pub config: AppConfig,
    pub catalog: Arc<dyn CatalogStore>,
    pub orders: Arc<dyn OrderStore>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(event_name = "system.bootstrap.start", "starting application bootstrap");

    let catalog: Arc<dyn CatalogStore> =
        Arc::new(FileCatalogStore::new(&config.storage.catalog_path));
    let orders: Arc<dyn OrderStore> = Arc::new(FileOrderLog::new(&config.storage.orders_path));

    // The catalog is re-read on every request; this probe is advisory only.
    match catalog.load().await {
        Ok(catalog) => {
            info!(
                event_name = "system.bootstrap.catalog_loaded",
                products = catalog.pizzas.len(),
                "catalog probe succeeded"
            );
        }
        Err(error) => {
            warn!(
                event_name = "system.bootstrap.catalog_unreadable",
                error = %error,
                "catalog probe failed; catalog requests will return 503 until it is readable"
            );
        }
    }

    Ok(Application { config, catalog, orders })
}

#[cfg(test)]
mod tests {
    use forno_core::config::AppConfig;
    use forno_store::{fixtures, CatalogStore};
    use tempfile::TempDir;

    use super::bootstrap_with_config;

    fn config_in(dir: &TempDir) -> AppConfig {
        let mut config = AppConfig::default();
        config.storage.catalog_path = dir.path().join("db.json");
        config.storage.orders_path = dir.path().join("orders.json");
        config.storage.images_dir = dir.path().join("img");
        config
    }

    #[tokio::test]
    async fn bootstrap_wires_stores_from_config() {
        let dir = TempDir::new().expect("temp dir should create");
        let config = config_in(&dir);
        fixtures::write_demo_catalog(&config.storage.catalog_path)
            .await
            .expect("demo catalog should write");

        let app = bootstrap_with_config(config).await.expect("bootstrap should succeed");
        let catalog = app.catalog.load().await.expect("catalog should load through the app");
        assert_eq!(catalog.pizzas.len(), 3);
    }

    #[tokio::test]
    async fn bootstrap_tolerates_a_missing_catalog() {
        let dir = TempDir::new().expect("temp dir should create");

        let app = bootstrap_with_config(config_in(&dir)).await.expect("bootstrap should succeed");
        assert!(app.catalog.load().await.is_err(), "catalog stays unreadable until deployed");
    }
}
