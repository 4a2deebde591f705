use forno_core::config::{AppConfig, LoadOptions};
use serde_json::json;

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return json!({ "error": error.to_string() }).to_string(),
    };

    let payload = json!({
        "server": {
            "bind_address": config.server.bind_address,
            "port": config.server.port,
        },
        "storage": {
            "catalog_path": config.storage.catalog_path.display().to_string(),
            "orders_path": config.storage.orders_path.display().to_string(),
            "images_dir": config.storage.images_dir.display().to_string(),
        },
        "logging": {
            "level": config.logging.level,
            "format": config.logging.format,
        },
    });

    serde_json::to_string_pretty(&payload)
        .unwrap_or_else(|error| json!({ "error": error.to_string() }).to_string())
}
