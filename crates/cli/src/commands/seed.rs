use forno_core::config::{AppConfig, LoadOptions};
use forno_store::fixtures;

use crate::commands::CommandResult;

pub fn run(force: bool) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "seed",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let catalog_path = config.storage.catalog_path;
    if catalog_path.exists() && !force {
        return CommandResult::failure(
            "seed",
            "catalog_exists",
            format!("`{}` already exists; pass --force to overwrite", catalog_path.display()),
            4,
        );
    }

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "seed",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    match runtime.block_on(fixtures::write_demo_catalog(&catalog_path)) {
        Ok(()) => CommandResult::success(
            "seed",
            format!("demo catalog written to `{}`", catalog_path.display()),
        ),
        Err(error) => CommandResult::failure("seed", "seed_execution", error.to_string(), 5),
    }
}
