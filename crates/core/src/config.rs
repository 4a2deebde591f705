use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StorageConfig {
    /// Read-only catalog document, supplied at deployment time.
    pub catalog_path: PathBuf,
    /// Order log, created on the first successful order if absent.
    pub orders_path: PathBuf,
    /// Directory served under `/img`.
    pub images_dir: PathBuf,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
    pub catalog_path: Option<PathBuf>,
    pub orders_path: Option<PathBuf>,
    pub images_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig { bind_address: "0.0.0.0".to_string(), port: 3000 },
            storage: StorageConfig {
                catalog_path: PathBuf::from("db.json"),
                orders_path: PathBuf::from("orders.json"),
                images_dir: PathBuf::from("img"),
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    server: Option<ServerPatch>,
    storage: Option<StoragePatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerPatch {
    bind_address: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
struct StoragePatch {
    catalog_path: Option<PathBuf>,
    orders_path: Option<PathBuf>,
    images_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("forno.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(server) = patch.server {
            if let Some(bind_address) = server.bind_address {
                self.server.bind_address = bind_address;
            }
            if let Some(port) = server.port {
                self.server.port = port;
            }
        }

        if let Some(storage) = patch.storage {
            if let Some(catalog_path) = storage.catalog_path {
                self.storage.catalog_path = catalog_path;
            }
            if let Some(orders_path) = storage.orders_path {
                self.storage.orders_path = orders_path;
            }
            if let Some(images_dir) = storage.images_dir {
                self.storage.images_dir = images_dir;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("FORNO_SERVER_BIND_ADDRESS") {
            self.server.bind_address = value;
        }

        // `PORT` is the deployment-facing alias the hosting environment sets.
        let port = read_env("FORNO_SERVER_PORT")
            .map(|value| ("FORNO_SERVER_PORT", value))
            .or_else(|| read_env("PORT").map(|value| ("PORT", value)));
        if let Some((key, value)) = port {
            self.server.port = parse_u16(key, &value)?;
        }

        if let Some(value) = read_env("FORNO_STORAGE_CATALOG_PATH") {
            self.storage.catalog_path = PathBuf::from(value);
        }
        if let Some(value) = read_env("FORNO_STORAGE_ORDERS_PATH") {
            self.storage.orders_path = PathBuf::from(value);
        }
        if let Some(value) = read_env("FORNO_STORAGE_IMAGES_DIR") {
            self.storage.images_dir = PathBuf::from(value);
        }

        let log_level = read_env("FORNO_LOGGING_LEVEL").or_else(|| read_env("FORNO_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format = read_env("FORNO_LOGGING_FORMAT").or_else(|| read_env("FORNO_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(catalog_path) = overrides.catalog_path {
            self.storage.catalog_path = catalog_path;
        }
        if let Some(orders_path) = overrides.orders_path {
            self.storage.orders_path = orders_path;
        }
        if let Some(images_dir) = overrides.images_dir {
            self.storage.images_dir = images_dir;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind_address.trim().is_empty() {
            return Err(ConfigError::Validation("server.bind_address must not be empty".into()));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Validation("server.port must be non-zero".into()));
        }
        if self.storage.catalog_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation("storage.catalog_path must not be empty".into()));
        }
        if self.storage.orders_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation("storage.orders_path must not be empty".into()));
        }
        if self.storage.images_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation("storage.images_dir must not be empty".into()));
        }
        Ok(())
    }
}

fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(value) = read_env("FORNO_CONFIG") {
        return Some(PathBuf::from(value));
    }

    let default = PathBuf::from("forno.toml");
    default.exists().then_some(default)
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;
    toml::from_str(&raw).map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

fn parse_u16(key: &str, value: &str) -> Result<u16, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidEnvOverride { key: key.to_string(), value: value.to_string() })
}
