use std::env;
use std::sync::{Mutex, MutexGuard, OnceLock};

use forno_cli::commands::{config, doctor, seed};
use serde_json::Value;
use tempfile::TempDir;

const ENV_KEYS: &[&str] = &[
    "FORNO_CONFIG",
    "FORNO_SERVER_BIND_ADDRESS",
    "FORNO_SERVER_PORT",
    "PORT",
    "FORNO_STORAGE_CATALOG_PATH",
    "FORNO_STORAGE_ORDERS_PATH",
    "FORNO_STORAGE_IMAGES_DIR",
    "FORNO_LOGGING_LEVEL",
    "FORNO_LOG_LEVEL",
    "FORNO_LOGGING_FORMAT",
    "FORNO_LOG_FORMAT",
];

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn with_env(vars: &[(&str, &str)], run: impl FnOnce()) {
    let _guard: MutexGuard<'_, ()> = ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    for key in ENV_KEYS {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    run();

    for key in ENV_KEYS {
        env::remove_var(key);
    }
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be JSON")
}

#[test]
fn seed_writes_the_demo_catalog_to_the_configured_path() {
    let dir = TempDir::new().expect("temp dir should create");
    let catalog_path = dir.path().join("db.json");

    with_env(
        &[("FORNO_STORAGE_CATALOG_PATH", catalog_path.to_str().expect("utf-8 path"))],
        || {
            let result = seed::run(false);
            assert_eq!(result.exit_code, 0, "expected successful seed run: {}", result.output);

            let payload = parse_payload(&result.output);
            assert_eq!(payload["command"], "seed");
            assert_eq!(payload["status"], "ok");
        },
    );

    let raw = std::fs::read(&catalog_path).expect("catalog should be on disk");
    let document: Value = serde_json::from_slice(&raw).expect("catalog should be JSON");
    assert!(!document["pizzas"].as_array().expect("pizzas array").is_empty());
    assert!(document["toppings"].is_array());
}

#[test]
fn seed_refuses_to_overwrite_without_force() {
    let dir = TempDir::new().expect("temp dir should create");
    let catalog_path = dir.path().join("db.json");
    std::fs::write(&catalog_path, b"{}").expect("existing catalog should write");

    with_env(
        &[("FORNO_STORAGE_CATALOG_PATH", catalog_path.to_str().expect("utf-8 path"))],
        || {
            let result = seed::run(false);
            assert_ne!(result.exit_code, 0, "seed must not clobber an existing catalog");

            let payload = parse_payload(&result.output);
            assert_eq!(payload["status"], "error");
            assert_eq!(payload["error_class"], "catalog_exists");

            let result = seed::run(true);
            assert_eq!(result.exit_code, 0, "--force should overwrite: {}", result.output);
        },
    );
}

#[test]
fn config_reports_effective_values_after_env_overrides() {
    with_env(&[("FORNO_SERVER_PORT", "4321"), ("FORNO_LOG_FORMAT", "json")], || {
        let output = config::run();
        let payload = parse_payload(&output);

        assert_eq!(payload["server"]["port"], 4321);
        assert_eq!(payload["server"]["bind_address"], "0.0.0.0");
        assert_eq!(payload["storage"]["catalog_path"], "db.json");
        assert_eq!(payload["logging"]["format"], "json");
    });
}

#[test]
fn config_reports_invalid_environment() {
    with_env(&[("FORNO_SERVER_PORT", "not-a-port")], || {
        let output = config::run();
        let payload = parse_payload(&output);
        assert!(payload["error"]
            .as_str()
            .expect("error message")
            .contains("FORNO_SERVER_PORT"));
    });
}

#[test]
fn doctor_fails_when_the_catalog_is_missing() {
    let dir = TempDir::new().expect("temp dir should create");
    let catalog_path = dir.path().join("absent.json");
    let orders_path = dir.path().join("orders.json");

    with_env(
        &[
            ("FORNO_STORAGE_CATALOG_PATH", catalog_path.to_str().expect("utf-8 path")),
            ("FORNO_STORAGE_ORDERS_PATH", orders_path.to_str().expect("utf-8 path")),
        ],
        || {
            let report = parse_payload(&doctor::run(true));
            assert_eq!(report["overall_status"], "fail");

            let checks = report["checks"].as_array().expect("checks array");
            let catalog_check = checks
                .iter()
                .find(|check| check["name"] == "catalog_readable")
                .expect("catalog check present");
            assert_eq!(catalog_check["status"], "fail");
        },
    );
}

#[test]
fn doctor_passes_against_a_seeded_catalog() {
    let dir = TempDir::new().expect("temp dir should create");
    let catalog_path = dir.path().join("db.json");
    let orders_path = dir.path().join("orders.json");

    with_env(
        &[
            ("FORNO_STORAGE_CATALOG_PATH", catalog_path.to_str().expect("utf-8 path")),
            ("FORNO_STORAGE_ORDERS_PATH", orders_path.to_str().expect("utf-8 path")),
        ],
        || {
            let seeded = seed::run(false);
            assert_eq!(seeded.exit_code, 0, "seed should succeed: {}", seeded.output);

            let report = parse_payload(&doctor::run(true));
            assert_eq!(report["overall_status"], "pass", "report: {report}");

            let human = doctor::run(false);
            assert!(human.contains("all readiness checks passed"));
        },
    );
}
