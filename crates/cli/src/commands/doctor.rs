use std::fs;

use forno_core::catalog::Catalog;
use forno_core::config::{AppConfig, LoadOptions};
use forno_core::domain::order::Order;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> String {
    let report = build_report();

    if json_output {
        return serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
    }

    render_human(&report)
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.push(check_catalog(&config));
            checks.push(check_order_log(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.push(DoctorCheck {
                name: "catalog_readable",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
            checks.push(DoctorCheck {
                name: "order_log_readable",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_catalog(config: &AppConfig) -> DoctorCheck {
    let path = &config.storage.catalog_path;
    let outcome = match fs::read(path) {
        Ok(bytes) => match serde_json::from_slice::<Catalog>(&bytes) {
            Ok(catalog) => {
                return DoctorCheck {
                    name: "catalog_readable",
                    status: CheckStatus::Pass,
                    details: format!(
                        "`{}` parsed with {} products",
                        path.display(),
                        catalog.pizzas.len()
                    ),
                };
            }
            Err(error) => format!("`{}` is not a valid catalog document: {error}", path.display()),
        },
        Err(error) => format!("`{}` is unreadable: {error}", path.display()),
    };

    DoctorCheck { name: "catalog_readable", status: CheckStatus::Fail, details: outcome }
}

fn check_order_log(config: &AppConfig) -> DoctorCheck {
    let path = &config.storage.orders_path;
    if !path.exists() {
        return DoctorCheck {
            name: "order_log_readable",
            status: CheckStatus::Pass,
            details: format!(
                "`{}` is absent; it will be created on the first order",
                path.display()
            ),
        };
    }

    let outcome = match fs::read(path) {
        Ok(bytes) => match serde_json::from_slice::<Vec<Order>>(&bytes) {
            Ok(orders) => {
                return DoctorCheck {
                    name: "order_log_readable",
                    status: CheckStatus::Pass,
                    details: format!("`{}` holds {} orders", path.display(), orders.len()),
                };
            }
            Err(error) => format!("`{}` is corrupt: {error}", path.display()),
        },
        Err(error) => format!("`{}` is unreadable: {error}", path.display()),
    };

    DoctorCheck { name: "order_log_readable", status: CheckStatus::Fail, details: outcome }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::with_capacity(report.checks.len() + 1);
    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "pass",
            CheckStatus::Fail => "FAIL",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("[{marker}] {}: {}", check.name, check.details));
    }
    lines.push(report.summary.clone());
    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
