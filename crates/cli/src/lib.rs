pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "forno",
    about = "Forno operator CLI",
    long_about = "Operate forno storefront data files: seed the demo catalog, inspect effective configuration, and run readiness checks.",
    after_help = "Examples:\n  forno doctor --json\n  forno config\n  forno seed --force"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Write the demo catalog to the configured catalog path")]
    Seed {
        #[arg(long, help = "Overwrite an existing catalog file")]
        force: bool,
    },
    #[command(about = "Inspect effective configuration values after file and env overrides")]
    Config,
    #[command(about = "Validate config and check catalog and order-log readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Seed { force } => commands::seed::run(force),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
