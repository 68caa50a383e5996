//! # sessionkit Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This file serves as the main entry point for the sessionkit CLI.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading configuration
//! - Routing execution to the appropriate command handler
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! sessionkit --help
//!
//! # Run a command with increased verbosity
//! sessionkit -vv get /status
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Load configuration (user + project files, environment)
//! 4. Route to the command handler
//! 5. Print any error and exit with status 1
//!
use clap::Parser;
use sessionkit::core::config;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "sessionkit",
    about = "Transport and filesystem helpers for session server clients",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Parser, Debug)]
enum Commands {
    Get(commands::get::GetArgs),
    Post(commands::post::PostArgs),
    Files(commands::files::FilesArgs),
    IsTemp(commands::is_temp::IsTempArgs),
    Sample(commands::sample::SampleArgs),
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Get(args) => commands::get::handle_get(args, &config::load_config()?),
        Commands::Post(args) => commands::post::handle_post(args, &config::load_config()?),
        Commands::Files(args) => commands::files::handle_files(args, &config::load_config()?),
        Commands::IsTemp(args) => commands::is_temp::handle_is_temp(args),
        Commands::Sample(args) => commands::sample::handle_sample(args),
    }
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    if let Err(e) = run(cli) {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use assert_cmd::Command;
    use predicates::prelude::*;

    fn sessionkit_cmd() -> Command {
        Command::cargo_bin("sessionkit").expect("Failed to find sessionkit binary for testing")
    }

    #[test]
    fn test_main_help_flag() {
        sessionkit_cmd().arg("--help").assert().success();
    }

    #[test]
    fn test_main_version_flag() {
        sessionkit_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}
