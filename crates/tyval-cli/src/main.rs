//! # tyval CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tyval_cli::demo::{run_demo, DemoArgs};
use tyval_cli::export::{run_export, ExportArgs};
use tyval_cli::validate::{run_validate, ValidateArgs};

/// tyval: declarative validation of JSON values with path-qualified errors.
#[derive(Parser, Debug)]
#[command(name = "tyval", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate the built-in user/pet samples and print each outcome.
    Demo(DemoArgs),

    /// Validate JSON or YAML documents against a schema file.
    Validate(ValidateArgs),

    /// Print a schema as JSON Schema or as a tyval schema file.
    Export(ExportArgs),
}

fn filter_for(verbose: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v.
    tracing_subscriber::fmt()
        .with_env_filter(filter_for(cli.verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "tyval CLI starting");

    let result = match cli.command {
        Commands::Demo(args) => run_demo(&args),
        Commands::Validate(args) => run_validate(&args),
        Commands::Export(args) => run_export(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
