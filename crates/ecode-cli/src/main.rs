//! # ecode CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ecode_cli::check::{run_check, CheckArgs};
use ecode_cli::document::{run_document, DocumentArgs};
use ecode_cli::resolve::{run_resolve, ResolveArgs};

/// Error-code aggregator.
///
/// Resolves the error codes each API operation can return from a manifest of
/// operations, delegations, and validators, and publishes them in OpenAPI
/// documents.
#[derive(Parser, Debug)]
#[command(name = "ecode", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    /// Without it, `RUST_LOG` is honored.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the error codes one operation can return.
    Resolve(ResolveArgs),

    /// Load a manifest and resolve every operation in it.
    Check(CheckArgs),

    /// Append error codes to the operations of an OpenAPI document.
    Document(DocumentArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let mut stdout = std::io::stdout().lock();
    let result = match &cli.command {
        Commands::Resolve(args) => run_resolve(args, &mut stdout),
        Commands::Check(args) => run_check(args, &mut stdout),
        Commands::Document(args) => run_document(args, &mut stdout),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn init_tracing(verbose: u8, json: bool) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
