//! # Resolve Subcommand
//!
//! Prints the resolved error codes of one operation.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use ecode_core::OperationId;

use crate::load_registry;

/// Output format for resolved codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One entry per line.
    Text,
    /// A JSON array of `{property, code, description}` objects.
    Json,
}

/// Arguments for the resolve subcommand.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Path to the manifest (YAML or JSON).
    pub manifest: PathBuf,

    /// Operation to resolve, e.g. `Orders.Create`.
    pub operation: String,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Resolve `args.operation` and write its codes to `out`.
///
/// # Errors
///
/// Manifest, identifier, and resolution errors.
pub fn run_resolve(args: &ResolveArgs, out: &mut impl Write) -> Result<u8> {
    let (_, registry) = load_registry(&args.manifest)?;
    let operation = OperationId::parse(&args.operation)
        .with_context(|| format!("invalid operation id '{}'", args.operation))?;
    let codes = registry.resolver().error_codes(&operation)?;

    match args.format {
        OutputFormat::Text => {
            for code in &codes {
                writeln!(out, "{code}")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &codes)?;
            writeln!(out)?;
        }
    }
    Ok(0)
}
