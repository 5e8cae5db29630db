//! # Document Subcommand
//!
//! Reads an OpenAPI JSON file, appends error-code sections to the
//! operations registered in the manifest, and writes the result.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use ecode_api::document_operations;
use utoipa::openapi::OpenApi;

use crate::load_registry;

/// Arguments for the document subcommand.
#[derive(Args, Debug)]
pub struct DocumentArgs {
    /// Path to the manifest (YAML or JSON).
    pub manifest: PathBuf,

    /// OpenAPI document to read (JSON).
    #[arg(long)]
    pub openapi: PathBuf,

    /// Where to write the documented OpenAPI file. Defaults to stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Document `args.openapi` and write it to `args.output` or `out`.
///
/// # Errors
///
/// Manifest, IO, OpenAPI decode, and resolution errors. Nothing is written
/// when resolution fails.
pub fn run_document(args: &DocumentArgs, out: &mut impl Write) -> Result<u8> {
    let (manifest, registry) = load_registry(&args.manifest)?;

    let source = args.openapi.display();
    let raw = std::fs::read_to_string(&args.openapi)
        .with_context(|| format!("failed to read {source}"))?;
    let mut openapi: OpenApi = serde_json::from_str(&raw)
        .with_context(|| format!("{source} is not an OpenAPI JSON document"))?;

    let resolver = registry.resolver();
    let report = document_operations(&mut openapi, &resolver, &manifest.documentation)?;
    tracing::info!(
        documented = report.documented,
        empty = report.empty,
        unregistered = report.unregistered.len(),
        without_id = report.without_id,
        "documented OpenAPI operations"
    );

    let rendered = serde_json::to_string_pretty(&openapi)?;
    let Some(path) = &args.output else {
        writeln!(out, "{rendered}")?;
        return Ok(0);
    };
    std::fs::write(path, format!("{rendered}\n"))
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(0)
}
