//! # Check Subcommand
//!
//! Loads a manifest, builds its registry, and resolves every operation.
//! Exits non-zero if any operation fails.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::load_registry;

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the manifest (YAML or JSON).
    pub manifest: PathBuf,
}

/// Resolve every operation in the manifest, reporting one line each.
///
/// Returns exit code 1 if any operation fails to resolve.
///
/// # Errors
///
/// Manifest load and registry build errors.
pub fn run_check(args: &CheckArgs, out: &mut impl Write) -> Result<u8> {
    let (_, registry) = load_registry(&args.manifest)?;

    let mut failed = 0usize;
    let results = registry.resolver().resolve_all();
    for (operation, result) in &results {
        match result {
            Ok(codes) => writeln!(out, "  ok    {operation} ({} codes)", codes.len())?,
            Err(err) => {
                failed += 1;
                writeln!(out, "  FAIL  {operation}: {err}")?;
            }
        }
    }

    writeln!(
        out,
        "{} operations, {} validators, {failed} failed",
        results.len(),
        registry.validators().len()
    )?;
    Ok(if failed == 0 { 0 } else { 1 })
}
