//! # ecode-cli: Error-Code Aggregator Command-Line Interface
//!
//! ```bash
//! ecode check demos/restaurant.manifest.yaml
//! ecode resolve demos/restaurant.manifest.yaml Orders.Create --format json
//! ecode document demos/restaurant.manifest.yaml --openapi openapi.json --output openapi.documented.json
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers here take parsed
//!   arguments and an output sink, and return the process exit code.
//! - Handlers delegate to the library crates. `anyhow` is used only here.

pub mod check;
pub mod document;
pub mod resolve;

use std::path::Path;

use anyhow::{Context, Result};
use ecode_resolve::Registry;
use ecode_schema::Manifest;

/// Load a manifest and build its registry.
///
/// # Errors
///
/// Any [`ManifestError`](ecode_schema::ManifestError), with the manifest
/// path as context.
pub fn load_registry(path: &Path) -> Result<(Manifest, Registry)> {
    let manifest = Manifest::from_path(path)
        .with_context(|| format!("failed to load manifest {}", path.display()))?;
    let registry = manifest
        .to_registry()
        .with_context(|| format!("invalid manifest {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        operations = registry.len(),
        validators = registry.validators().len(),
        "registry built"
    );
    Ok((manifest, registry))
}
