//! # Manifest Schema Validation
//!
//! Structural validation of manifest documents against the embedded
//! `schemas/manifest.schema.json` (Draft 2020-12), before any typed
//! decoding happens.
//!
//! ## Trust Boundary
//!
//! A manifest that fails validation is rejected with one violation per
//! problem, each carrying the instance path, the schema path, and a message,
//! so a broken manifest can be fixed in one pass.

use std::fmt;
use std::slice;

use jsonschema::Validator;
use serde_json::Value;

use crate::manifest::ManifestError;

/// The manifest schema, embedded at compile time.
pub const MANIFEST_SCHEMA: &str = include_str!("../schemas/manifest.schema.json");

/// One place where a manifest breaks the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer into the manifest; empty for the document itself.
    pub instance_path: String,
    /// JSON Pointer to the schema keyword that rejected it.
    pub schema_path: String,
    pub message: String,
}

impl Violation {
    /// The instance path, or `(root)` when the whole document is at fault.
    pub fn location(&self) -> &str {
        match self.instance_path.as_str() {
            "" => "(root)",
            path => path,
        }
    }
}

/// Renders as `location: message`.
impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location(), self.message)
    }
}

/// Every violation found in one manifest, in validator order. Never empty
/// when returned from [`ManifestSchema::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationViolations(Vec<Violation>);

impl ValidationViolations {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Violation> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a ValidationViolations {
    type Item = &'a Violation;
    type IntoIter = slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One indented bullet per violation, newline separated.
impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut separator = "";
        for violation in self {
            write!(f, "{separator}  - {violation}")?;
            separator = "\n";
        }
        Ok(())
    }
}

/// Compiled validator for the manifest schema.
///
/// `Send + Sync`; compile once and reuse across loads.
pub struct ManifestSchema {
    validator: Validator,
}

impl fmt::Debug for ManifestSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManifestSchema").finish_non_exhaustive()
    }
}

impl ManifestSchema {
    /// Compile the embedded schema.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::SchemaBuild`] if the embedded schema does not
    /// parse or compile.
    pub fn new() -> Result<Self, ManifestError> {
        let schema: Value = serde_json::from_str(MANIFEST_SCHEMA).map_err(|e| {
            ManifestError::SchemaBuild {
                reason: format!("invalid JSON: {e}"),
            }
        })?;

        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        let validator = opts.build(&schema).map_err(|e| ManifestError::SchemaBuild {
            reason: e.to_string(),
        })?;

        Ok(Self { validator })
    }

    /// Validate a parsed document.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::SchemaViolations`] listing every violation.
    pub fn validate(&self, instance: &Value) -> Result<(), ManifestError> {
        let violations: Vec<Violation> = self
            .validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            tracing::debug!(count = violations.len(), "manifest rejected by schema");
            Err(ManifestError::SchemaViolations(ValidationViolations(violations)))
        }
    }
}
