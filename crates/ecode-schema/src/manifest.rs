//! # Manifests
//!
//! A manifest is the declarative form of a [`Registry`]: the catalog of
//! error codes, every operation with its ordered annotations, and every
//! validator's rules, plus documentation settings for the emitter.
//!
//! ## Loading Pipeline
//!
//! 1. Parse YAML (JSON is accepted as a YAML subset) into a JSON value.
//! 2. Validate the value against the embedded manifest schema.
//! 3. Decode into [`Manifest`].
//! 4. [`Manifest::to_registry`] parses every reference string and builds the
//!    registry. Malformed references fail here, before any resolution.

use std::path::Path;

use ecode_core::{
    Annotation, CatalogEntry, DocumentationOptions, ErrorCodeCatalog, ErrorCodeDescription,
    Operation, ResolutionError, TypeName,
};
use ecode_resolve::Registry;
use ecode_validate::{RuleDefinition, RuleSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::validate::{ManifestSchema, ValidationViolations};

/// Error while loading a manifest or building its registry.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The manifest file could not be read.
    #[error("cannot read manifest '{path}': {source}")]
    Io {
        /// Path that failed to load.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid YAML or JSON.
    #[error("manifest is not valid YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The embedded schema could not be compiled.
    #[error("manifest schema build error: {reason}")]
    SchemaBuild {
        /// Reason the schema could not be compiled.
        reason: String,
    },

    /// The document does not conform to the manifest schema.
    #[error("manifest failed schema validation:\n{0}")]
    SchemaViolations(ValidationViolations),

    /// The document passed the schema but could not be decoded.
    #[error("manifest decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// An annotation entry declares zero or several annotation kinds.
    #[error("annotation #{index} on {operation} must declare exactly one of literal, operation, validator")]
    AmbiguousAnnotation {
        /// Operation id as written in the manifest.
        operation: String,
        /// Zero-based position of the annotation.
        index: usize,
    },

    /// A reference was malformed or the registry could not be built.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}

/// One entry in an operation's `annotations` list. Exactly one field is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationDecl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal: Option<ErrorCodeDescription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validator: Option<String>,
}

/// An operation as written in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDecl {
    pub id: String,
    #[serde(default)]
    pub annotations: Vec<AnnotationDecl>,
}

/// A validator as written in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorDecl {
    pub target: String,
    #[serde(default)]
    pub rules: Vec<RuleDefinition>,
}

/// A decoded manifest document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub codes: Vec<CatalogEntry>,
    #[serde(default)]
    pub operations: Vec<OperationDecl>,
    #[serde(default)]
    pub validators: Vec<ValidatorDecl>,
    #[serde(default)]
    pub documentation: DocumentationOptions,
}

impl Manifest {
    /// Load and validate a manifest file.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Io`] if the file cannot be read, and any
    /// error from [`Manifest::from_yaml_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loading manifest");
        Self::from_yaml_str(&content)
    }

    /// Parse and validate a YAML or JSON manifest.
    ///
    /// # Errors
    ///
    /// [`ManifestError::Parse`], [`ManifestError::SchemaViolations`], or
    /// [`ManifestError::Decode`].
    pub fn from_yaml_str(content: &str) -> Result<Self, ManifestError> {
        let value: Value = serde_yaml::from_str(content)?;
        Self::from_value(value)
    }

    /// Validate and decode an already-parsed document.
    ///
    /// # Errors
    ///
    /// [`ManifestError::SchemaViolations`] or [`ManifestError::Decode`].
    pub fn from_value(value: Value) -> Result<Self, ManifestError> {
        ManifestSchema::new()?.validate(&value)?;
        Ok(serde_json::from_value(value)?)
    }

    /// The declared catalog, or `None` if the manifest lists no codes.
    pub fn catalog(&self) -> Option<ErrorCodeCatalog> {
        if self.codes.is_empty() {
            return None;
        }
        let mut catalog = ErrorCodeCatalog::new();
        for entry in &self.codes {
            if !catalog.insert(entry.code.clone(), entry.summary.clone()) {
                tracing::warn!(code = %entry.code, "error code listed twice in catalog");
            }
        }
        Some(catalog)
    }

    /// Build the registry this manifest declares.
    ///
    /// # Errors
    ///
    /// - [`ManifestError::AmbiguousAnnotation`] for an annotation entry that
    ///   sets zero or several kinds;
    /// - [`ManifestError::Resolution`] for malformed references and for
    ///   every [`RegistryBuilder::build`](ecode_resolve::RegistryBuilder::build) failure.
    pub fn to_registry(&self) -> Result<Registry, ManifestError> {
        let mut builder = Registry::builder();
        if let Some(catalog) = self.catalog() {
            builder = builder.catalog(catalog);
        }
        for decl in &self.operations {
            builder = builder.operation(decl.to_operation()?);
        }
        for decl in &self.validators {
            let target = TypeName::parse(&decl.target)?;
            builder = builder.rule_set(RuleSet::from_rules(target, decl.rules.clone()));
        }
        Ok(builder.build()?)
    }
}

impl OperationDecl {
    /// Parse the id and every annotation, in order.
    ///
    /// # Errors
    ///
    /// See [`Manifest::to_registry`].
    pub fn to_operation(&self) -> Result<Operation, ManifestError> {
        let mut operation = Operation::parse(&self.id)?;
        for (index, decl) in self.annotations.iter().enumerate() {
            let annotation = match (&decl.literal, &decl.operation, &decl.validator) {
                (Some(literal), None, None) => Annotation::Literal(literal.clone()),
                (None, Some(reference), None) => Annotation::delegates_to_operation(reference)?,
                (None, None, Some(reference)) => Annotation::delegates_to_validator(reference)?,
                _ => {
                    return Err(ManifestError::AmbiguousAnnotation {
                        operation: self.id.clone(),
                        index,
                    })
                }
            };
            operation = operation.with_annotation(annotation);
        }
        Ok(operation)
    }
}
