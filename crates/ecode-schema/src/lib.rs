//! # ecode-schema: Manifest Loading
//!
//! Turns a declarative manifest (YAML or JSON) into a resolver
//! [`Registry`](ecode_resolve::Registry).
//!
//! ## Manifests (`manifest`)
//!
//! [`Manifest`] is the decoded document: the error-code catalog, the
//! operations with their ordered annotations, the validators with their
//! rules, and [`DocumentationOptions`] for the emitter.
//! [`Manifest::to_registry`] parses every reference and builds the registry.
//!
//! ## Schema Validation (`validate`)
//!
//! Every document is validated against the embedded
//! `schemas/manifest.schema.json` before decoding. Violations are collected,
//! not short-circuited.
//!
//! ## Crate Policy
//!
//! - Schema validation is a trust boundary: a document that fails it never
//!   reaches the registry.
//! - Reference syntax is checked by the identifier types in `ecode-core`,
//!   not by the schema, so malformed references surface as
//!   [`ResolutionError::MalformedReference`](ecode_core::ResolutionError::MalformedReference).

pub mod manifest;
pub mod validate;

pub use ecode_core::DocumentationOptions;
pub use manifest::{AnnotationDecl, Manifest, ManifestError, OperationDecl, ValidatorDecl};
pub use validate::{ManifestSchema, ValidationViolations, Violation, MANIFEST_SCHEMA};
