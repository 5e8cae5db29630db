//! # ecode-api: OpenAPI Documentation Emitter
//!
//! Publishes resolved error codes in API documentation.
//!
//! - [`render_error_codes`] formats one operation's list as a markdown
//!   section.
//! - [`document_operations`] walks a `utoipa` OpenAPI document and appends
//!   the section to every operation whose `operationId` is registered.
//! - [`ErrorCodeAddon`] packages the same pass as a [`utoipa::Modify`].
//!
//! ## Crate Policy
//!
//! - The emitter never mutates a document when resolution fails: all
//!   operations are resolved before the first description is touched.
//! - Operations unknown to the registry are left alone and counted in the
//!   [`DocumentationReport`].

pub mod openapi;
pub mod render;

pub use openapi::{document_operations, DocumentationReport, EmitError, ErrorCodeAddon};
pub use render::render_error_codes;
