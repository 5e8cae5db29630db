//! # OpenAPI Emission
//!
//! Appends rendered error-code sections to the descriptions of operations in
//! a `utoipa` OpenAPI document. Operations are matched on `operationId`,
//! which must be the [`OperationId`] the operation was registered under.
//!
//! ```ignore
//! let mut doc = ApiDoc::openapi();
//! let report = document_operations(&mut doc, &registry.resolver(), &options)?;
//! tracing::info!(documented = report.documented, "error codes published");
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use ecode_core::{DocumentationOptions, OperationId, ResolutionError};
use ecode_resolve::{Registry, Resolver};
use thiserror::Error;
use utoipa::openapi::path::{Operation, PathItem};
use utoipa::openapi::OpenApi;
use utoipa::Modify;

use crate::render::render_error_codes;

/// Error raised while documenting an OpenAPI document.
#[derive(Error, Debug)]
pub enum EmitError {
    /// A registered operation failed to resolve. The document is unchanged.
    #[error("error-code resolution failed: {0}")]
    Resolution(#[from] ResolutionError),
}

/// Outcome of one [`document_operations`] pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentationReport {
    /// Operations that received an error-code section.
    pub documented: usize,
    /// Registered operations left alone because they resolve to no codes.
    pub empty: usize,
    /// `operationId`s present in the document but not in the registry.
    pub unregistered: Vec<String>,
    /// Operations without an `operationId`.
    pub without_id: usize,
}

/// Append each registered operation's error codes to its description.
///
/// Every matching operation is resolved before any description is edited,
/// so an error leaves `openapi` exactly as it was. An `operationId` shared by
/// several operations is resolved and counted once; each of those
/// operations receives the section.
///
/// # Errors
///
/// Returns [`EmitError::Resolution`] for the first registered operation that
/// fails to resolve.
pub fn document_operations(
    openapi: &mut OpenApi,
    resolver: &Resolver<'_>,
    options: &DocumentationOptions,
) -> Result<DocumentationReport, EmitError> {
    let mut report = DocumentationReport::default();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut sections: HashMap<String, String> = HashMap::new();

    for item in openapi.paths.paths.values() {
        for operation in operations(item) {
            let Some(raw) = operation.operation_id.as_deref() else {
                report.without_id += 1;
                continue;
            };
            if !seen.insert(raw) {
                continue;
            }
            let registered = OperationId::parse(raw)
                .ok()
                .filter(|id| resolver.registry().operation(id).is_some());
            let Some(id) = registered else {
                tracing::warn!(
                    operation_id = raw,
                    "operation not in error-code registry, skipping"
                );
                report.unregistered.push(raw.to_string());
                continue;
            };

            let codes = resolver.error_codes(&id)?;
            if codes.is_empty() && !options.include_empty {
                report.empty += 1;
                continue;
            }
            sections.insert(raw.to_string(), render_error_codes(&codes, options));
        }
    }

    for item in openapi.paths.paths.values_mut() {
        for operation in operations_mut(item) {
            let section = operation
                .operation_id
                .as_deref()
                .and_then(|id| sections.get(id));
            if let Some(section) = section {
                operation.description = Some(match operation.description.take() {
                    Some(existing) if !existing.trim().is_empty() => {
                        format!("{existing}\n\n{section}")
                    }
                    _ => section.clone(),
                });
                report.documented += 1;
            }
        }
    }

    tracing::debug!(
        documented = report.documented,
        empty = report.empty,
        unregistered = report.unregistered.len(),
        without_id = report.without_id,
        "documented error codes"
    );
    Ok(report)
}

fn operations(item: &PathItem) -> impl Iterator<Item = &Operation> {
    [
        &item.get,
        &item.put,
        &item.post,
        &item.delete,
        &item.options,
        &item.head,
        &item.patch,
        &item.trace,
    ]
    .into_iter()
    .filter_map(Option::as_ref)
}

fn operations_mut(item: &mut PathItem) -> impl Iterator<Item = &mut Operation> {
    [
        &mut item.get,
        &mut item.put,
        &mut item.post,
        &mut item.delete,
        &mut item.options,
        &mut item.head,
        &mut item.patch,
        &mut item.trace,
    ]
    .into_iter()
    .filter_map(Option::as_mut)
}

/// Runs [`document_operations`] as a [`Modify`] step.
///
/// `Modify` cannot fail, so a resolution error is logged and the document is
/// left untouched.
#[derive(Debug, Clone)]
pub struct ErrorCodeAddon {
    registry: Arc<Registry>,
    options: DocumentationOptions,
}

impl ErrorCodeAddon {
    pub fn new(registry: Arc<Registry>, options: DocumentationOptions) -> Self {
        Self { registry, options }
    }
}

impl Modify for ErrorCodeAddon {
    fn modify(&self, openapi: &mut OpenApi) {
        if let Err(err) = document_operations(openapi, &self.registry.resolver(), &self.options) {
            tracing::error!(error = %err, "failed to document error codes");
        }
    }
}
