//! # Resolver
//!
//! Depth-first expansion of an operation's annotations. The traversal is
//! order-preserving: every annotation's contribution lands exactly where the
//! annotation was declared, and the final list is deduplicated with
//! [`dedup_stable`].
//!
//! Expansion keeps an explicit stack of annotation cursors rather than
//! recursing, so delegation chain length is bounded by heap, not by the
//! thread's stack.

use std::collections::HashSet;
use std::slice;

use ecode_core::{
    check_code, dedup_stable, Annotation, ErrorCodeDescription, Operation, OperationId,
    ResolutionError, TypeName,
};
use ecode_validate::extract_codes;

use crate::registry::Registry;

/// Resolves operations against a [`Registry`].
///
/// Holds only a shared borrow of the registry; each call owns its visited
/// set, so one resolver (or many) can be used from several threads at once.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'r> {
    registry: &'r Registry,
}

impl<'r> Resolver<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Every error code `operation` can return, deduplicated, in
    /// declaration order.
    ///
    /// # Errors
    ///
    /// - [`ResolutionError::UnknownOperation`] if `operation` is not registered.
    /// - [`ResolutionError::MissingOperation`] if a reachable delegation
    ///   targets an unregistered operation.
    /// - [`ResolutionError::MissingValidator`] or
    ///   [`ResolutionError::ValidatorTargetMismatch`] from validator extraction.
    /// - [`ResolutionError::EmptyErrorCode`] or
    ///   [`ResolutionError::UnknownErrorCode`] if an extracted code is blank
    ///   or outside the registry's catalog.
    pub fn error_codes(
        &self,
        operation: &OperationId,
    ) -> Result<Vec<ErrorCodeDescription>, ResolutionError> {
        let root = self
            .registry
            .operation(operation)
            .ok_or_else(|| ResolutionError::UnknownOperation(operation.clone()))?;

        let mut visited = HashSet::new();
        visited.insert(root.id());
        let mut codes = self.expand(root, &mut visited)?;

        let spliced = codes.len();
        dedup_stable(&mut codes);
        tracing::debug!(
            operation = %operation,
            expanded = visited.len(),
            spliced,
            resolved = codes.len(),
            "resolved error codes"
        );
        Ok(codes)
    }

    /// Codes contributed by the validator bound to `target`, checked for
    /// blanks and against the catalog.
    ///
    /// # Errors
    ///
    /// See [`error_codes`](Self::error_codes).
    pub fn validator_codes(
        &self,
        target: &TypeName,
    ) -> Result<Vec<ErrorCodeDescription>, ResolutionError> {
        let codes = extract_codes(self.registry.validators(), target)?;
        for code in &codes {
            let origin = || format!("validator for {target}");
            check_code(self.registry.catalog(), code.error_code(), origin)?;
        }
        Ok(codes)
    }

    /// Resolve every registered operation, in registration order.
    pub fn resolve_all(
        &self,
    ) -> Vec<(&'r OperationId, Result<Vec<ErrorCodeDescription>, ResolutionError>)> {
        self.registry
            .operations()
            .iter()
            .map(|op| (op.id(), self.error_codes(op.id())))
            .collect()
    }

    fn expand(
        &self,
        root: &'r Operation,
        visited: &mut HashSet<&'r OperationId>,
    ) -> Result<Vec<ErrorCodeDescription>, ResolutionError> {
        let mut codes = Vec::new();
        let mut stack: Vec<(&'r Operation, slice::Iter<'r, Annotation>)> =
            vec![(root, root.annotations().iter())];

        while let Some((operation, annotations)) = stack.last_mut() {
            let operation = *operation;
            let Some(annotation) = annotations.next() else {
                stack.pop();
                continue;
            };
            match annotation {
                Annotation::Literal(description) => codes.push(description.clone()),
                Annotation::DelegatesToOperation(target) => {
                    if !visited.insert(target) {
                        tracing::trace!(
                            from = %operation.id(),
                            to = %target,
                            "skipping already expanded operation"
                        );
                        continue;
                    }
                    let Some(delegate) = self.registry.operation(target) else {
                        return Err(ResolutionError::MissingOperation {
                            reference: target.clone(),
                            referenced_by: operation.id().clone(),
                        });
                    };
                    tracing::trace!(from = %operation.id(), to = %target, "expanding operation");
                    stack.push((delegate, delegate.annotations().iter()));
                }
                Annotation::DelegatesToValidator(target) => {
                    codes.extend(self.validator_codes(target)?);
                }
            }
        }
        Ok(codes)
    }
}
