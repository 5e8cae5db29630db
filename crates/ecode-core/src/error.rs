//! # Error Types: Resolution Error Taxonomy
//!
//! Defines the single error type produced while building a registry,
//! constructing annotations, or resolving an operation's error codes.
//!
//! ## Design
//!
//! - Missing references name both the missing target and the operation that
//!   referenced it.
//! - Malformed references are reported at annotation construction, with the
//!   offending string and the rule it broke.
//! - Reference cycles are a normal graph shape and have no variant here.
//!
//! Every variant is a configuration defect. Callers (documentation
//! generation, tests) surface them immediately; nothing is retried.

use std::fmt;

use thiserror::Error;

use crate::identity::{OperationId, TypeName};

/// Which kind of name a reference string was supposed to parse into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// A qualified operation name (`Group.Operation`).
    Operation,
    /// A validated target type name.
    Type,
}

impl ReferenceKind {
    /// Returns the lowercase label used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Operation => "operation",
            Self::Type => "type",
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised while building metadata or resolving error codes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// The operation passed to the resolver is not registered.
    #[error("unknown operation {0}")]
    UnknownOperation(OperationId),

    /// An operation delegates to another operation that is not registered.
    #[error("operation {referenced_by} delegates to {reference}, which is not registered")]
    MissingOperation {
        /// The delegation target that could not be found.
        reference: OperationId,
        /// The operation carrying the delegation annotation.
        referenced_by: OperationId,
    },

    /// No validator is registered for the requested target type.
    #[error("no validator registered for type {target}")]
    MissingValidator {
        /// The type whose validator was requested.
        target: TypeName,
    },

    /// A validator's rule set is bound to a different type than the one it
    /// was registered under.
    #[error("validator registered for {registered} declares rules for {declared}")]
    ValidatorTargetMismatch {
        /// Type the factory was registered under.
        registered: TypeName,
        /// Type the instantiated rule set is bound to.
        declared: TypeName,
    },

    /// A reference string does not parse into a qualified name.
    #[error("malformed {kind} reference {reference:?}: {reason}")]
    MalformedReference {
        /// What the string was expected to name.
        kind: ReferenceKind,
        /// The rejected input.
        reference: String,
        /// Which naming rule the input broke.
        reason: String,
    },

    /// Two operations were registered with the same identifier.
    #[error("operation {0} is registered more than once")]
    DuplicateOperation(OperationId),

    /// Two validators were registered for the same target type.
    #[error("a validator for {0} is registered more than once")]
    DuplicateValidator(TypeName),

    /// A declared error code is not part of the registry's catalog.
    #[error("error code {code:?} declared by {origin} is not in the catalog")]
    UnknownErrorCode {
        /// The unrecognised code.
        code: String,
        /// Where the code was declared, e.g. `operation Orders.Create`.
        origin: String,
    },

    /// A literal or validator rule declares an empty error code.
    #[error("{origin} declares an empty error code")]
    EmptyErrorCode {
        /// Where the code was declared, e.g. `validator for CreateOrderRequest`.
        origin: String,
    },
}

impl ResolutionError {
    /// Build a [`ResolutionError::MalformedReference`].
    pub fn malformed(kind: ReferenceKind, reference: &str, reason: impl Into<String>) -> Self {
        Self::MalformedReference {
            kind,
            reference: reference.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns true for the "reference points at nothing" family of errors.
    pub fn is_missing_reference(&self) -> bool {
        matches!(
            self,
            Self::UnknownOperation(_)
                | Self::MissingOperation { .. }
                | Self::MissingValidator { .. }
        )
    }
}
