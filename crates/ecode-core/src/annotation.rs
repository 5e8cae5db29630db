//! # Operations and Their Annotations
//!
//! An [`Operation`] is an API method plus the ordered list of annotations
//! declaring which error codes it can return. Three annotation kinds exist:
//!
//! | Annotation | Meaning |
//! |---|---|
//! | `Literal` | this operation returns the given code directly |
//! | `DelegatesToOperation` | every code of the target operation applies here too |
//! | `DelegatesToValidator` | every code of the validator bound to the target type applies here too |
//!
//! Declaration order is the order annotations were attached and is the
//! order in which the resolver splices contributions.

use crate::description::ErrorCodeDescription;
use crate::error::ResolutionError;
use crate::identity::{OperationId, TypeName};

/// One declarative statement about an operation's error codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Annotation {
    /// A code declared directly on the operation.
    Literal(ErrorCodeDescription),
    /// Inherit every code the target operation can produce.
    DelegatesToOperation(OperationId),
    /// Inherit every code the validator for the target type can produce.
    DelegatesToValidator(TypeName),
}

impl Annotation {
    /// A literal code annotation.
    pub fn literal(
        property_name: Option<&str>,
        error_code: &str,
        description: Option<&str>,
    ) -> Self {
        Self::Literal(ErrorCodeDescription::new(property_name, error_code, description))
    }

    /// Delegate to another operation, parsing the reference eagerly.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::MalformedReference`] if `reference` is not a
    /// qualified operation name.
    pub fn delegates_to_operation(reference: &str) -> Result<Self, ResolutionError> {
        Ok(Self::DelegatesToOperation(OperationId::parse(reference)?))
    }

    /// Delegate to the validator bound to a type, parsing the reference eagerly.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::MalformedReference`] if `reference` is not a
    /// valid type name.
    pub fn delegates_to_validator(reference: &str) -> Result<Self, ResolutionError> {
        Ok(Self::DelegatesToValidator(TypeName::parse(reference)?))
    }
}

/// An API operation and its ordered annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    id: OperationId,
    annotations: Vec<Annotation>,
}

impl Operation {
    /// An operation with no annotations yet.
    pub fn new(id: OperationId) -> Self {
        Self {
            id,
            annotations: Vec::new(),
        }
    }

    /// Parse the identifier and create an operation with no annotations.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::MalformedReference`] for a malformed id.
    pub fn parse(id: &str) -> Result<Self, ResolutionError> {
        OperationId::parse(id).map(Self::new)
    }

    /// Append an annotation after those already declared.
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Append a literal code.
    pub fn literal(
        self,
        property_name: Option<&str>,
        error_code: &str,
        description: Option<&str>,
    ) -> Self {
        self.with_annotation(Annotation::literal(property_name, error_code, description))
    }

    /// Append a delegation to another operation.
    ///
    /// # Errors
    ///
    /// Fails fast on a malformed reference.
    pub fn delegates_to_operation(self, reference: &str) -> Result<Self, ResolutionError> {
        Ok(self.with_annotation(Annotation::delegates_to_operation(reference)?))
    }

    /// Append a delegation to a type's validator.
    ///
    /// # Errors
    ///
    /// Fails fast on a malformed reference.
    pub fn delegates_to_validator(self, reference: &str) -> Result<Self, ResolutionError> {
        Ok(self.with_annotation(Annotation::delegates_to_validator(reference)?))
    }

    pub fn id(&self) -> &OperationId {
        &self.id
    }

    /// Annotations in declaration order.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Literal codes declared directly on this operation, in order.
    pub fn literal_codes(&self) -> impl Iterator<Item = &ErrorCodeDescription> {
        self.annotations.iter().filter_map(|a| match a {
            Annotation::Literal(description) => Some(description),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotations_keep_declaration_order() {
        let op = Operation::parse("Orders.Create")
            .unwrap()
            .literal(None, "FirstCode", None)
            .delegates_to_validator("CreateOrderRequest")
            .unwrap()
            .delegates_to_operation("Orders.Common")
            .unwrap()
            .literal(Some("param"), "SecondCode", Some("Description"));

        assert_eq!(op.annotations().len(), 4);
        assert!(matches!(op.annotations()[0], Annotation::Literal(_)));
        assert!(matches!(
            op.annotations()[1],
            Annotation::DelegatesToValidator(_)
        ));
        assert!(matches!(
            op.annotations()[2],
            Annotation::DelegatesToOperation(_)
        ));
        let literals: Vec<&str> = op.literal_codes().map(|d| d.error_code()).collect();
        assert_eq!(literals, ["FirstCode", "SecondCode"]);
    }

    #[test]
    fn malformed_delegation_fails_at_construction() {
        let result = Operation::parse("Orders.Create")
            .unwrap()
            .delegates_to_operation("NotQualified");
        assert!(matches!(
            result,
            Err(ResolutionError::MalformedReference { .. })
        ));

        assert!(Annotation::delegates_to_validator("Bad Type").is_err());
    }
}
