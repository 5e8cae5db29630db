//! # Registry Snapshot
//!
//! Replaces ambient, process-wide metadata with an explicit value: the host
//! application registers its operations and validators once, calls
//! [`RegistryBuilder::build`], and passes the resulting [`Registry`] to
//! whatever needs to resolve error codes.

use std::collections::HashMap;

use ecode_core::{
    check_code, Annotation, ErrorCodeCatalog, Operation, OperationId, ResolutionError, TypeName,
};
use ecode_validate::{RuleSet, Validator, ValidatorRegistry};

use crate::resolver::Resolver;

/// Immutable set of declared operations and validator bindings.
#[derive(Debug)]
pub struct Registry {
    operations: Vec<Operation>,
    index: HashMap<OperationId, usize>,
    validators: ValidatorRegistry,
    catalog: Option<ErrorCodeCatalog>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Look up an operation by id.
    pub fn operation(&self, id: &OperationId) -> Option<&Operation> {
        self.index.get(id).map(|&i| &self.operations[i])
    }

    /// Operations in registration order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn validators(&self) -> &ValidatorRegistry {
        &self.validators
    }

    /// The closed vocabulary of codes, if one was configured.
    pub fn catalog(&self) -> Option<&ErrorCodeCatalog> {
        self.catalog.as_ref()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// A resolver reading from this registry.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(self)
    }
}

/// Collects operations and validators for a [`Registry`].
///
/// Registration methods chain; the first error encountered is held back and
/// returned from [`build`](Self::build).
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    operations: Vec<Operation>,
    validators: ValidatorRegistry,
    catalog: Option<ErrorCodeCatalog>,
    first_error: Option<ResolutionError>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict every declared and extracted code to `catalog`.
    pub fn catalog(mut self, catalog: ErrorCodeCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Register an operation.
    pub fn operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    /// Register several operations, keeping their order.
    pub fn operations(mut self, operations: impl IntoIterator<Item = Operation>) -> Self {
        self.operations.extend(operations);
        self
    }

    /// Register a default-constructible validator.
    pub fn validator_default<V>(mut self) -> Self
    where
        V: Validator + Default + 'static,
    {
        let result = self.validators.register_default::<V>().map(|_| ());
        self.record(result);
        self
    }

    /// Register a validator factory for `target`.
    pub fn validator_with<V, F>(mut self, target: TypeName, factory: F) -> Self
    where
        V: Validator + 'static,
        F: Fn() -> V + Send + Sync + 'static,
    {
        let result = self.validators.register_with(target, factory);
        self.record(result);
        self
    }

    /// Register a declarative rule set under its own target type.
    pub fn rule_set(mut self, rules: RuleSet) -> Self {
        let result = self.validators.register_rule_set(rules);
        self.record(result);
        self
    }

    /// Freeze the registry.
    ///
    /// # Errors
    ///
    /// - the first error recorded while registering validators;
    /// - [`ResolutionError::DuplicateOperation`] for a repeated operation id;
    /// - [`ResolutionError::EmptyErrorCode`] for a blank literal code;
    /// - [`ResolutionError::UnknownErrorCode`] for a literal code outside the
    ///   configured catalog.
    pub fn build(self) -> Result<Registry, ResolutionError> {
        if let Some(err) = self.first_error {
            return Err(err);
        }

        let mut index = HashMap::with_capacity(self.operations.len());
        for (i, operation) in self.operations.iter().enumerate() {
            if index.insert(operation.id().clone(), i).is_some() {
                return Err(ResolutionError::DuplicateOperation(operation.id().clone()));
            }
        }

        for operation in &self.operations {
            for annotation in operation.annotations() {
                if let Annotation::Literal(description) = annotation {
                    let origin = || format!("operation {}", operation.id());
                    check_code(self.catalog.as_ref(), description.error_code(), origin)?;
                }
            }
        }

        tracing::debug!(
            operations = self.operations.len(),
            validators = self.validators.len(),
            "registry built"
        );

        Ok(Registry {
            operations: self.operations,
            index,
            validators: self.validators,
            catalog: self.catalog,
        })
    }

    fn record(&mut self, result: Result<(), ResolutionError>) {
        if let Err(err) = result {
            self.first_error.get_or_insert(err);
        }
    }
}
