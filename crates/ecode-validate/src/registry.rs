//! # Validator Registry
//!
//! Binds each validated type to exactly one validator factory. Factories
//! are invoked on demand, so validators with collaborators can be wired up
//! by the host through [`ValidatorRegistry::register_with`], while plain
//! validators are default-constructed via
//! [`ValidatorRegistry::register_default`].
//!
//! ## Thread Safety
//!
//! Factories are `Send + Sync`; a populated registry can be shared across
//! threads and read concurrently without locking.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use ecode_core::{ResolutionError, TypeName};

use crate::rule::RuleSet;

/// A validator whose declared rules can be inspected.
pub trait Validator: Send + Sync {
    /// The validator's declared rule set.
    fn rules(&self) -> &RuleSet;
}

/// A validator made only of declarations, e.g. one loaded from a manifest.
#[derive(Debug, Clone)]
pub struct DeclaredValidator {
    rules: RuleSet,
}

impl DeclaredValidator {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }
}

impl Validator for DeclaredValidator {
    fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

type Factory = Arc<dyn Fn() -> Box<dyn Validator> + Send + Sync>;

/// Map from validated type to the factory producing its validator.
#[derive(Clone, Default)]
pub struct ValidatorRegistry {
    factories: BTreeMap<TypeName, Factory>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a default-constructible validator. The target type is read
    /// from the rule set of a default instance.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::DuplicateValidator`] if the target type
    /// already has a validator.
    pub fn register_default<V>(&mut self) -> Result<TypeName, ResolutionError>
    where
        V: Validator + Default + 'static,
    {
        let target = V::default().rules().target().clone();
        let factory: Factory = Arc::new(|| Box::new(V::default()) as Box<dyn Validator>);
        self.insert(target.clone(), factory)?;
        Ok(target)
    }

    /// Register a factory for `target`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::DuplicateValidator`] if the target type
    /// already has a validator.
    pub fn register_with<V, F>(
        &mut self,
        target: TypeName,
        factory: F,
    ) -> Result<(), ResolutionError>
    where
        V: Validator + 'static,
        F: Fn() -> V + Send + Sync + 'static,
    {
        self.insert(
            target,
            Arc::new(move || Box::new(factory()) as Box<dyn Validator>),
        )
    }

    /// Register a purely declarative rule set under its own target type.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::DuplicateValidator`] if the target type
    /// already has a validator.
    pub fn register_rule_set(&mut self, rules: RuleSet) -> Result<(), ResolutionError> {
        let target = rules.target().clone();
        let validator = DeclaredValidator::new(rules);
        self.insert(
            target,
            Arc::new(move || Box::new(validator.clone()) as Box<dyn Validator>),
        )
    }

    pub fn contains(&self, target: &TypeName) -> bool {
        self.factories.contains_key(target)
    }

    /// Registered target types, sorted.
    pub fn targets(&self) -> impl Iterator<Item = &TypeName> {
        self.factories.keys()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Instantiate the validator bound to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::MissingValidator`] if nothing is registered
    /// for `target`.
    pub fn instantiate(&self, target: &TypeName) -> Result<Box<dyn Validator>, ResolutionError> {
        let factory = self
            .factories
            .get(target)
            .ok_or_else(|| ResolutionError::MissingValidator {
                target: target.clone(),
            })?;
        Ok(factory())
    }

    fn insert(&mut self, target: TypeName, factory: Factory) -> Result<(), ResolutionError> {
        if self.factories.contains_key(&target) {
            return Err(ResolutionError::DuplicateValidator(target));
        }
        self.factories.insert(target, factory);
        Ok(())
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("targets", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
