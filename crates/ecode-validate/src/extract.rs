//! # Code Extraction
//!
//! Reads the documented error codes out of a validator's declared rules.
//! Only metadata is read; no check is ever evaluated against an object.

use ecode_core::{ErrorCodeDescription, ResolutionError, TypeName};

use crate::registry::ValidatorRegistry;
use crate::rule::RuleSet;

/// Extract the error codes the validator bound to `target` can report.
///
/// The validator is instantiated through its registered factory and its
/// rules are read in declaration order.
///
/// # Errors
///
/// - [`ResolutionError::MissingValidator`] if no validator is registered.
/// - [`ResolutionError::ValidatorTargetMismatch`] if the instantiated
///   validator's rule set is bound to a different type.
pub fn extract_codes(
    registry: &ValidatorRegistry,
    target: &TypeName,
) -> Result<Vec<ErrorCodeDescription>, ResolutionError> {
    let validator = registry.instantiate(target)?;
    let rules = validator.rules();
    if rules.target() != target {
        return Err(ResolutionError::ValidatorTargetMismatch {
            registered: target.clone(),
            declared: rules.target().clone(),
        });
    }
    let codes = extract_from_rules(rules);
    tracing::trace!(validated_type = %target, count = codes.len(), "extracted validator codes");
    Ok(codes)
}

/// Extract error codes from a rule set. Rules without a code override
/// contribute nothing.
pub fn extract_from_rules(rules: &RuleSet) -> Vec<ErrorCodeDescription> {
    rules
        .rules()
        .iter()
        .filter_map(|rule| {
            let code = rule.error_code()?;
            Some(ErrorCodeDescription::new(rule.property(), code, rule.message()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Validator;

    fn target() -> TypeName {
        TypeName::parse("UpdateMenuRequest").unwrap()
    }

    #[test]
    fn rule_without_code_contributes_nothing() {
        let rules = RuleSet::builder(target())
            .rule_for("Title")
            .not_empty()
            .with_error_code("TitleRequired")
            .with_message("Title is required.")
            .rule_for("Notes")
            .max_length(500)
            .with_message("Notes are too long.")
            .build();

        let title = ErrorCodeDescription::for_property("Title", "TitleRequired");
        let expected = vec![title.with_description("Title is required.")];
        assert_eq!(extract_from_rules(&rules), expected);
    }

    #[test]
    fn object_level_rule_has_no_property() {
        let rules = RuleSet::builder(target())
            .rule_for_object()
            .must("dishes_unique")
            .with_error_code("DuplicateDish")
            .build();

        let expected = vec![ErrorCodeDescription::code("DuplicateDish")];
        assert_eq!(extract_from_rules(&rules), expected);
    }

    #[test]
    fn extraction_goes_through_registry() {
        let rules = RuleSet::builder(target())
            .rule_for("Property1")
            .not_null()
            .with_error_code("Code1")
            .with_message("msg1")
            .rule_for("Property2")
            .not_empty()
            .with_error_code("Code2")
            .with_message("msg2")
            .build();
        let mut registry = ValidatorRegistry::new();
        registry.register_rule_set(rules).unwrap();

        let first = ErrorCodeDescription::for_property("Property1", "Code1");
        let second = ErrorCodeDescription::for_property("Property2", "Code2");
        let codes = extract_codes(&registry, &target()).unwrap();
        assert_eq!(
            codes,
            [
                first.with_description("msg1"),
                second.with_description("msg2"),
            ]
        );
    }

    #[test]
    fn mismatched_target_is_rejected() {
        struct Misbound(RuleSet);
        impl Validator for Misbound {
            fn rules(&self) -> &RuleSet {
                &self.0
            }
        }

        let other = TypeName::parse("OtherRequest").unwrap();
        let rules = RuleSet::builder(other).build();
        let mut registry = ValidatorRegistry::new();
        registry
            .register_with(target(), move || Misbound(rules.clone()))
            .unwrap();

        let err = extract_codes(&registry, &target()).unwrap_err();
        assert!(matches!(err, ResolutionError::ValidatorTargetMismatch { .. }));
    }

    #[test]
    fn missing_validator_propagates() {
        let registry = ValidatorRegistry::new();
        let err = extract_codes(&registry, &target()).unwrap_err();
        assert!(matches!(err, ResolutionError::MissingValidator { .. }));
    }
}
