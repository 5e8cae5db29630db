//! # Rule Sets
//!
//! The declared shape of a validator: a target type and an ordered list of
//! rules. Validators build their rule set once, typically in their
//! constructor:
//!
//! ```
//! use ecode_core::TypeName;
//! use ecode_validate::RuleSet;
//!
//! let rules = RuleSet::builder(TypeName::parse("CreateOrderRequest").unwrap())
//!     .rule_for("CustomerName")
//!         .not_empty().with_error_code("NameRequired").with_message("A name is required.")
//!         .max_length(100).with_error_code("NameTooLong")
//!     .rule_for("Notes")
//!         .max_length(2000)
//!     .build();
//!
//! assert_eq!(rules.rules().len(), 2);
//! ```
//!
//! Code and message overrides attach to the most recently added check. On a
//! rule with no checks yet they attach to a [`Check::Rule`] component that
//! stands for the rule as a whole.

use ecode_core::TypeName;
use serde::{Deserialize, Serialize};

/// A single check inside a rule. Descriptive only: no check is ever
/// evaluated by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum Check {
    /// The rule as a whole, used when overrides precede any explicit check.
    Rule,
    NotNull,
    NotEmpty,
    Email,
    Length { min: usize, max: usize },
    MinLength { min: usize },
    MaxLength { max: usize },
    Matches { pattern: String },
    GreaterThan { value: i64 },
    LessThan { value: i64 },
    InclusiveBetween { from: i64, to: i64 },
    /// An application-defined predicate, identified by name.
    Must { name: String },
}

/// A check together with the overrides declared on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleComponent {
    #[serde(flatten)]
    pub check: Check,
    #[serde(rename = "code", default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RuleComponent {
    /// A check with no overrides.
    pub fn new(check: Check) -> Self {
        Self {
            check,
            error_code: None,
            message: None,
        }
    }
}

/// All checks declared for one property (or for the whole object).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    property: Option<String>,
    #[serde(rename = "checks", default)]
    components: Vec<RuleComponent>,
}

impl RuleDefinition {
    /// The validated member; `None` for object-level rules.
    pub fn property(&self) -> Option<&str> {
        self.property.as_deref()
    }

    pub fn components(&self) -> &[RuleComponent] {
        &self.components
    }

    /// The first explicit error-code override among this rule's checks.
    pub fn error_code(&self) -> Option<&str> {
        self.components
            .iter()
            .find_map(|component| component.error_code.as_deref())
    }

    /// The first explicit message override among this rule's checks.
    pub fn message(&self) -> Option<&str> {
        self.components
            .iter()
            .find_map(|component| component.message.as_deref())
    }
}

/// The rules a validator declares for its target type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    target: TypeName,
    #[serde(default)]
    rules: Vec<RuleDefinition>,
}

impl RuleSet {
    /// Start declaring rules for `target`.
    pub fn builder(target: TypeName) -> RuleSetBuilder {
        RuleSetBuilder {
            target,
            rules: Vec::new(),
        }
    }

    /// A rule set from already-declared rules, e.g. decoded from a manifest.
    pub fn from_rules(target: TypeName, rules: Vec<RuleDefinition>) -> Self {
        Self { target, rules }
    }

    /// The type this rule set is bound to.
    pub fn target(&self) -> &TypeName {
        &self.target
    }

    /// Rules in declaration order.
    pub fn rules(&self) -> &[RuleDefinition] {
        &self.rules
    }
}

/// Accumulates rules for a [`RuleSet`].
#[derive(Debug)]
pub struct RuleSetBuilder {
    target: TypeName,
    rules: Vec<RuleDefinition>,
}

impl RuleSetBuilder {
    /// Start a rule for the named property.
    pub fn rule_for(self, property: impl Into<String>) -> RuleBuilder {
        self.start(Some(property.into()))
    }

    /// Start a rule that applies to the object as a whole.
    pub fn rule_for_object(self) -> RuleBuilder {
        self.start(None)
    }

    pub fn build(self) -> RuleSet {
        RuleSet {
            target: self.target,
            rules: self.rules,
        }
    }

    fn start(self, property: Option<String>) -> RuleBuilder {
        RuleBuilder {
            parent: self,
            rule: RuleDefinition {
                property,
                components: Vec::new(),
            },
        }
    }
}

/// Accumulates checks for the rule currently being declared.
#[derive(Debug)]
pub struct RuleBuilder {
    parent: RuleSetBuilder,
    rule: RuleDefinition,
}

impl RuleBuilder {
    /// Append a check.
    pub fn check(mut self, check: Check) -> Self {
        self.rule.components.push(RuleComponent::new(check));
        self
    }

    pub fn not_null(self) -> Self {
        self.check(Check::NotNull)
    }

    pub fn not_empty(self) -> Self {
        self.check(Check::NotEmpty)
    }

    pub fn email(self) -> Self {
        self.check(Check::Email)
    }

    pub fn length(self, min: usize, max: usize) -> Self {
        self.check(Check::Length { min, max })
    }

    pub fn min_length(self, min: usize) -> Self {
        self.check(Check::MinLength { min })
    }

    pub fn max_length(self, max: usize) -> Self {
        self.check(Check::MaxLength { max })
    }

    pub fn matches(self, pattern: impl Into<String>) -> Self {
        self.check(Check::Matches {
            pattern: pattern.into(),
        })
    }

    pub fn greater_than(self, value: i64) -> Self {
        self.check(Check::GreaterThan { value })
    }

    pub fn less_than(self, value: i64) -> Self {
        self.check(Check::LessThan { value })
    }

    pub fn inclusive_between(self, from: i64, to: i64) -> Self {
        self.check(Check::InclusiveBetween { from, to })
    }

    pub fn must(self, name: impl Into<String>) -> Self {
        self.check(Check::Must { name: name.into() })
    }

    /// Override the error code reported by the most recent check.
    pub fn with_error_code(mut self, code: impl Into<String>) -> Self {
        self.last_component().error_code = Some(code.into());
        self
    }

    /// Override the message reported by the most recent check.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.last_component().message = Some(message.into());
        self
    }

    /// Finish this rule and start one for another property.
    pub fn rule_for(self, property: impl Into<String>) -> RuleBuilder {
        self.finish().rule_for(property)
    }

    /// Finish this rule and start an object-level one.
    pub fn rule_for_object(self) -> RuleBuilder {
        self.finish().rule_for_object()
    }

    /// Finish this rule and the rule set.
    pub fn build(self) -> RuleSet {
        self.finish().build()
    }

    fn finish(self) -> RuleSetBuilder {
        let mut parent = self.parent;
        parent.rules.push(self.rule);
        parent
    }

    fn last_component(&mut self) -> &mut RuleComponent {
        if self.rule.components.is_empty() {
            self.rule.components.push(RuleComponent::new(Check::Rule));
        }
        let last = self.rule.components.len() - 1;
        &mut self.rule.components[last]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> TypeName {
        TypeName::parse("CreateOrderRequest").unwrap()
    }

    #[test]
    fn builder_records_rules_in_order() {
        let rules = RuleSet::builder(target())
            .rule_for("Name")
            .not_empty()
            .with_error_code("NameRequired")
            .rule_for("Quantity")
            .greater_than(0)
            .rule_for_object()
            .must("consistent_totals")
            .with_error_code("TotalsMismatch")
            .build();

        let props: Vec<Option<&str>> = rules.rules().iter().map(|r| r.property()).collect();
        assert_eq!(props, [Some("Name"), Some("Quantity"), None]);
        assert_eq!(rules.target(), &target());
    }

    #[test]
    fn first_override_wins_per_rule() {
        let rules = RuleSet::builder(target())
            .rule_for("Name")
            .not_empty()
            .with_message("first message")
            .max_length(10)
            .with_error_code("NameTooLong")
            .with_message("second message")
            .matches("^[a-z]+$")
            .with_error_code("NameFormat")
            .build();

        let rule = &rules.rules()[0];
        assert_eq!(rule.error_code(), Some("NameTooLong"));
        assert_eq!(rule.message(), Some("first message"));
        assert_eq!(rule.components().len(), 3);
    }

    #[test]
    fn override_without_check_attaches_to_rule() {
        let rules = RuleSet::builder(target())
            .rule_for("Name")
            .with_error_code("NameInvalid")
            .build();
        let rule = &rules.rules()[0];
        assert_eq!(rule.components()[0].check, Check::Rule);
        assert_eq!(rule.error_code(), Some("NameInvalid"));
    }

    #[test]
    fn later_override_on_same_check_replaces_earlier() {
        let rules = RuleSet::builder(target())
            .rule_for("Name")
            .not_empty()
            .with_error_code("Draft")
            .with_error_code("NameRequired")
            .build();
        assert_eq!(rules.rules()[0].error_code(), Some("NameRequired"));
    }

    #[test]
    fn rule_set_deserializes_from_declarative_form() {
        let json = serde_json::json!({
            "target": "CreateOrderRequest",
            "rules": [
                {
                    "property": "Name",
                    "checks": [
                        {
                            "check": "not_empty",
                            "code": "NameRequired",
                            "message": "Name is required."
                        },
                        {"check": "max_length", "max": 100}
                    ]
                },
                {"checks": [{"check": "must", "name": "totals", "code": "TotalsMismatch"}]}
            ]
        });
        let rules: RuleSet = serde_json::from_value(json).unwrap();
        assert_eq!(rules.rules().len(), 2);
        let second = &rules.rules()[0].components()[1];
        assert_eq!(second.check, Check::MaxLength { max: 100 });
        assert_eq!(rules.rules()[1].property(), None);
        assert_eq!(rules.rules()[1].error_code(), Some("TotalsMismatch"));
    }
}
