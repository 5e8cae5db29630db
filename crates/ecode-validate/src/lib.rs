//! # ecode-validate: Validator Rule Extraction
//!
//! Validators declare their rules through a fluent builder: one rule per
//! validated property, each rule a chain of checks, each check optionally
//! overriding the error code and message it reports. This crate reads those
//! declarations back out as [`ErrorCodeDescription`]s without ever running a
//! check against an object.
//!
//! ## Extraction Rules
//!
//! For each rule, in declaration order:
//!
//! - the property name is the rule's property (`None` for object-level rules);
//! - the error code is the first explicit code override among its checks;
//!   rules without one are skipped, since they are not part of the
//!   documented taxonomy;
//! - the description is the first explicit message override, if any.
//!
//! ## Crate Policy
//!
//! - Depends only on `ecode-core` internally.
//! - Checks are descriptive metadata; nothing here validates values.
//!
//! [`ErrorCodeDescription`]: ecode_core::ErrorCodeDescription

pub mod extract;
pub mod registry;
pub mod rule;

pub use extract::{extract_codes, extract_from_rules};
pub use registry::{DeclaredValidator, Validator, ValidatorRegistry};
pub use rule::{Check, RuleBuilder, RuleComponent, RuleDefinition, RuleSet, RuleSetBuilder};
