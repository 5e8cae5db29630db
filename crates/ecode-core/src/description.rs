//! # Error-Code Descriptions
//!
//! The value every resolution produces: which input property an error
//! relates to (if any), the stable error code, and an optional
//! human-readable description.
//!
//! ## Invariant
//!
//! Two descriptions are duplicates iff property, code, and description are
//! all equal. [`dedup_stable`] drops later duplicates and keeps the first
//! occurrence, so a more specific description declared elsewhere in the
//! graph is never folded into a less specific one.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One error code an operation can return.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCodeDescription {
    #[serde(rename = "property", default, skip_serializing_if = "Option::is_none")]
    property_name: Option<String>,
    #[serde(rename = "code")]
    error_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl ErrorCodeDescription {
    /// Create a description from all three parts.
    pub fn new(
        property_name: Option<impl Into<String>>,
        error_code: impl Into<String>,
        description: Option<impl Into<String>>,
    ) -> Self {
        Self {
            property_name: property_name.map(Into::into),
            error_code: error_code.into(),
            description: description.map(Into::into),
        }
    }

    /// An object-level code with no property and no description.
    pub fn code(error_code: impl Into<String>) -> Self {
        Self {
            property_name: None,
            error_code: error_code.into(),
            description: None,
        }
    }

    /// A code bound to an input property, without description.
    pub fn for_property(property_name: impl Into<String>, error_code: impl Into<String>) -> Self {
        Self {
            property_name: Some(property_name.into()),
            error_code: error_code.into(),
            description: None,
        }
    }

    /// Returns a copy with the description replaced.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The input property the error relates to; `None` for object-level errors.
    pub fn property_name(&self) -> Option<&str> {
        self.property_name.as_deref()
    }

    /// The stable error code.
    pub fn error_code(&self) -> &str {
        &self.error_code
    }

    /// Optional human-readable description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Renders as a documentation bullet body:
/// `"Name": NameRequired - Name is required.`
impl fmt::Display for ErrorCodeDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(property) = &self.property_name {
            write!(f, "\"{property}\": ")?;
        }
        f.write_str(&self.error_code)?;
        if let Some(description) = &self.description {
            write!(f, " - {description}")?;
        }
        Ok(())
    }
}

/// Remove structural duplicates in place, keeping first occurrences and
/// preserving the relative order of everything kept.
pub fn dedup_stable(entries: &mut Vec<ErrorCodeDescription>) {
    let keep: Vec<bool> = {
        let mut seen = HashSet::with_capacity(entries.len());
        entries.iter().map(|entry| seen.insert(entry)).collect()
    };
    let mut keep = keep.into_iter();
    entries.retain(|_| keep.next().unwrap_or(false));
}
