//! # Qualified Names
//!
//! Newtype wrappers for the two kinds of names an annotation can reference.
//! You cannot pass a `TypeName` where an `OperationId` is expected, and
//! neither can be constructed from a string that does not parse.
//!
//! ## Grammar
//!
//! ```text
//! segment      = (ALPHA | "_") *(ALPHA | DIGIT | "_")
//! operation-id = segment 1*("." segment)              ; Orders.Create
//! type-name    = segment *(("." | "::") segment)      ; CreateOrderRequest, api::orders::Create
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ReferenceKind, ResolutionError};

/// Qualified name of an operation, e.g. `Restaurants.GetRestaurant`.
///
/// At least two segments: the owning group and the operation itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OperationId(String);

/// Name of a validated target type, e.g. `CreateOrderRequest`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeName(String);

impl OperationId {
    /// Parse a qualified operation name.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::MalformedReference`] if the input is not
    /// two or more valid segments joined by `.`.
    pub fn parse(reference: &str) -> Result<Self, ResolutionError> {
        let kind = ReferenceKind::Operation;
        let segments: Vec<&str> = reference.split('.').collect();
        check_segments(kind, reference, &segments)?;
        if segments.len() < 2 {
            return Err(ResolutionError::malformed(
                kind,
                reference,
                "expected a qualified name of the form Group.Operation",
            ));
        }
        Ok(Self(reference.to_string()))
    }

    /// Access the full qualified name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The leading segments naming the group that owns the operation.
    pub fn group(&self) -> &str {
        self.0.rsplit_once('.').map_or("", |(group, _)| group)
    }

    /// The final segment, the operation's own name.
    pub fn name(&self) -> &str {
        match self.0.rsplit_once('.') {
            Some((_, name)) => name,
            None => &self.0,
        }
    }
}

impl TypeName {
    /// Parse a validated type name. Both `.` and `::` separate segments.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::MalformedReference`] if any segment is
    /// empty or contains characters outside the identifier alphabet.
    pub fn parse(reference: &str) -> Result<Self, ResolutionError> {
        let segments: Vec<&str> = reference
            .split("::")
            .flat_map(|part| part.split('.'))
            .collect();
        check_segments(ReferenceKind::Type, reference, &segments)?;
        Ok(Self(reference.to_string()))
    }

    /// Access the full type name as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn check_segments(
    kind: ReferenceKind,
    reference: &str,
    segments: &[&str],
) -> Result<(), ResolutionError> {
    if reference.is_empty() {
        return Err(ResolutionError::malformed(kind, reference, "empty reference"));
    }
    for segment in segments {
        let mut chars = segment.chars();
        let Some(first) = chars.next() else {
            return Err(ResolutionError::malformed(kind, reference, "empty segment"));
        };
        if !(first.is_ascii_alphabetic() || first == '_') {
            return Err(ResolutionError::malformed(
                kind,
                reference,
                format!("segment {segment:?} must start with a letter or underscore"),
            ));
        }
        if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
            return Err(ResolutionError::malformed(
                kind,
                reference,
                format!("invalid character {bad:?} in segment {segment:?}"),
            ));
        }
    }
    Ok(())
}

impl FromStr for OperationId {
    type Err = ResolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl FromStr for TypeName {
    type Err = ResolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for OperationId {
    type Error = ResolutionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<String> for TypeName {
    type Error = ResolutionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<OperationId> for String {
    fn from(id: OperationId) -> Self {
        id.0
    }
}

impl From<TypeName> for String {
    fn from(name: TypeName) -> Self {
        name.0
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
