//! # Error-Code Catalog
//!
//! The closed vocabulary of error codes an application may return. A
//! registry built with a catalog rejects any declared or extracted code that
//! is not listed, which catches typos in annotations and validator rules
//! before they reach published documentation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ResolutionError;

/// A known error code with an optional one-line summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Ordered set of known error codes.
#[derive(Debug, Clone, Default)]
pub struct ErrorCodeCatalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
}

impl ErrorCodeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a code. Returns `false` (and leaves the catalog unchanged) if the
    /// code is already present.
    pub fn insert(&mut self, code: impl Into<String>, summary: Option<String>) -> bool {
        let code = code.into();
        if self.index.contains_key(&code) {
            return false;
        }
        self.index.insert(code.clone(), self.entries.len());
        self.entries.push(CatalogEntry { code, summary });
        true
    }

    /// Builder-style [`insert`](Self::insert) without a summary.
    pub fn with(mut self, code: impl Into<String>) -> Self {
        self.insert(code, None);
        self
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    pub fn summary(&self, code: &str) -> Option<&str> {
        self.index
            .get(code)
            .and_then(|&i| self.entries[i].summary.as_deref())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check that `code` is known.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::UnknownErrorCode`] naming `origin`.
    pub fn check(
        &self,
        code: &str,
        origin: impl FnOnce() -> String,
    ) -> Result<(), ResolutionError> {
        if self.contains(code) {
            Ok(())
        } else {
            Err(ResolutionError::UnknownErrorCode {
                code: code.to_string(),
                origin: origin(),
            })
        }
    }
}

/// Check a declared code: it must be non-blank and, when a catalog is
/// configured, listed in it.
///
/// # Errors
///
/// [`ResolutionError::EmptyErrorCode`] or
/// [`ResolutionError::UnknownErrorCode`], both naming `origin`.
pub fn check_code(
    catalog: Option<&ErrorCodeCatalog>,
    code: &str,
    origin: impl FnOnce() -> String,
) -> Result<(), ResolutionError> {
    if code.trim().is_empty() {
        return Err(ResolutionError::EmptyErrorCode { origin: origin() });
    }
    match catalog {
        Some(catalog) => catalog.check(code, origin),
        None => Ok(()),
    }
}

impl FromIterator<CatalogEntry> for ErrorCodeCatalog {
    fn from_iter<I: IntoIterator<Item = CatalogEntry>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for entry in iter {
            catalog.insert(entry.code, entry.summary);
        }
        catalog
    }
}
