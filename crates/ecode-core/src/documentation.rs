//! # Documentation Settings
//!
//! How resolved codes are presented when appended to API documentation.
//! Manifests carry these under `documentation`; the emitter reads them.

use serde::{Deserialize, Serialize};

/// Settings for the documentation emitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentationOptions {
    /// First line of the appended section.
    pub heading: String,
    /// Append the heading even when an operation resolves to no codes.
    pub include_empty: bool,
}

impl Default for DocumentationOptions {
    fn default() -> Self {
        Self {
            heading: "Error codes:".to_string(),
            include_empty: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let options: DocumentationOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, DocumentationOptions::default());
        assert_eq!(options.heading, "Error codes:");

        let options: DocumentationOptions =
            serde_json::from_str(r#"{"include_empty": true}"#).unwrap();
        assert!(options.include_empty);
        assert_eq!(options.heading, "Error codes:");
    }
}
