//! Error types for reference table loading.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the reference library.
#[derive(Debug, Error)]
pub enum ReferenceError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Reading a specific reference file failed.
    #[error("Failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// Missing required XML field in a list item.
    #[error("Missing required XML element: {element} in {context}")]
    MissingElement { element: String, context: String },

    /// YAML (de)serialization failed.
    #[error("YAML snapshot error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// The given path is neither a snapshot file nor a mirror directory.
    #[error("Invalid reference source {}: {reason}", .path.display())]
    InvalidSource { path: PathBuf, reason: String },
}

/// Result type alias for reference operations.
pub type Result<T> = std::result::Result<T, ReferenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_element_display() {
        let err = ReferenceError::MissingElement {
            element: "countycode".to_string(),
            context: "countyItem #2".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Missing required XML element: countycode in countyItem #2"
        );
    }

    #[test]
    fn test_invalid_source_display() {
        let err = ReferenceError::InvalidSource {
            path: PathBuf::from("/tmp/nowhere"),
            reason: "does not exist".to_string(),
        };
        assert!(err.to_string().contains("/tmp/nowhere"));
        assert!(err.to_string().contains("does not exist"));
    }
}
