//! Error types for tfplug

/// Error type for tfplug value operations
#[derive(Debug, thiserror::Error)]
pub enum TfplugError {
    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("Decoding error: {0}")]
    DecodingError(String),

    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("Missing attribute: {0}")]
    MissingAttribute(String),

    #[error("Unexpected attribute: {0}")]
    UnexpectedAttribute(String),

    #[error("Invalid value at {path}: {source}")]
    AtPath {
        path: String,
        #[source]
        source: Box<TfplugError>,
    },
}

impl TfplugError {
    /// Attach the location the error occurred at. Nested locations are joined
    /// so the outermost error carries the full path.
    pub fn at(self, path: &crate::types::AttributePath) -> Self {
        let prefix = path.to_string();
        if prefix.is_empty() {
            return self;
        }
        match self {
            TfplugError::AtPath { path: inner, source } => TfplugError::AtPath {
                path: crate::types::AttributePath::join_display(&prefix, &inner),
                source,
            },
            other => TfplugError::AtPath {
                path: prefix,
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, with any path wrapping removed
    pub fn root_cause(&self) -> &TfplugError {
        match self {
            TfplugError::AtPath { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Result type alias for tfplug operations
pub type Result<T> = std::result::Result<T, TfplugError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AttributePath;

    #[test]
    fn nested_paths_are_joined() {
        let err = TfplugError::MissingAttribute("name".to_string())
            .at(&AttributePath::new("permissions").index(0))
            .at(&AttributePath::new("spec"));

        match &err {
            TfplugError::AtPath { path, .. } => assert_eq!(path, "spec.permissions[0]"),
            other => panic!("expected AtPath, got {:?}", other),
        }
        assert!(matches!(
            err.root_cause(),
            TfplugError::MissingAttribute(name) if name == "name"
        ));
    }

    #[test]
    fn root_path_leaves_error_untouched() {
        let err = TfplugError::MissingAttribute("name".to_string()).at(&AttributePath::root());
        assert!(matches!(err, TfplugError::MissingAttribute(_)));
    }
}
