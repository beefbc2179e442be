//! Error types for package names, wheel tags, and package discovery.
//!
//! [`ValidationError`] covers malformed values rejected at construction time;
//! [`DiscoveryError`] covers failures of the filesystem walk. Both carry
//! the offending input so callers can report it verbatim.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors arising from invalid names, versions, tags, or target triples.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A dotted package name is empty or has a malformed segment.
    #[error("invalid package name \"{value}\": {reason}")]
    InvalidPackageName {
        /// The rejected name.
        value: String,
        /// Description of the validation failure.
        reason: String,
    },

    /// A package include or exclude pattern could not be compiled.
    #[error("invalid package pattern \"{value}\": {reason}")]
    InvalidPattern {
        /// The rejected pattern.
        value: String,
        /// Description of the compilation failure.
        reason: String,
    },

    /// A wheel tag component is empty or contains forbidden characters.
    #[error("invalid wheel tag component \"{value}\": {reason}")]
    InvalidTagComponent {
        /// The rejected component.
        value: String,
        /// Description of the validation failure.
        reason: String,
    },

    /// A version string is empty or contains whitespace.
    #[error("invalid version \"{value}\": {reason}")]
    InvalidVersion {
        /// The rejected version.
        value: String,
        /// Description of the validation failure.
        reason: String,
    },

    /// The target triple has no known wheel platform tag.
    #[error("unsupported target triple \"{value}\"; expected one of: {expected}")]
    UnsupportedTarget {
        /// The rejected triple string.
        value: String,
        /// Comma-separated list of accepted triples.
        expected: String,
    },
}

/// Errors raised while walking a source tree for packages.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The root namespace is not a valid dotted package name.
    #[error("invalid root namespace: {0}")]
    InvalidNamespace(#[source] ValidationError),

    /// The source tree root does not exist.
    #[error("source tree not found at {path}")]
    SourceTreeNotFound {
        /// The missing path.
        path: Utf8PathBuf,
    },

    /// The source tree root exists but is not a directory.
    #[error("source tree {path} is not a directory")]
    NotADirectory {
        /// The offending path.
        path: Utf8PathBuf,
    },

    /// Reading a directory or its entries failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The path being read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl DiscoveryError {
    /// Wrap an I/O error with the path that produced it.
    pub(crate) fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias using [`ValidationError`].
pub type Result<T> = std::result::Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_package_name_includes_value_and_reason() {
        let err = ValidationError::InvalidPackageName {
            value: "mlir..ir".to_owned(),
            reason: "empty segment".to_owned(),
        };
        let message = err.to_string();
        assert!(message.contains("mlir..ir"));
        assert!(message.contains("empty segment"));
    }

    #[test]
    fn source_tree_not_found_names_the_path() {
        let err = DiscoveryError::SourceTreeNotFound {
            path: Utf8PathBuf::from("/missing/tree"),
        };
        assert_eq!(err.to_string(), "source tree not found at /missing/tree");
    }

    #[test]
    fn io_error_keeps_path_and_source() {
        let err = DiscoveryError::io(
            "/tree/mlir",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let message = err.to_string();
        assert!(message.contains("/tree/mlir"));
        assert!(message.contains("denied"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
