//! Qualified dotted package names.
//!
//! This module provides the [`PackageName`] newtype for type-safe handling of
//! package names such as `mlir.dialects.extras`. Names parsed from user input
//! must consist of identifier segments. Names grown from directories with
//! [`PackageName::child`] only need segments that are non-empty and free of
//! dots, so `mlir._mlir_libs.include.mlir-c` is a valid discovered name.

use crate::error::{Result, ValidationError};
use camino::Utf8PathBuf;
use serde::Serialize;
use std::fmt;

/// A validated, fully qualified package name.
///
/// # Examples
///
/// ```
/// use wheelwright_packager::package_name::PackageName;
///
/// let name = PackageName::try_from("mlir.dialects").expect("valid package name");
/// assert_eq!(name.top_level(), "mlir");
/// assert_eq!(name.relative_path().as_str(), "mlir/dialects");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PackageName(String);

impl PackageName {
    /// Get the package name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the dot-separated segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Return the first segment, the name installed at the top of
    /// `site-packages`.
    #[must_use]
    pub fn top_level(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }

    /// Append a directory name, producing the name of a sub-package.
    ///
    /// Any directory name can be a package segment except one that is empty
    /// or contains a dot, so `mlir-c` and `2d` are accepted here even though
    /// [`PackageName::try_from`] would reject them.
    ///
    /// ```
    /// use wheelwright_packager::package_name::PackageName;
    ///
    /// let include = PackageName::try_from("mlir.include").expect("valid");
    /// let child = include.child("mlir-c").expect("directory segment");
    /// assert_eq!(child.as_str(), "mlir.include.mlir-c");
    /// assert!(include.child(".git").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPackageName`] if `segment` is empty
    /// or contains `.`.
    pub fn child(&self, segment: &str) -> Result<Self> {
        let value = format!("{}.{segment}", self.0);
        match validate_directory_segment(segment) {
            Ok(()) => Ok(Self(value)),
            Err(reason) => Err(ValidationError::InvalidPackageName { value, reason }),
        }
    }

    /// Name a top-level package after its directory, with the same rule as
    /// [`PackageName::child`].
    pub(crate) fn from_directory(segment: &str) -> Result<Self> {
        validate_directory_segment(segment).map_err(|reason| ValidationError::InvalidPackageName {
            value: segment.to_owned(),
            reason,
        })?;
        Ok(Self(segment.to_owned()))
    }

    /// Whether this name is `namespace` itself or one of its descendants.
    ///
    /// ```
    /// use wheelwright_packager::package_name::PackageName;
    ///
    /// let root = PackageName::try_from("mlir").expect("valid");
    /// let child = PackageName::try_from("mlir.ir").expect("valid");
    /// let sibling = PackageName::try_from("mlirx").expect("valid");
    /// assert!(child.is_within(&root));
    /// assert!(!sibling.is_within(&root));
    /// ```
    #[must_use]
    pub fn is_within(&self, namespace: &Self) -> bool {
        self.0 == namespace.0
            || self
                .0
                .strip_prefix(namespace.as_str())
                .is_some_and(|rest| rest.starts_with('.'))
    }

    /// The directory holding this package, relative to the source tree.
    #[must_use]
    pub fn relative_path(&self) -> Utf8PathBuf {
        self.segments().collect()
    }
}

/// A directory becomes a package unless its name is empty or dotted.
fn validate_directory_segment(segment: &str) -> std::result::Result<(), String> {
    if segment.is_empty() {
        return Err("empty segment".to_owned());
    }
    if segment.contains('.') {
        return Err(format!("directory \"{segment}\" contains '.'"));
    }
    Ok(())
}

/// Check a single segment against identifier rules: a letter or underscore
/// followed by letters, digits, or underscores.
fn validate_segment(segment: &str) -> std::result::Result<(), String> {
    let mut chars = segment.chars();
    let Some(first) = chars.next() else {
        return Err("empty segment".to_owned());
    };
    if !(first.is_alphabetic() || first == '_') {
        return Err(format!("segment \"{segment}\" must start with a letter or underscore"));
    }
    if let Some(bad) = chars.find(|c| !(c.is_alphanumeric() || *c == '_')) {
        return Err(format!("segment \"{segment}\" contains '{bad}'"));
    }
    Ok(())
}

fn validate_name(value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ValidationError::InvalidPackageName {
            value: value.to_owned(),
            reason: "name is empty".to_owned(),
        });
    }
    for segment in value.split('.') {
        validate_segment(segment).map_err(|reason| ValidationError::InvalidPackageName {
            value: value.to_owned(),
            reason,
        })?;
    }
    Ok(())
}

impl TryFrom<&str> for PackageName {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self> {
        validate_name(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for PackageName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self> {
        validate_name(&value)?;
        Ok(Self(value))
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
