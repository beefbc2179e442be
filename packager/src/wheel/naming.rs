//! Wheel naming policy.
//!
//! Constructs deterministic wheel filenames in the form
//! `{distribution}-{version}-{python}-{abi}-{platform}.whl`, along with the
//! matching `.dist-info` directory name.

use super::tag::WheelTag;
use crate::distribution::DistributionName;
use crate::error::{Result, ValidationError};
use std::fmt;

/// The fixed file extension for wheel archives.
const WHEEL_EXTENSION: &str = ".whl";

/// A version string, accepted verbatim.
///
/// Versions are never computed or compared here; the only checks are those
/// needed to keep the wheel filename parseable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version(String);

impl Version {
    /// Return the version as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The filename-safe form, with `-` replaced by `_`.
    #[must_use]
    pub fn escaped(&self) -> String {
        self.0.replace('-', "_")
    }
}

fn validate_version(value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ValidationError::InvalidVersion {
            value: value.to_owned(),
            reason: "version is empty".to_owned(),
        });
    }
    if value.chars().any(|c| c.is_whitespace() || c == '/' || c == '\\') {
        return Err(ValidationError::InvalidVersion {
            value: value.to_owned(),
            reason: "version contains whitespace or a path separator".to_owned(),
        });
    }
    Ok(())
}

impl TryFrom<&str> for Version {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self> {
        validate_version(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for Version {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self> {
        validate_version(&value)?;
        Ok(Self(value))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fully-qualified wheel filename.
///
/// # Examples
///
/// ```
/// use wheelwright_packager::distribution::DistributionName;
/// use wheelwright_packager::wheel::naming::{Version, WheelName};
/// use wheelwright_packager::wheel::tag::{TagComponent, WheelTag};
///
/// let tag = WheelTag::new(
///     TagComponent::try_from("py3").expect("valid"),
///     TagComponent::try_from("none").expect("valid"),
///     TagComponent::try_from("linux_x86_64").expect("valid"),
/// );
/// let name = WheelName::new(
///     DistributionName::new("mlir-python-bindings"),
///     Version::try_from("19.0.0").expect("valid version"),
///     tag,
/// );
/// assert_eq!(
///     name.to_string(),
///     "mlir_python_bindings-19.0.0-py3-none-linux_x86_64.whl"
/// );
/// assert_eq!(name.dist_info_dir(), "mlir_python_bindings-19.0.0.dist-info");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelName {
    distribution: DistributionName,
    version: Version,
    tag: WheelTag,
}

impl WheelName {
    /// Create a wheel name from validated components.
    #[must_use]
    pub fn new(distribution: DistributionName, version: Version, tag: WheelTag) -> Self {
        Self {
            distribution,
            version,
            tag,
        }
    }

    /// Return the distribution component.
    #[must_use]
    pub fn distribution(&self) -> &DistributionName {
        &self.distribution
    }

    /// Return the version component.
    #[must_use]
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Return the tag component.
    #[must_use]
    pub fn tag(&self) -> &WheelTag {
        &self.tag
    }

    /// Return the filename as a string without consuming the value.
    #[must_use]
    pub fn filename(&self) -> String {
        self.to_string()
    }

    /// The metadata directory stored inside the wheel.
    #[must_use]
    pub fn dist_info_dir(&self) -> String {
        format!(
            "{}-{}.dist-info",
            self.distribution.normalized(),
            self.version.escaped()
        )
    }
}

impl fmt::Display for WheelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}{WHEEL_EXTENSION}",
            self.distribution.normalized(),
            self.version.escaped(),
            self.tag
        )
    }
}
