//! Wheel compatibility tags.
//!
//! A wheel tag is the `{python}-{abi}-{platform}` triple that tells an
//! installer which interpreters and machines a wheel supports. Pure wheels
//! carry the universal `py3-none-any`; anything with compiled content must
//! name a concrete platform.

use crate::error::{Result, ValidationError};
use serde::Serialize;
use std::fmt;

/// The platform component of a pure, platform-independent wheel.
pub const ANY_PLATFORM: &str = "any";

/// One component of a wheel tag.
///
/// Components are non-empty and limited to ASCII alphanumerics, `_` and `.`,
/// since `-` separates components in the wheel filename.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TagComponent(String);

impl TagComponent {
    /// Return the component as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wrap a component from a compile-time table.
    pub(crate) fn from_static(value: &'static str) -> Self {
        Self(value.to_owned())
    }
}

fn validate_component(value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ValidationError::InvalidTagComponent {
            value: value.to_owned(),
            reason: "component is empty".to_owned(),
        });
    }
    if let Some(bad) = value
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '.')))
    {
        return Err(ValidationError::InvalidTagComponent {
            value: value.to_owned(),
            reason: format!("contains '{bad}'"),
        });
    }
    Ok(())
}

impl TryFrom<&str> for TagComponent {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self> {
        validate_component(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for TagComponent {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self> {
        validate_component(&value)?;
        Ok(Self(value))
    }
}

impl fmt::Display for TagComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A complete `{python}-{abi}-{platform}` wheel tag.
///
/// # Examples
///
/// ```
/// use wheelwright_packager::wheel::tag::{TagComponent, WheelTag};
///
/// let tag = WheelTag::new(
///     TagComponent::try_from("cp312").expect("valid"),
///     TagComponent::try_from("cp312").expect("valid"),
///     TagComponent::try_from("linux_x86_64").expect("valid"),
/// );
/// assert_eq!(tag.to_string(), "cp312-cp312-linux_x86_64");
/// assert!(tag.is_platform_specific());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct WheelTag {
    python: TagComponent,
    abi: TagComponent,
    platform: TagComponent,
}

impl WheelTag {
    /// Assemble a tag from validated components.
    #[must_use]
    pub fn new(python: TagComponent, abi: TagComponent, platform: TagComponent) -> Self {
        Self {
            python,
            abi,
            platform,
        }
    }

    /// The `py3-none-any` tag of a pure distribution.
    #[must_use]
    pub fn universal() -> Self {
        Self::new(
            TagComponent::from_static("py3"),
            TagComponent::from_static("none"),
            TagComponent::from_static(ANY_PLATFORM),
        )
    }

    /// Return the interpreter component.
    #[must_use]
    pub fn python(&self) -> &TagComponent {
        &self.python
    }

    /// Return the ABI component.
    #[must_use]
    pub fn abi(&self) -> &TagComponent {
        &self.abi
    }

    /// Return the platform component.
    #[must_use]
    pub fn platform(&self) -> &TagComponent {
        &self.platform
    }

    /// Whether the tag names a concrete platform rather than `any`.
    #[must_use]
    pub fn is_platform_specific(&self) -> bool {
        self.platform.as_str() != ANY_PLATFORM
    }
}

impl fmt::Display for WheelTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.python, self.abi, self.platform)
    }
}
