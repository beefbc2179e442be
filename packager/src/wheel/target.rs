//! Target triple validation and wheel platform tags.
//!
//! Only triples with a known wheel platform tag are accepted. Any other triple
//! is rejected at construction time with a descriptive error.

use super::tag::TagComponent;
use crate::error::{Result, ValidationError};
use serde::Serialize;
use std::fmt;

/// Supported target triples and the wheel platform tag each maps to.
const SUPPORTED_TARGETS: &[(&str, &str)] = &[
    ("x86_64-unknown-linux-gnu", "linux_x86_64"),
    ("aarch64-unknown-linux-gnu", "linux_aarch64"),
    ("x86_64-apple-darwin", "macosx_10_12_x86_64"),
    ("aarch64-apple-darwin", "macosx_11_0_arm64"),
    ("x86_64-pc-windows-msvc", "win_amd64"),
];

/// A validated target triple with a known wheel platform tag.
///
/// # Examples
///
/// ```
/// use wheelwright_packager::wheel::target::TargetTriple;
///
/// let triple: TargetTriple = "x86_64-unknown-linux-gnu"
///     .try_into()
///     .expect("valid target triple");
/// assert_eq!(triple.platform_tag().as_str(), "linux_x86_64");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TargetTriple(String);

impl TargetTriple {
    /// Return the triple as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the full list of supported target triples.
    #[must_use]
    pub fn supported() -> Vec<&'static str> {
        SUPPORTED_TARGETS.iter().map(|(triple, _)| *triple).collect()
    }

    /// The triple of the machine running this process.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnsupportedTarget`] when the host has no
    /// known wheel platform tag.
    pub fn host() -> Result<Self> {
        use std::env::consts::{ARCH, OS};

        let triple = match (ARCH, OS) {
            ("x86_64", "linux") => "x86_64-unknown-linux-gnu",
            ("aarch64", "linux") => "aarch64-unknown-linux-gnu",
            ("x86_64", "macos") => "x86_64-apple-darwin",
            ("aarch64", "macos") => "aarch64-apple-darwin",
            ("x86_64", "windows") => "x86_64-pc-windows-msvc",
            (arch, os) => {
                return Err(ValidationError::UnsupportedTarget {
                    value: format!("{arch}-{os}"),
                    expected: Self::supported().join(", "),
                });
            }
        };
        Self::try_from(triple)
    }

    /// The wheel platform tag for this triple, e.g. `win_amd64`.
    #[must_use]
    pub fn platform_tag(&self) -> TagComponent {
        let tag = SUPPORTED_TARGETS
            .iter()
            .find(|(triple, _)| *triple == self.0)
            .map_or("any", |(_, tag)| *tag);
        TagComponent::from_static(tag)
    }
}

impl TryFrom<&str> for TargetTriple {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self> {
        if SUPPORTED_TARGETS.iter().any(|(triple, _)| *triple == value) {
            Ok(Self(value.to_owned()))
        } else {
            Err(ValidationError::UnsupportedTarget {
                value: value.to_owned(),
                expected: Self::supported().join(", "),
            })
        }
    }
}

impl TryFrom<String> for TargetTriple {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self> {
        Self::try_from(value.as_str())
    }
}

impl AsRef<str> for TargetTriple {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn accepts_all_supported_targets() {
        for target in TargetTriple::supported() {
            let triple = TargetTriple::try_from(target);
            assert!(triple.is_ok(), "expected {target} to be accepted");
            assert_eq!(triple.expect("checked above").as_str(), target);
        }
    }

    #[test]
    fn rejects_unsupported_target() {
        let err = TargetTriple::try_from("wasm32-unknown-unknown")
            .expect_err("expected rejection of unsupported target");
        assert!(
            matches!(err, ValidationError::UnsupportedTarget { .. }),
            "expected UnsupportedTarget, got {err:?}"
        );
    }

    #[test]
    fn rejects_empty_string() {
        assert!(TargetTriple::try_from("").is_err());
    }

    #[test]
    fn display_shows_inner_value() {
        let triple = TargetTriple::try_from("aarch64-apple-darwin").expect("known good");
        assert_eq!(format!("{triple}"), "aarch64-apple-darwin");
    }

    #[rstest]
    #[case::linux_x86("x86_64-unknown-linux-gnu", "linux_x86_64")]
    #[case::linux_arm("aarch64-unknown-linux-gnu", "linux_aarch64")]
    #[case::macos_x86("x86_64-apple-darwin", "macosx_10_12_x86_64")]
    #[case::macos_arm("aarch64-apple-darwin", "macosx_11_0_arm64")]
    #[case::windows("x86_64-pc-windows-msvc", "win_amd64")]
    fn platform_tag_for_target(#[case] triple: &str, #[case] tag: &str) {
        let t = TargetTriple::try_from(triple).expect("valid");
        assert_eq!(t.platform_tag().as_str(), tag);
    }

    #[test]
    fn host_is_supported_on_tier_one_platforms() {
        let supported_host = matches!(
            (std::env::consts::ARCH, std::env::consts::OS),
            ("x86_64" | "aarch64", "linux" | "macos") | ("x86_64", "windows")
        );
        assert_eq!(TargetTriple::host().is_ok(), supported_host);
    }
}
