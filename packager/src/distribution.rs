//! Binary distribution classification.
//!
//! [`classify`] wraps a discovered [`PackageSet`] in a
//! [`DistributionDescriptor`] that always reports native extension content.
//! The descriptor is evaluated before the native build has placed its shared
//! libraries in the tree, so the capability cannot be inferred from the files
//! present; it is declared instead. Downstream packaging therefore always
//! produces a platform-tagged wheel, never a `py3-none-any` one.

use crate::package_set::PackageSet;
use crate::wheel::tag::{TagComponent, WheelTag};
use crate::wheel::target::TargetTriple;
use log::{debug, warn};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

/// Whether classified distributions contain compiled extension modules.
///
/// Always `true`: the native artefacts are produced by a separate build step
/// that runs after classification.
pub const HAS_EXT_MODULES: bool = true;

/// Whether classified distributions may run from inside a zip archive.
///
/// Always `false`: shared libraries must be loaded from a real file.
pub const ZIP_SAFE: bool = false;

/// The name of a distribution as declared in its metadata.
///
/// The name is kept verbatim; no validation is performed beyond type
/// conformance. [`Self::normalized`] gives the form used in filenames.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DistributionName(String);

impl DistributionName {
    /// Create a new distribution name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The filename-safe form: lowercase with every run of `-`, `_` and `.`
    /// collapsed to a single `_`.
    ///
    /// ```
    /// use wheelwright_packager::distribution::DistributionName;
    ///
    /// let name = DistributionName::new("MLIR-Python.._Bindings");
    /// assert_eq!(name.normalized(), "mlir_python_bindings");
    /// ```
    #[must_use]
    pub fn normalized(&self) -> String {
        let mut out = String::with_capacity(self.0.len());
        let mut in_separator_run = false;
        for c in self.0.chars() {
            if matches!(c, '-' | '_' | '.') {
                if !in_separator_run {
                    out.push('_');
                }
                in_separator_run = true;
            } else {
                out.extend(c.to_lowercase());
                in_separator_run = false;
            }
        }
        out
    }
}

impl From<&str> for DistributionName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for DistributionName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for DistributionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything the packaging driver needs to materialise a distribution.
///
/// Obtained only through [`classify`], so the native-content and zip-safety
/// answers cannot be overridden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionDescriptor {
    name: DistributionName,
    packages: PackageSet,
    include_package_data: bool,
}

impl DistributionDescriptor {
    /// Return the distribution name.
    #[must_use]
    pub fn name(&self) -> &DistributionName {
        &self.name
    }

    /// Return the packages to include, in discovery order.
    #[must_use]
    pub fn packages(&self) -> &PackageSet {
        &self.packages
    }

    /// Whether non-source files inside the packages are bundled.
    #[must_use]
    pub fn include_package_data(&self) -> bool {
        self.include_package_data
    }

    /// Whether the distribution contains compiled extension modules.
    ///
    /// Unconditionally [`HAS_EXT_MODULES`].
    #[must_use]
    pub const fn has_ext_modules(&self) -> bool {
        HAS_EXT_MODULES
    }

    /// Whether the distribution may be imported from a zip archive.
    ///
    /// Unconditionally [`ZIP_SAFE`].
    #[must_use]
    pub const fn zip_safe(&self) -> bool {
        ZIP_SAFE
    }

    /// Whether the distribution is pure Python (no platform tag needed).
    #[must_use]
    pub const fn is_pure(&self) -> bool {
        !self.has_ext_modules()
    }

    /// The wheel tag this distribution must be published under.
    ///
    /// The platform component comes from `target`; only a pure distribution
    /// would fall back to the universal tag.
    #[must_use]
    pub fn wheel_tag(
        &self,
        python: TagComponent,
        abi: TagComponent,
        target: &TargetTriple,
    ) -> WheelTag {
        if self.is_pure() {
            WheelTag::universal()
        } else {
            WheelTag::new(python, abi, target.platform_tag())
        }
    }
}

impl Serialize for DistributionDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DistributionDescriptor", 5)?;
        state.serialize_field("name", self.name.as_str())?;
        state.serialize_field("packages", &self.packages)?;
        state.serialize_field("include_package_data", &self.include_package_data)?;
        state.serialize_field("has_ext_modules", &self.has_ext_modules())?;
        state.serialize_field("zip_safe", &self.zip_safe())?;
        state.end()
    }
}

/// Classify `packages` as a platform-specific binary distribution.
///
/// Never fails. An empty package set is accepted and produces a descriptor
/// with zero packages that is still platform-tagged; a warning is logged
/// because this usually means the namespace was misconfigured.
///
/// # Examples
///
/// ```
/// use wheelwright_packager::distribution::classify;
/// use wheelwright_packager::package_set::PackageSet;
///
/// let descriptor = classify("mlir-python-bindings", PackageSet::default(), true);
/// assert!(descriptor.has_ext_modules());
/// assert!(!descriptor.zip_safe());
/// assert!(descriptor.packages().is_empty());
/// ```
#[must_use]
pub fn classify(
    name: impl Into<DistributionName>,
    packages: PackageSet,
    include_package_data: bool,
) -> DistributionDescriptor {
    let name = name.into();
    if packages.is_empty() {
        warn!("distribution {name} contains no packages");
    }
    debug!(
        "classified {name} as a binary distribution with {} package(s)",
        packages.len()
    );
    DistributionDescriptor {
        name,
        packages,
        include_package_data,
    }
}
