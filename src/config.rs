//! Project configuration read from `wheelwright.toml`.
//!
//! The file names the distribution, says which packages to discover, and
//! chooses the wheel's compatibility tags. Everything except `name` has a
//! default. Native-content and zip-safety answers are fixed by the packager,
//! so the only accepted `zip_safe` value is `false`.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use thiserror::Error;
use wheelwright_packager::error::ValidationError;
use wheelwright_packager::wheel::naming::Version;
use wheelwright_packager::wheel::tag::TagComponent;
use wheelwright_packager::wheel::target::TargetTriple;

/// Conventional file name for the configuration.
pub const CONFIG_FILE_NAME: &str = "wheelwright.toml";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// The file that could not be read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration is not valid TOML or does not match the schema.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// `zip_safe = true` was requested.
    #[error(
        "zip_safe = true is not supported: distributions with native extensions are never \
         zip-safe"
    )]
    ZipSafeUnsupported,

    /// The distribution name is blank.
    #[error("distribution name must not be empty")]
    EmptyName,
}

/// The contents of `wheelwright.toml`.
///
/// # Examples
///
/// ```
/// use wheelwright::config::SetupConfig;
///
/// let config = SetupConfig::from_toml_str(
///     "name = \"mlir-python-bindings\"\n[packages]\nnamespace = \"mlir\"\n",
/// )
/// .expect("valid configuration");
/// assert_eq!(config.version, "0.0.0");
/// assert!(config.include_package_data);
/// assert_eq!(config.packages.namespace.as_deref(), Some("mlir"));
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SetupConfig {
    /// Distribution name as published.
    pub name: String,
    /// Version recorded in the wheel filename and metadata.
    #[serde(default = "SetupConfig::default_version")]
    pub version: String,
    /// Whether non-source files inside packages are bundled.
    #[serde(default = "SetupConfig::default_include_package_data")]
    pub include_package_data: bool,
    /// Accepted for compatibility with existing project files; must be
    /// `false` when present.
    #[serde(default)]
    pub zip_safe: Option<bool>,
    /// Which packages to discover.
    #[serde(default)]
    pub packages: PackagesConfig,
    /// Wheel compatibility tags.
    #[serde(default)]
    pub wheel: WheelConfig,
}

impl SetupConfig {
    fn default_version() -> String {
        "0.0.0".to_owned()
    }

    const fn default_include_package_data() -> bool {
        true
    }

    /// Read and validate the configuration at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read, and any
    /// error from [`Self::from_toml_str`].
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        Self::load_with(path, |path| std::fs::read_to_string(path))
    }

    /// Read and validate the configuration using the supplied reader.
    ///
    /// Lets tests supply file contents without touching the file system.
    ///
    /// # Errors
    ///
    /// As for [`Self::load`].
    pub fn load_with<F>(path: &Utf8Path, read: F) -> Result<Self, ConfigError>
    where
        F: FnOnce(&Utf8Path) -> io::Result<String>,
    {
        let source = read(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Parse and validate configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown fields,
    /// [`ConfigError::EmptyName`] for a blank name, and
    /// [`ConfigError::ZipSafeUnsupported`] for `zip_safe = true`.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if self.zip_safe == Some(true) {
            return Err(ConfigError::ZipSafeUnsupported);
        }
        Ok(())
    }

    /// The validated version.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidVersion`] when the version cannot
    /// appear in a wheel filename.
    pub fn version(&self) -> Result<Version, ValidationError> {
        Version::try_from(self.version.as_str())
    }
}

/// The `[packages]` table.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PackagesConfig {
    /// Root namespace; selects the namespace and everything below it.
    pub namespace: Option<String>,
    /// Additional include patterns.
    pub include: Vec<String>,
    /// Exclude patterns.
    pub exclude: Vec<String>,
}

impl PackagesConfig {
    /// Whether discovery reduces to a plain namespace walk.
    #[must_use]
    pub fn is_namespace_only(&self) -> bool {
        self.namespace.is_some() && self.include.is_empty() && self.exclude.is_empty()
    }
}

/// The `[wheel]` table.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct WheelConfig {
    /// Interpreter tag component.
    pub python_tag: String,
    /// ABI tag component.
    pub abi_tag: String,
    /// Target triple; the host when omitted.
    pub target: Option<String>,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            python_tag: "py3".to_owned(),
            abi_tag: "none".to_owned(),
            target: None,
        }
    }
}

impl WheelConfig {
    /// The validated interpreter tag.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTagComponent`] for a malformed tag.
    pub fn python_tag(&self) -> Result<TagComponent, ValidationError> {
        TagComponent::try_from(self.python_tag.as_str())
    }

    /// The validated ABI tag.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTagComponent`] for a malformed tag.
    pub fn abi_tag(&self) -> Result<TagComponent, ValidationError> {
        TagComponent::try_from(self.abi_tag.as_str())
    }

    /// The configured target, falling back to the host.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnsupportedTarget`] when the triple has no
    /// known wheel platform tag.
    pub fn target(&self) -> Result<TargetTriple, ValidationError> {
        self.target
            .as_deref()
            .map_or_else(TargetTriple::host, TargetTriple::try_from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const MINIMAL: &str = "name = \"mlir-python-bindings\"\n";

    #[rstest]
    fn defaults_apply_to_minimal_config() {
        let config = SetupConfig::from_toml_str(MINIMAL).expect("valid configuration");

        assert_eq!(config.version, "0.0.0");
        assert!(config.include_package_data);
        assert_eq!(config.zip_safe, None);
        assert_eq!(config.packages, PackagesConfig::default());
        assert_eq!(config.wheel, WheelConfig::default());
        assert_eq!(config.wheel.python_tag, "py3");
        assert_eq!(config.wheel.abi_tag, "none");
    }

    #[rstest]
    fn deserialises_full_config() {
        let source = concat!(
            "name = \"mlir-python-bindings\"\n",
            "version = \"19.1.0\"\n",
            "include_package_data = false\n",
            "zip_safe = false\n",
            "[packages]\n",
            "namespace = \"mlir\"\n",
            "exclude = [\"mlir._mlir_libs\"]\n",
            "[wheel]\n",
            "python_tag = \"cp312\"\n",
            "abi_tag = \"cp312\"\n",
            "target = \"aarch64-apple-darwin\"\n",
        );

        let config = SetupConfig::from_toml_str(source).expect("valid configuration");

        assert_eq!(config.version().expect("valid version").as_str(), "19.1.0");
        assert!(!config.include_package_data);
        assert_eq!(config.packages.exclude, ["mlir._mlir_libs"]);
        assert!(!config.packages.is_namespace_only());
        assert_eq!(
            config.wheel.target().expect("supported").as_str(),
            "aarch64-apple-darwin"
        );
        assert_eq!(config.wheel.python_tag().expect("valid").as_str(), "cp312");
    }

    #[rstest]
    fn rejects_zip_safe_true() {
        let source = format!("{MINIMAL}zip_safe = true\n");
        let err = SetupConfig::from_toml_str(&source).expect_err("zip_safe rejected");
        assert!(matches!(err, ConfigError::ZipSafeUnsupported));
    }

    #[rstest]
    #[case::empty("name = \"\"\n")]
    #[case::blank("name = \"   \"\n")]
    fn rejects_blank_names(#[case] source: &str) {
        let err = SetupConfig::from_toml_str(source).expect_err("blank name");
        assert!(matches!(err, ConfigError::EmptyName));
    }

    #[rstest]
    #[case::missing_name("version = \"1.0\"\n")]
    #[case::unknown_field("name = \"mlir\"\nunexpected = true\n")]
    #[case::unknown_table_field("name = \"mlir\"\n[wheel]\nplatform = \"any\"\n")]
    #[case::wrong_type("name = \"mlir\"\ninclude_package_data = \"yes\"\n")]
    fn rejects_malformed_toml(#[case] source: &str) {
        let err = SetupConfig::from_toml_str(source).expect_err("parse error");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[rstest]
    fn load_with_passes_through_the_requested_path() {
        let config = SetupConfig::load_with(Utf8Path::new("project/wheelwright.toml"), |path| {
            assert_eq!(path, "project/wheelwright.toml");
            Ok(MINIMAL.to_owned())
        })
        .expect("valid configuration");

        assert_eq!(config.name, "mlir-python-bindings");
    }

    #[rstest]
    fn load_with_reports_read_failures() {
        let err = SetupConfig::load_with(Utf8Path::new(CONFIG_FILE_NAME), |_| {
            Err(io::Error::new(io::ErrorKind::NotFound, "missing"))
        })
        .expect_err("read failure");

        assert!(matches!(err, ConfigError::Read { ref path, .. } if path == CONFIG_FILE_NAME));
    }

    #[rstest]
    fn unsupported_target_is_a_validation_error() {
        let wheel = WheelConfig {
            target: Some("riscv64gc-unknown-linux-gnu".to_owned()),
            ..WheelConfig::default()
        };
        let err = wheel.target().expect_err("unsupported target");
        assert!(matches!(err, ValidationError::UnsupportedTarget { .. }));
    }

    #[rstest]
    fn namespace_only_requires_no_extra_patterns() {
        let packages = PackagesConfig {
            namespace: Some("mlir".to_owned()),
            ..PackagesConfig::default()
        };
        assert!(packages.is_namespace_only());
        assert!(!PackagesConfig::default().is_namespace_only());
    }
}
