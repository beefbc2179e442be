//! The setup driver: discovery, classification, and wheel building.
//!
//! [`plan`] resolves everything a build needs without writing anything;
//! [`build`] then packages that plan. Errors from each stage are passed
//! through unchanged inside [`SetupError`].

use camino::Utf8Path;
use log::info;
use thiserror::Error;
use wheelwright_packager::discovery::{discover, find_packages};
use wheelwright_packager::distribution::{DistributionDescriptor, classify};
use wheelwright_packager::error::{DiscoveryError, ValidationError};
use wheelwright_packager::package_files::{PackageFile, collect_package_files};
use wheelwright_packager::package_name::PackageName;
use wheelwright_packager::package_set::PackageSet;
use wheelwright_packager::pattern::PackageFilter;
use wheelwright_packager::wheel::packaging::{WheelOutput, WheelParams, package_wheel};
use wheelwright_packager::wheel::packaging_error::PackagingError;
use wheelwright_packager::wheel::target::TargetTriple;

use crate::config::{PackagesConfig, SetupConfig};

/// Errors raised by the setup driver.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Package discovery or file collection failed.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// A configured name, pattern, tag, or target was malformed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Writing the wheel failed.
    #[error(transparent)]
    Packaging(#[from] PackagingError),
}

/// Everything resolved for a build, before any output is written.
#[derive(Debug)]
pub struct SetupPlan {
    /// The classified distribution.
    pub descriptor: DistributionDescriptor,
    /// The files that will be packaged.
    pub files: Vec<PackageFile>,
}

/// Discover packages as described by the `[packages]` table.
///
/// A bare namespace is a plain namespace walk. Patterns, with or without a
/// namespace, run a filtered search over the whole tree; with neither, every
/// package in the tree is found.
///
/// # Errors
///
/// Returns [`SetupError::Validation`] for a malformed pattern and
/// [`SetupError::Discovery`] when the tree cannot be read. A malformed
/// namespace is reported by whichever of the two paths ran.
pub fn discover_packages(
    packages: &PackagesConfig,
    source_tree: &Utf8Path,
) -> Result<PackageSet, SetupError> {
    let base = match &packages.namespace {
        Some(namespace) if packages.is_namespace_only() => {
            return Ok(discover(namespace, source_tree)?);
        }
        Some(namespace) => PackageFilter::namespace(&PackageName::try_from(namespace.as_str())?),
        None => PackageFilter::default(),
    };
    let filter = base.extended(&packages.include, &packages.exclude)?;
    Ok(find_packages(source_tree, &filter)?)
}

/// Resolve the packages, classification, and files for `config`.
///
/// # Errors
///
/// See [`discover_packages`]; file collection failures are reported as
/// [`SetupError::Discovery`].
pub fn plan(config: &SetupConfig, source_tree: &Utf8Path) -> Result<SetupPlan, SetupError> {
    let packages = discover_packages(&config.packages, source_tree)?;
    let files = collect_package_files(source_tree, &packages, config.include_package_data)?;
    let descriptor = classify(
        config.name.as_str(),
        packages,
        config.include_package_data,
    );
    Ok(SetupPlan { descriptor, files })
}

/// Plan and package `config` into a wheel under `output_dir`.
///
/// `target` overrides the configured target triple.
///
/// # Errors
///
/// Returns any error from [`plan`], [`SetupError::Validation`] for a bad
/// version, tag, or target, and [`SetupError::Packaging`] when the wheel
/// cannot be written.
pub fn build(
    config: &SetupConfig,
    source_tree: &Utf8Path,
    output_dir: &Utf8Path,
    target: Option<&TargetTriple>,
) -> Result<WheelOutput, SetupError> {
    let version = config.version()?;
    let python_tag = config.wheel.python_tag()?;
    let abi_tag = config.wheel.abi_tag()?;
    let target = match target {
        Some(target) => target.clone(),
        None => config.wheel.target()?,
    };

    let SetupPlan { descriptor, files } = plan(config, source_tree)?;
    info!(
        "packaging {} package(s) and {} file(s) for {target}",
        descriptor.packages().len(),
        files.len()
    );
    let output = package_wheel(&WheelParams {
        descriptor,
        version,
        python_tag,
        abi_tag,
        target,
        files,
        output_dir: output_dir.to_owned(),
    })?;
    Ok(output)
}

#[cfg(test)]
#[path = "setup_tests.rs"]
mod tests;
