//! Collection of the files that belong to discovered packages.
//!
//! Each package directory is listed on its own, without recursion, because
//! sub-packages appear as separate entries in the [`PackageSet`]. Python
//! sources are always collected; everything else is package data and is only
//! collected when data inclusion is enabled.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use log::trace;
use serde::Serialize;

use crate::error::DiscoveryError;
use crate::package_set::PackageSet;

/// Suffixes of compiled bytecode, which is regenerated on install and never
/// shipped.
const BYTECODE_SUFFIXES: &[&str] = &[".pyc", ".pyo"];

/// Suffixes of native shared libraries across the supported platforms.
const NATIVE_SUFFIXES: &[&str] = &[".so", ".pyd", ".dylib", ".dll"];

/// How a file inside a package is treated by the packaging driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// Importable Python source.
    Source,
    /// Type stubs or the `py.typed` marker.
    TypingStub,
    /// Compiled extension module or shared library.
    NativeExtension,
    /// Any other resource file.
    Data,
}

impl FileKind {
    /// Classify a file by its name.
    ///
    /// Returns `None` for compiled bytecode, which is never packaged.
    ///
    /// ```
    /// use wheelwright_packager::package_files::FileKind;
    ///
    /// assert_eq!(FileKind::for_file_name("ir.py"), Some(FileKind::Source));
    /// assert_eq!(
    ///     FileKind::for_file_name("_mlir.cpython-312-x86_64-linux-gnu.so"),
    ///     Some(FileKind::NativeExtension)
    /// );
    /// assert_eq!(
    ///     FileKind::for_file_name("libMLIRPythonCAPI.so.19"),
    ///     Some(FileKind::NativeExtension)
    /// );
    /// assert_eq!(FileKind::for_file_name("ir.cpython-312.pyc"), None);
    /// ```
    #[must_use]
    pub fn for_file_name(name: &str) -> Option<Self> {
        if BYTECODE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
            return None;
        }
        let kind = if name.ends_with(".py") {
            Self::Source
        } else if name.ends_with(".pyi") || name == "py.typed" {
            Self::TypingStub
        } else if is_native(name) {
            Self::NativeExtension
        } else {
            Self::Data
        };
        Some(kind)
    }
}

/// Shared libraries, including versioned ones such as `libfoo.so.19`.
fn is_native(name: &str) -> bool {
    NATIVE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) || name.contains(".so.")
}

/// A file to be placed in the distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageFile {
    /// Location on disk.
    pub source: Utf8PathBuf,
    /// `/`-separated path inside the distribution, e.g. `mlir/ir.py`.
    pub archive_path: String,
    /// How the file is treated.
    pub kind: FileKind,
}

/// List the files of every package in `packages`.
///
/// With `include_data` unset only [`FileKind::Source`] files are returned.
/// The result is sorted by archive path.
///
/// # Errors
///
/// Returns [`DiscoveryError::Io`] when a package directory cannot be read,
/// including when it no longer exists.
pub fn collect_package_files(
    source_tree: &Utf8Path,
    packages: &PackageSet,
    include_data: bool,
) -> Result<Vec<PackageFile>, DiscoveryError> {
    let mut files = Vec::new();
    for package in packages {
        let dir = source_tree.join(package.relative_path());
        let prefix = package.segments().collect::<Vec<_>>().join("/");
        for entry in dir.read_dir_utf8().map_err(|err| DiscoveryError::io(&dir, err))? {
            let entry = entry.map_err(|err| DiscoveryError::io(&dir, err))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(kind) = FileKind::for_file_name(entry.file_name()) else {
                trace!("skipping bytecode {path}");
                continue;
            };
            if kind != FileKind::Source && !include_data {
                trace!("skipping package data {path}");
                continue;
            }
            files.push(PackageFile {
                source: path.to_owned(),
                archive_path: format!("{prefix}/{}", entry.file_name()),
                kind,
            });
        }
    }
    files.sort_by(|a, b| a.archive_path.cmp(&b.archive_path));
    Ok(files)
}

/// Read a collected file from disk.
pub(crate) fn read_file(file: &PackageFile) -> std::io::Result<Vec<u8>> {
    fs::read(&file.source)
}
