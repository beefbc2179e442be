//! Wheel packaging for classified binary distributions.
//!
//! Writes a `.whl` zip archive holding the collected package files plus a
//! `.dist-info` directory (`METADATA`, `WHEEL`, `top_level.txt`,
//! `not-zip-safe`, and `RECORD`). Entries are written in sorted order with a
//! fixed timestamp, so identical inputs produce byte-identical wheels.

use super::naming::{Version, WheelName};
use super::packaging_error::PackagingError;
use super::record::Record;
use super::tag::TagComponent;
use super::target::TargetTriple;
use crate::distribution::DistributionDescriptor;
use crate::package_files::{FileKind, PackageFile, read_file};
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fs;
use std::io::{Read, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Name recorded in the `Generator` field of the `WHEEL` file.
const GENERATOR: &str = concat!("wheelwright (", env!("CARGO_PKG_VERSION"), ")");

/// Permissions for native libraries, which must stay loadable once extracted.
const EXECUTABLE_MODE: u32 = 0o755;

/// Permissions for every other entry.
const REGULAR_MODE: u32 = 0o644;

/// Input parameters for the [`package_wheel`] function.
///
/// Groups all required inputs so the function signature stays within
/// Clippy's parameter limit.
#[derive(Debug)]
pub struct WheelParams {
    /// The classified distribution.
    pub descriptor: DistributionDescriptor,
    /// The version recorded in the filename and metadata.
    pub version: Version,
    /// Interpreter tag component, e.g. `cp312` or `py3`.
    pub python_tag: TagComponent,
    /// ABI tag component, e.g. `cp312`, `abi3` or `none`.
    pub abi_tag: TagComponent,
    /// The platform the native content was built for.
    pub target: TargetTriple,
    /// Files collected from the package directories.
    pub files: Vec<PackageFile>,
    /// Directory where the wheel will be written.
    pub output_dir: Utf8PathBuf,
}

/// Output produced by [`package_wheel`].
#[derive(Debug)]
pub struct WheelOutput {
    /// Path to the created wheel.
    pub wheel_path: Utf8PathBuf,
    /// The wheel's filename components.
    pub name: WheelName,
    /// The digests written to `RECORD`.
    pub record: Record,
    /// Lowercase hex SHA-256 of the whole wheel file.
    pub sha256: String,
}

/// A single file to be written into the archive.
struct ArchiveEntry {
    path: String,
    contents: Vec<u8>,
    mode: u32,
}

/// Compute the SHA-256 digest of a file as lowercase hex.
///
/// # Errors
///
/// Returns [`PackagingError::Io`] if the file cannot be read.
pub fn compute_sha256(path: &Utf8Path) -> Result<String, PackagingError> {
    let mut file = fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// Package a classified distribution into a platform-tagged wheel.
///
/// An empty file list is accepted: the result is a wheel holding only its
/// `.dist-info` metadata, still tagged for `params.target`.
///
/// # Errors
///
/// Returns [`PackagingError::ReadFile`] if a package file cannot be read,
/// [`PackagingError::DuplicateEntry`] if two files share an archive path, and
/// [`PackagingError::Io`] / [`PackagingError::Zip`] on write failures.
pub fn package_wheel(params: &WheelParams) -> Result<WheelOutput, PackagingError> {
    let descriptor = &params.descriptor;
    let tag = descriptor.wheel_tag(
        params.python_tag.clone(),
        params.abi_tag.clone(),
        &params.target,
    );
    let name = WheelName::new(descriptor.name().clone(), params.version.clone(), tag);
    let dist_info = name.dist_info_dir();

    let mut entries = package_entries(&params.files)?;
    entries.extend(dist_info_entries(params, &name, &dist_info));

    fs::create_dir_all(&params.output_dir)?;
    let wheel_path = params.output_dir.join(name.filename());
    let record = write_wheel(&wheel_path, &entries, &format!("{dist_info}/RECORD"))?;
    let sha256 = compute_sha256(&wheel_path)?;

    info!("wrote {wheel_path} ({} entries)", record.entries().len() + 1);
    Ok(WheelOutput {
        wheel_path,
        name,
        record,
        sha256,
    })
}

/// Read every package file, rejecting duplicate archive paths.
fn package_entries(files: &[PackageFile]) -> Result<Vec<ArchiveEntry>, PackagingError> {
    let mut seen = BTreeSet::new();
    let mut entries = Vec::with_capacity(files.len());
    for file in files {
        if !seen.insert(file.archive_path.as_str()) {
            return Err(PackagingError::DuplicateEntry(file.archive_path.clone()));
        }
        let contents = read_file(file).map_err(|source| PackagingError::ReadFile {
            path: file.source.clone(),
            source,
        })?;
        let mode = if file.kind == FileKind::NativeExtension {
            EXECUTABLE_MODE
        } else {
            REGULAR_MODE
        };
        entries.push(ArchiveEntry {
            path: file.archive_path.clone(),
            contents,
            mode,
        });
    }
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}

/// Build the generated `.dist-info` files, in archive order.
fn dist_info_entries(params: &WheelParams, name: &WheelName, dist_info: &str) -> Vec<ArchiveEntry> {
    let descriptor = &params.descriptor;
    let metadata = format!(
        "Metadata-Version: 2.1\nName: {}\nVersion: {}\n",
        descriptor.name(),
        params.version
    );
    let wheel = format!(
        "Wheel-Version: 1.0\nGenerator: {GENERATOR}\nRoot-Is-Purelib: {}\nTag: {}\n\n",
        descriptor.is_pure(),
        name.tag()
    );
    let mut top_level = descriptor.packages().top_level_names().join("\n");
    if !top_level.is_empty() {
        top_level.push('\n');
    }

    let mut generated = vec![
        (format!("{dist_info}/METADATA"), metadata),
        (format!("{dist_info}/WHEEL"), wheel),
        (format!("{dist_info}/top_level.txt"), top_level),
    ];
    if !descriptor.zip_safe() {
        generated.push((format!("{dist_info}/not-zip-safe"), "\n".to_owned()));
    }
    generated.sort_by(|a, b| a.0.cmp(&b.0));

    generated
        .into_iter()
        .map(|(path, text)| ArchiveEntry {
            path,
            contents: text.into_bytes(),
            mode: REGULAR_MODE,
        })
        .collect()
}

/// Deflated, with the zip epoch as timestamp so output never depends on the
/// clock.
fn entry_options(mode: u32) -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(mode)
}

/// Write `entries` followed by `RECORD` into a new zip at `wheel_path`.
fn write_wheel(
    wheel_path: &Utf8Path,
    entries: &[ArchiveEntry],
    record_path: &str,
) -> Result<Record, PackagingError> {
    let mut writer = ZipWriter::new(fs::File::create(wheel_path)?);
    let mut record = Record::default();

    for entry in entries {
        debug!("adding {} ({} bytes)", entry.path, entry.contents.len());
        writer.start_file(entry.path.as_str(), entry_options(entry.mode))?;
        writer.write_all(&entry.contents)?;
        record.push(entry.path.as_str(), &entry.contents);
    }

    writer.start_file(record_path, entry_options(REGULAR_MODE))?;
    writer.write_all(record.render(record_path).as_bytes())?;
    writer.finish()?;
    Ok(record)
}

#[cfg(test)]
#[path = "packaging_tests.rs"]
mod tests;
