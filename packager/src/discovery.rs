//! Namespace package discovery.
//!
//! Packages are discovered purely from directory structure: every directory
//! is a package, with or without an `__init__.py` marker, and whatever its
//! name looks like (`mlir-c` and `2d` included). Only directories whose names
//! contain a dot (`.git`, `build.tmp`) are neither reported nor descended
//! into, because their names would be ambiguous once joined with dots.
//!
//! Traversal is depth-first with entries visited in byte-wise sorted order, so
//! parents always precede their children and the result depends only on the
//! filesystem contents, never on `read_dir` ordering. Symlinked directories
//! are followed. A directory that resolves to one of its own ancestors is
//! still reported, but the walk does not enter it again.

use std::fs;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, trace, warn};

use crate::error::DiscoveryError;
use crate::package_name::PackageName;
use crate::package_set::PackageSet;
use crate::pattern::PackageFilter;

/// Discover `root_namespace` and every package below it.
///
/// The namespace maps onto nested directories under `source_tree`
/// (`mlir.dialects` lives at `{source_tree}/mlir/dialects`). When that
/// directory is absent the result is an empty set rather than an error, so a
/// misconfigured namespace produces an empty distribution; this is logged at
/// `warn` level.
///
/// # Errors
///
/// Returns [`DiscoveryError::InvalidNamespace`] when `root_namespace` is not
/// a dotted identifier, [`DiscoveryError::SourceTreeNotFound`] or
/// [`DiscoveryError::NotADirectory`] when `source_tree` is unusable, and
/// [`DiscoveryError::Io`] when a directory inside the namespace cannot be
/// read.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use wheelwright_packager::discovery::discover;
///
/// let tree = tempfile::tempdir().expect("temp dir");
/// std::fs::create_dir_all(tree.path().join("mlir/dialects")).expect("mkdir");
/// std::fs::create_dir_all(tree.path().join("other")).expect("mkdir");
///
/// let root = Utf8Path::from_path(tree.path()).expect("utf-8 path");
/// let packages = discover("mlir", root).expect("discovery succeeds");
/// assert_eq!(packages.names(), ["mlir", "mlir.dialects"]);
/// ```
pub fn discover(
    root_namespace: &str,
    source_tree: &Utf8Path,
) -> Result<PackageSet, DiscoveryError> {
    let namespace =
        PackageName::try_from(root_namespace).map_err(DiscoveryError::InvalidNamespace)?;
    ensure_source_tree(source_tree)?;

    let mut packages = PackageSet::default();
    let namespace_dir = source_tree.join(namespace.relative_path());
    if !namespace_dir.is_dir() {
        warn!("namespace {namespace} not found under {source_tree}; no packages discovered");
        return Ok(packages);
    }

    let filter = PackageFilter::namespace(&namespace);
    debug!("discovered package {namespace}");
    packages.insert(namespace.clone());
    let mut walk = Walk::new(&filter, packages);
    walk.visit(&namespace_dir, Some(&namespace))?;
    let packages = walk.packages;
    debug_assert!(packages.iter().all(|name| name.is_within(&namespace)));
    Ok(packages)
}

/// Discover every package in `source_tree` kept by `filter`.
///
/// Unlike [`discover`], the whole tree is walked from its root, so several
/// top-level packages can be selected at once.
///
/// # Errors
///
/// Returns [`DiscoveryError::SourceTreeNotFound`] or
/// [`DiscoveryError::NotADirectory`] when `source_tree` is unusable, and
/// [`DiscoveryError::Io`] when any directory cannot be read.
pub fn find_packages(
    source_tree: &Utf8Path,
    filter: &PackageFilter,
) -> Result<PackageSet, DiscoveryError> {
    ensure_source_tree(source_tree)?;
    let mut walk = Walk::new(filter, PackageSet::default());
    walk.visit(source_tree, None)?;
    let packages = walk.packages;
    if packages.is_empty() {
        warn!("no packages under {source_tree} matched the configured patterns");
    }
    Ok(packages)
}

fn ensure_source_tree(source_tree: &Utf8Path) -> Result<(), DiscoveryError> {
    match fs::metadata(source_tree) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(DiscoveryError::NotADirectory {
            path: source_tree.to_owned(),
        }),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            Err(DiscoveryError::SourceTreeNotFound {
                path: source_tree.to_owned(),
            })
        }
        Err(err) => Err(DiscoveryError::io(source_tree, err)),
    }
}

/// A sub-directory that may be a package.
struct Candidate {
    segment: String,
    path: Utf8PathBuf,
}

/// State of one depth-first walk.
struct Walk<'a> {
    filter: &'a PackageFilter,
    packages: PackageSet,
    /// Canonical paths of the directories currently being visited, outermost
    /// first.
    ancestors: Vec<Utf8PathBuf>,
}

impl<'a> Walk<'a> {
    fn new(filter: &'a PackageFilter, packages: PackageSet) -> Self {
        Self {
            filter,
            packages,
            ancestors: Vec::new(),
        }
    }

    /// Record the packages below `dir` that the filter keeps, then recurse.
    fn visit(
        &mut self,
        dir: &Utf8Path,
        parent: Option<&PackageName>,
    ) -> Result<(), DiscoveryError> {
        let canonical = dir
            .canonicalize_utf8()
            .map_err(|err| DiscoveryError::io(dir, err))?;
        if self.ancestors.contains(&canonical) {
            trace!("not descending into {dir}: it links back to {canonical}");
            return Ok(());
        }
        self.ancestors.push(canonical);
        let result = self.visit_children(dir, parent);
        self.ancestors.pop();
        result
    }

    fn visit_children(
        &mut self,
        dir: &Utf8Path,
        parent: Option<&PackageName>,
    ) -> Result<(), DiscoveryError> {
        for candidate in package_candidates(dir)? {
            let name = match parent {
                Some(parent) => parent.child(&candidate.segment),
                None => PackageName::from_directory(&candidate.segment),
            };
            let Ok(name) = name else {
                let path = &candidate.path;
                trace!("skipping {path}: dotted directory names cannot be packages");
                continue;
            };

            if self.filter.matches(&name) {
                debug!("discovered package {name}");
                self.packages.insert(name.clone());
            }

            if self.filter.prunes_below(&name) {
                trace!("pruning excluded subtree {name}");
                continue;
            }
            self.visit(&candidate.path, Some(&name))?;
        }
        Ok(())
    }
}

/// List the sub-directories of `dir`, following symlinks, sorted by name.
fn package_candidates(dir: &Utf8Path) -> Result<Vec<Candidate>, DiscoveryError> {
    let entries = dir
        .read_dir_utf8()
        .map_err(|err| DiscoveryError::io(dir, err))?;

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| DiscoveryError::io(dir, err))?;
        let path = entry.path().to_owned();
        let file_type = entry
            .file_type()
            .map_err(|err| DiscoveryError::io(&path, err))?;

        let is_dir = file_type.is_dir() || (file_type.is_symlink() && path.is_dir());
        if !is_dir {
            continue;
        }
        candidates.push(Candidate {
            segment: entry.file_name().to_owned(),
            path,
        });
    }

    candidates.sort_by(|a, b| a.segment.cmp(&b.segment));
    Ok(candidates)
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
