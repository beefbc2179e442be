//! Ordered, duplicate-free collections of discovered packages.

use crate::package_name::PackageName;
use serde::Serialize;

/// The packages selected for a distribution, in discovery order.
///
/// Insertion order is preserved so that repeated discovery over the same tree
/// yields byte-identical build inputs; duplicates are dropped on insertion.
/// There are no public mutators: a set is built once, by discovery or by
/// collecting an iterator, and only read afterwards.
///
/// # Examples
///
/// ```
/// use wheelwright_packager::package_name::PackageName;
/// use wheelwright_packager::package_set::PackageSet;
///
/// let set: PackageSet = ["mlir", "mlir.ir", "mlir"]
///     .into_iter()
///     .map(|name| PackageName::try_from(name).expect("valid"))
///     .collect();
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.names(), ["mlir", "mlir.ir"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PackageSet(Vec<PackageName>);

impl PackageSet {
    /// Append `name` unless it is already present. Returns whether it was
    /// added.
    pub(crate) fn insert(&mut self, name: PackageName) -> bool {
        if self.contains(&name) {
            return false;
        }
        self.0.push(name);
        true
    }

    /// Number of packages in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no packages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `name` is part of the set.
    #[must_use]
    pub fn contains(&self, name: &PackageName) -> bool {
        self.0.contains(name)
    }

    /// Iterate over the packages in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, PackageName> {
        self.0.iter()
    }

    /// Return the package names as plain strings.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(PackageName::as_str).collect()
    }

    /// Distinct top-level names, in first-seen order.
    #[must_use]
    pub fn top_level_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for package in &self.0 {
            let top = package.top_level();
            if !names.contains(&top) {
                names.push(top);
            }
        }
        names
    }
}

impl FromIterator<PackageName> for PackageSet {
    fn from_iter<T: IntoIterator<Item = PackageName>>(iter: T) -> Self {
        let mut set = Self::default();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

impl IntoIterator for PackageSet {
    type Item = PackageName;
    type IntoIter = std::vec::IntoIter<PackageName>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PackageSet {
    type Item = &'a PackageName;
    type IntoIter = std::slice::Iter<'a, PackageName>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
