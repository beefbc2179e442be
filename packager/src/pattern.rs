//! Include and exclude patterns over dotted package names.
//!
//! Patterns use shell-style wildcards applied to the whole dotted name: `*`
//! matches any run of characters (dots included) and `?` a single character.
//! `mlir.*` therefore matches every descendant of `mlir`, however deep.

use crate::error::{Result, ValidationError};
use crate::package_name::PackageName;
use glob::Pattern;
use std::fmt;

/// A compiled wildcard pattern over package names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagePattern(Pattern);

impl PackagePattern {
    /// Whether `name` matches this pattern.
    #[must_use]
    pub fn matches(&self, name: &PackageName) -> bool {
        self.0.matches(name.as_str())
    }

    /// Return the source text of the pattern.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<&str> for PackagePattern {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self> {
        if value.is_empty() {
            return Err(ValidationError::InvalidPattern {
                value: value.to_owned(),
                reason: "pattern is empty".to_owned(),
            });
        }
        Pattern::new(value)
            .map(Self)
            .map_err(|err| ValidationError::InvalidPattern {
                value: value.to_owned(),
                reason: err.msg.to_owned(),
            })
    }
}

impl fmt::Display for PackagePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.as_str())
    }
}

/// The set of include and exclude patterns deciding which packages are kept.
///
/// A package is kept when it matches at least one include pattern and no
/// exclude pattern. An empty include list keeps everything.
///
/// # Examples
///
/// ```
/// use wheelwright_packager::package_name::PackageName;
/// use wheelwright_packager::pattern::PackageFilter;
///
/// let filter = PackageFilter::namespace(&PackageName::try_from("mlir").expect("valid"));
/// let keep = |name: &str| filter.matches(&PackageName::try_from(name).expect("valid"));
/// assert!(keep("mlir"));
/// assert!(keep("mlir.dialects.extras"));
/// assert!(!keep("mlirx"));
/// assert!(!keep("other"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageFilter {
    include: Vec<PackagePattern>,
    exclude: Vec<PackagePattern>,
}

impl PackageFilter {
    /// Compile a filter from raw include and exclude patterns.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPattern`] for the first pattern that
    /// fails to compile.
    pub fn new<I, E, S, T>(include: I, exclude: E) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Ok(Self {
            include: compile_all(include)?,
            exclude: compile_all(exclude)?,
        })
    }

    /// The `[root, root.*]` filter selecting a namespace and all of its
    /// descendants.
    #[must_use]
    pub fn namespace(root: &PackageName) -> Self {
        Self {
            include: vec![literal(root.as_str()), literal(&format!("{root}.*"))],
            exclude: Vec::new(),
        }
    }

    /// Append further include and exclude patterns to this filter.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPattern`] for the first pattern that
    /// fails to compile.
    pub fn extended<I, E, S, T>(mut self, include: I, exclude: E) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        self.include.extend(compile_all(include)?);
        self.exclude.extend(compile_all(exclude)?);
        Ok(self)
    }

    /// Whether `name` is kept by this filter.
    #[must_use]
    pub fn matches(&self, name: &PackageName) -> bool {
        let included =
            self.include.is_empty() || self.include.iter().any(|pattern| pattern.matches(name));
        included && !self.exclude.iter().any(|pattern| pattern.matches(name))
    }

    /// Whether the subtree below `name` can be skipped entirely.
    ///
    /// Only a literal `name.*` or `name*` exclude pattern prunes a subtree;
    /// anything cleverer could hide packages an include pattern would keep.
    #[must_use]
    pub fn prunes_below(&self, name: &PackageName) -> bool {
        let dotted = format!("{name}.*");
        let glued = format!("{name}*");
        self.exclude
            .iter()
            .any(|pattern| pattern.as_str() == dotted || pattern.as_str() == glued)
    }

    /// Return the include patterns.
    #[must_use]
    pub fn include(&self) -> &[PackagePattern] {
        &self.include
    }

    /// Return the exclude patterns.
    #[must_use]
    pub fn exclude(&self) -> &[PackagePattern] {
        &self.exclude
    }
}

fn compile_all<I, S>(patterns: I) -> Result<Vec<PackagePattern>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    patterns
        .into_iter()
        .map(|pattern| PackagePattern::try_from(pattern.as_ref()))
        .collect()
}

/// Compile a pattern built from a validated package name.
///
/// Package names contain no glob metacharacters, so `[`, `]` and friends
/// never reach the compiler and escaping is enough to keep this total.
fn literal(text: &str) -> PackagePattern {
    let escaped = text.strip_suffix(".*").map_or_else(
        || Pattern::escape(text),
        |stem| format!("{}.*", Pattern::escape(stem)),
    );
    PackagePattern(Pattern::new(&escaped).unwrap_or_default())
}
