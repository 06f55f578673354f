//! Ordered class path management.
//!
//! The class path is the ordered list of filesystem roots searched for
//! packages. Insertion order defines search priority: the first root that
//! contains a package wins. Roots are append-only for the lifetime of the
//! loader.

use std::env;
use std::fmt;
use std::path::PathBuf;

use tracing::debug;

/// Separator used when rendering the class path as one string and when
/// parsing it from the environment.
pub const CLASS_PATH_SEPARATOR: &str = ";";

/// Environment variable consulted by [`ClassPath::from_env`].
pub const CLASS_PATH_ENV: &str = "STEVEDORE_CLASS_PATH";

/// Ordered collection of search roots.
///
/// Duplicates are permitted and nothing is validated at add time; a root
/// that does not exist simply never matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassPath {
    roots: Vec<PathBuf>,
}

impl ClassPath {
    /// Create an empty class path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a class path from the `STEVEDORE_CLASS_PATH` environment
    /// variable. A missing or empty variable yields an empty class path.
    pub fn from_env() -> Self {
        match env::var(CLASS_PATH_ENV) {
            Ok(value) => {
                let class_path = Self::parse(&value);
                debug!(roots = class_path.len(), "seeded class path from environment");
                class_path
            }
            Err(_) => Self::new(),
        }
    }

    /// Parse a `;`-separated list of roots. Empty entries are dropped.
    pub fn parse(value: &str) -> Self {
        let mut class_path = Self::new();
        class_path.add_all(
            value
                .split(CLASS_PATH_SEPARATOR)
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(PathBuf::from),
        );
        class_path
    }

    /// Append a single root.
    pub fn add(&mut self, root: impl Into<PathBuf>) {
        self.roots.push(root.into());
    }

    /// Append several roots, preserving their order.
    pub fn add_all<I, P>(&mut self, roots: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        for root in roots {
            self.add(root);
        }
    }

    /// Roots in search order.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Number of registered roots.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Whether no roots are registered.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Roots joined by [`CLASS_PATH_SEPARATOR`].
    pub fn joined(&self) -> String {
        self.joined_with(CLASS_PATH_SEPARATOR)
    }

    /// Roots joined by an arbitrary separator.
    pub fn joined_with(&self, separator: &str) -> String {
        self.roots
            .iter()
            .map(|root| root.display().to_string())
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl fmt::Display for ClassPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}
