//! Name-to-location resolution.
//!
//! Converts a plain dotted package name into its candidate unit location
//! under a single search root, and produces the ordered symbol candidates
//! tried once the unit has loaded:
//!
//! 1. a symbol named as the unit itself (`Widget`);
//! 2. the full lowercase package path joined with `_` (`tld_domain_widget`).
//!
//! The second convention exists so units can avoid symbol clashes across
//! packages that share a unit name.

use std::path::{Path, PathBuf};

use crate::package::PackageName;
use crate::unit::unit_file_name;

/// Candidate location of a unit under one search root.
///
/// Computed fresh per load; never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitLocation {
    /// Search root this candidate was built from.
    pub root: PathBuf,

    /// Directory expected to hold the unit file: `<root>/<dirs>/<Unit>`.
    pub directory: PathBuf,

    /// Conventional unit file name (`<Unit>.unit.yaml`); the on-disk
    /// spelling may differ in case.
    pub file_name: String,
}

impl UnitLocation {
    /// The conventional full path of the unit file.
    pub fn file_path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}

/// Build the candidate location for `name` under `root`.
pub fn locate(name: &PackageName, root: &Path) -> UnitLocation {
    let directory = root.join(name.parent_dir()).join(name.unit_name());
    UnitLocation {
        root: root.to_path_buf(),
        directory,
        file_name: unit_file_name(name.unit_name()),
    }
}

/// Ordered symbol candidates for a unit loaded as `package`.
pub fn symbol_candidates(unit_name: &str, package: &str) -> [String; 2] {
    [
        unit_name.to_string(),
        package.to_ascii_lowercase().replace('.', "_"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_builds_convention_path() {
        let name = PackageName::parse("tld.domain.Widget").unwrap();
        let location = locate(&name, Path::new("/srv/packages"));

        assert_eq!(location.root, Path::new("/srv/packages"));
        assert_eq!(location.directory, Path::new("/srv/packages/tld/domain/Widget"));
        assert_eq!(location.file_name, "Widget.unit.yaml");
        assert_eq!(
            location.file_path(),
            Path::new("/srv/packages/tld/domain/Widget/Widget.unit.yaml")
        );
    }

    #[test]
    fn test_locate_single_segment_name() {
        let name = PackageName::parse("Widget").unwrap();
        let location = locate(&name, Path::new("/srv/packages"));
        assert_eq!(location.directory, Path::new("/srv/packages/Widget"));
    }

    #[test]
    fn test_symbol_candidates_order() {
        let [unit, path] = symbol_candidates("Widget", "Tld.Domain.Widget");
        assert_eq!(unit, "Widget");
        assert_eq!(path, "tld_domain_widget");
    }

    #[test]
    fn test_symbol_candidates_single_segment() {
        let [unit, path] = symbol_candidates("Widget", "Widget");
        assert_eq!(unit, "Widget");
        assert_eq!(path, "widget");
    }
}
