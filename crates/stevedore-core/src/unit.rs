//! Unit manifests.
//!
//! A unit file is the physical YAML manifest implementing a package. It is
//! named after its unit and lives one extra directory level below the
//! package's directory path:
//!
//! ```text
//! <root>/tld/domain/Widget/Widget.unit.yaml
//! ```
//!
//! Loading a unit file registers the symbols it defines; instantiating a
//! symbol default-constructs its state from `defaults`:
//!
//! ```yaml
//! symbols:
//!   Widget:
//!     summary: optional one-line description
//!     defaults:
//!       retries: 3
//!       verbose: false
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LoaderError, LoaderResult};

/// Fixed unit-file suffix.
pub const UNIT_EXT: &str = "unit.yaml";

/// Conventional file name for a unit.
pub fn unit_file_name(unit: &str) -> String {
    format!("{}.{}", unit, UNIT_EXT)
}

/// The unit name of a file following the naming convention, if any.
///
/// The suffix is matched ASCII-case-insensitively, in keeping with the
/// host-ecosystem convention of case-insensitive unit file names.
pub(crate) fn unit_stem(file_name: &str) -> Option<&str> {
    let tail = UNIT_EXT.len() + 1;
    if file_name.len() > tail && file_name.is_char_boundary(file_name.len() - tail) {
        let (stem, suffix) = file_name.split_at(file_name.len() - tail);
        if suffix.starts_with('.') && suffix[1..].eq_ignore_ascii_case(UNIT_EXT) {
            return Some(stem);
        }
    }
    None
}

/// One symbol definition inside a unit manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolSpec {
    /// Optional one-line description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Field defaults for freshly constructed instances.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub defaults: BTreeMap<String, serde_yaml::Value>,
}

/// A parsed unit manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitFile {
    /// Symbols defined by this unit, keyed by declared name.
    #[serde(default)]
    pub symbols: BTreeMap<String, SymbolSpec>,
}

impl UnitFile {
    /// Parse manifest text.
    pub fn parse(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// Read and parse a manifest from disk.
    pub fn read(path: &Path) -> LoaderResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| LoaderError::io(path, source))?;
        Self::parse(&text).map_err(|source| LoaderError::UnitParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manifest() {
        let unit = UnitFile::parse(
            "symbols:\n  Widget:\n    summary: a widget\n    defaults:\n      retries: 3\n",
        )
        .unwrap();
        assert_eq!(unit.symbols.len(), 1);
        let spec = &unit.symbols["Widget"];
        assert_eq!(spec.summary.as_deref(), Some("a widget"));
        assert!(spec.defaults.contains_key("retries"));
    }

    #[test]
    fn test_parse_empty_manifest() {
        let unit = UnitFile::parse("{}").unwrap();
        assert!(unit.symbols.is_empty());
    }

    #[test]
    fn test_parse_rejects_bad_yaml() {
        assert!(UnitFile::parse("symbols: [not: a: mapping").is_err());
    }

    #[test]
    fn test_unit_file_name() {
        assert_eq!(unit_file_name("Widget"), "Widget.unit.yaml");
    }

    #[test]
    fn test_unit_stem() {
        assert_eq!(unit_stem("Widget.unit.yaml"), Some("Widget"));
        assert_eq!(unit_stem("Widget.UNIT.YAML"), Some("Widget"));
        assert_eq!(unit_stem("Widget.yaml"), None);
        assert_eq!(unit_stem(".unit.yaml"), None);
        assert_eq!(unit_stem("unit.yaml"), None);
    }
}
