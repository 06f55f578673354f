//! Recursive unit-file indexing.
//!
//! The indexer walks a directory subtree and collects every file following
//! the unit naming convention: a file directly inside a directory, named
//! `<dirBaseName>.unit.yaml`. File names are matched ASCII-case-
//! insensitively; directory names are taken as found. The indexer backs both
//! available-package enumeration and superpackage expansion.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{LoaderError, LoaderResult};
use crate::unit::unit_file_name;

/// Collect every convention-matching unit file beneath `root`.
///
/// Returns an empty set when `root` is not a directory. The accumulator is
/// created fresh per call and threaded through the recursion, so repeated
/// scans never observe each other's results while one scan still
/// accumulates across all of its own levels.
pub fn scan(root: &Path) -> LoaderResult<BTreeSet<PathBuf>> {
    let mut found = BTreeSet::new();
    if !root.is_dir() {
        debug!(root = %root.display(), "scan root is not a directory");
        return Ok(found);
    }
    visit(root, &mut found)?;
    Ok(found)
}

fn visit(dir: &Path, found: &mut BTreeSet<PathBuf>) -> LoaderResult<()> {
    let wanted = dir
        .file_name()
        .map(|base| unit_file_name(&base.to_string_lossy()));

    let mut subdirs = Vec::new();
    for entry in fs::read_dir(dir).map_err(|source| LoaderError::io(dir, source))? {
        let entry = entry.map_err(|source| LoaderError::io(dir, source))?;
        let path = entry.path();
        if path.is_dir() {
            subdirs.push(path);
        } else if let Some(wanted) = &wanted {
            if entry
                .file_name()
                .to_string_lossy()
                .eq_ignore_ascii_case(wanted)
                && path.is_file()
            {
                found.insert(path);
            }
        }
    }

    for subdir in subdirs {
        visit(&subdir, found)?;
    }
    Ok(())
}

/// Probe one directory for `<stem>.unit.yaml`, matching the file name
/// ASCII-case-insensitively.
pub fn find_unit_file(dir: &Path, stem: &str) -> LoaderResult<Option<PathBuf>> {
    let wanted = unit_file_name(stem);
    for entry in fs::read_dir(dir).map_err(|source| LoaderError::io(dir, source))? {
        let entry = entry.map_err(|source| LoaderError::io(dir, source))?;
        let path = entry.path();
        if path.is_file()
            && entry
                .file_name()
                .to_string_lossy()
                .eq_ignore_ascii_case(&wanted)
        {
            return Ok(Some(path));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "symbols: {}\n").unwrap();
    }

    #[test]
    fn test_scan_collects_convention_matching_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_file(root, "tld/domain/Widget/Widget.unit.yaml");
        write_file(root, "tld/domain/Gadget/Gadget.unit.yaml");
        // Named after nothing in its directory: ignored.
        write_file(root, "tld/domain/Gadget/Other.unit.yaml");
        // Wrong suffix: ignored.
        write_file(root, "tld/domain/Widget/Widget.yaml");

        let found = scan(&root.join("tld")).unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.contains(&root.join("tld/domain/Widget/Widget.unit.yaml")));
        assert!(found.contains(&root.join("tld/domain/Gadget/Gadget.unit.yaml")));
    }

    #[test]
    fn test_scan_matches_file_names_case_insensitively() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_file(root, "tld/domain/Domain.unit.yaml");

        let found = scan(&root.join("tld/domain")).unwrap();
        assert_eq!(found.len(), 1);
        assert!(found.contains(&root.join("tld/domain/Domain.unit.yaml")));
    }

    #[test]
    fn test_scan_missing_root_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let found = scan(&temp_dir.path().join("absent")).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_independent_scans_do_not_leak() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_file(root, "first/tld/Widget/Widget.unit.yaml");
        write_file(root, "second/tld/Gadget/Gadget.unit.yaml");

        let first = scan(&root.join("first")).unwrap();
        let second = scan(&root.join("second")).unwrap();

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert!(second
            .iter()
            .all(|path| path.starts_with(root.join("second"))));
    }

    #[test]
    fn test_find_unit_file_is_case_insensitive_on_file_name() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_file(root, "Widget/WIDGET.unit.yaml");

        let found = find_unit_file(&root.join("Widget"), "Widget").unwrap();
        assert_eq!(found, Some(root.join("Widget/WIDGET.unit.yaml")));

        let missing = find_unit_file(&root.join("Widget"), "Gadget").unwrap();
        assert!(missing.is_none());
    }
}
