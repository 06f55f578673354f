//! Superpackage expansion.
//!
//! Expands a wildcard name (`tld.domain.*`) by scanning the base package's
//! subtree under every search root and loading each discovered unit. The
//! result maps the base package under its own name and every subpackage
//! under both its fully-qualified and short name, all keys sharing one
//! instance per package.
//!
//! Expansion is not transactional: a fatal failure partway through aborts
//! the whole expansion, but packages registered before the failing step
//! stay registered.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::LoaderResult;
use crate::loader::Loader;
use crate::package::PackageName;
use crate::scan;
use crate::symbols::Instance;
use crate::unit::unit_stem;

pub(crate) fn expand(
    loader: &mut Loader,
    name: &PackageName,
) -> LoaderResult<HashMap<String, Arc<Instance>>> {
    let base = name.base().to_string();
    let base_key = base.to_ascii_lowercase();
    let base_dir = name.base_dir();
    let qualified_prefix = format!("{}.", base_key);

    let mut group = HashMap::new();

    let roots: Vec<_> = loader.class_path.roots().to_vec();
    for root in roots {
        let subtree = root.join(&base_dir);
        if !subtree.is_dir() {
            // Known limitation: an absent base directory skips the whole
            // root, with no fallback search.
            debug!(
                root = %root.display(),
                package = %base,
                "base directory missing, skipping root"
            );
            continue;
        }

        for file in scan::scan(&subtree)? {
            let package = match derive_package(&root, &file) {
                Some(package) => package,
                None => continue,
            };
            if loader.registry.contains(&package) {
                warn!(package = %package, "package was previously loaded");
                continue;
            }

            let file_name = match file.file_name() {
                Some(file_name) => file_name.to_string_lossy().into_owned(),
                None => continue,
            };
            let stem = match unit_stem(&file_name) {
                Some(stem) => stem.to_string(),
                None => continue,
            };

            let instance = loader.load_unit(&file, &stem, &package)?;

            if package == base_key {
                group.insert(base.clone(), instance);
            } else if let Some(short) = package.strip_prefix(&qualified_prefix) {
                group.insert(format!("{}.{}", base, short), Arc::clone(&instance));
                group.insert(short.to_string(), instance);
            } else {
                debug!(package = %package, "discovered unit outside the base namespace");
            }
        }
    }

    Ok(group)
}

/// Dotted package name of a discovered unit file, relative to `root`:
/// path separators become dots and the result is lowercased.
fn derive_package(root: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(root).ok()?;
    let directory = relative.parent()?;

    let segments: Vec<String> = directory
        .components()
        .map(|component| {
            component
                .as_os_str()
                .to_string_lossy()
                .to_ascii_lowercase()
        })
        .collect();
    if segments.is_empty() {
        return None;
    }
    Some(segments.join("."))
}
