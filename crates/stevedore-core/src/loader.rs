//! The package loader.
//!
//! [`Loader`] owns the class path, the loaded-package registry, and the
//! symbol table: the engine's entire process state, held by one explicit
//! context object. A load request flows through the registry check, the
//! class path search, the unit load, symbol resolution, instantiation, and
//! finally registration.
//!
//! Everything is synchronous; every filesystem probe is a blocking call
//! performed inline.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::classpath::ClassPath;
use crate::error::{LoaderError, LoaderResult};
use crate::expand;
use crate::package::PackageName;
use crate::registry::LoadedRegistry;
use crate::resolve::{locate, symbol_candidates};
use crate::scan;
use crate::symbols::{Instance, SymbolTable};

/// Result of a successful load.
#[derive(Debug, Clone)]
pub enum Loaded {
    /// A plain package: the instance of its governing symbol.
    Single(Arc<Instance>),

    /// A superpackage: every package in the subtree, keyed by both
    /// fully-qualified and short names.
    Group(HashMap<String, Arc<Instance>>),
}

impl Loaded {
    /// The single instance, if this was a plain load.
    pub fn as_single(&self) -> Option<&Arc<Instance>> {
        match self {
            Self::Single(instance) => Some(instance),
            Self::Group(_) => None,
        }
    }

    /// The group mapping, if this was a superpackage load.
    pub fn as_group(&self) -> Option<&HashMap<String, Arc<Instance>>> {
        match self {
            Self::Group(group) => Some(group),
            Self::Single(_) => None,
        }
    }
}

/// Clear a caller-held slot.
///
/// Only the caller's reference is dropped; the package stays registered as
/// loaded and cannot be loaded again through the same engine.
pub fn unload<T>(slot: &mut Option<T>) {
    *slot = None;
}

/// The resolution and loading engine.
#[derive(Debug, Default)]
pub struct Loader {
    pub(crate) class_path: ClassPath,
    pub(crate) registry: LoadedRegistry,
    pub(crate) symbols: SymbolTable,
}

impl Loader {
    /// Create a loader with an empty class path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader seeded from the `STEVEDORE_CLASS_PATH` environment
    /// variable.
    pub fn from_env() -> Self {
        Self::with_class_path(ClassPath::from_env())
    }

    /// Create a loader over an existing class path.
    pub fn with_class_path(class_path: ClassPath) -> Self {
        Self {
            class_path,
            ..Self::default()
        }
    }

    /// Append a search root.
    pub fn add_class_path(&mut self, root: impl Into<PathBuf>) {
        self.class_path.add(root);
    }

    /// Append several search roots in order.
    pub fn add_class_paths<I, P>(&mut self, roots: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.class_path.add_all(roots);
    }

    /// The current class path.
    pub fn class_path(&self) -> &ClassPath {
        &self.class_path
    }

    /// The symbol table populated by loaded unit files.
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Load a package, or a whole superpackage for a wildcard name.
    ///
    /// Returns `Ok(None)` (with a warning event) when the package was
    /// already loaded; this is the only non-fatal failure. Everything else
    /// that goes wrong aborts the load with a [`LoaderError`].
    pub fn load(&mut self, package: &str) -> LoaderResult<Option<Loaded>> {
        if self.registry.contains(package) {
            warn!(package, "package was previously loaded");
            return Ok(None);
        }

        let name = PackageName::parse(package)?;
        if name.is_wildcard() {
            let group = expand::expand(self, &name)?;
            info!(package, loaded = group.len(), "loaded superpackage");
            return Ok(Some(Loaded::Group(group)));
        }

        let instance = self.load_single(&name)?;
        Ok(Some(Loaded::Single(instance)))
    }

    /// Out-parameter call shape of [`Loader::load`]: stores the result in
    /// the caller's slot.
    pub fn load_into(&mut self, package: &str, slot: &mut Option<Loaded>) -> LoaderResult<()> {
        *slot = self.load(package)?;
        Ok(())
    }

    /// Case-insensitive loaded check.
    pub fn is_loaded(&self, package: &str) -> bool {
        self.registry.contains(package)
    }

    /// Loaded package names, lowercase, in load order.
    pub fn loaded_packages(&self) -> &[String] {
        self.registry.list()
    }

    /// Every concrete package discoverable across the registered roots.
    ///
    /// Names keep their on-disk case and appear once each; the result is
    /// empty when no root contains a convention-matching unit file.
    pub fn available_packages(&self) -> LoaderResult<Vec<String>> {
        let mut seen = HashSet::new();
        let mut packages = Vec::new();

        for root in self.class_path.roots() {
            for file in scan::scan(root)? {
                let relative = match file.strip_prefix(root) {
                    Ok(relative) => relative,
                    Err(_) => continue,
                };
                let directory = match relative.parent() {
                    Some(directory) => directory,
                    None => continue,
                };
                let segments: Vec<String> = directory
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy().into_owned())
                    .collect();
                if segments.is_empty() {
                    continue;
                }
                let package = segments.join(".");
                if seen.insert(package.to_ascii_lowercase()) {
                    packages.push(package);
                }
            }
        }
        Ok(packages)
    }

    /// Search the class path in order and load `name` from the first root
    /// holding an existing unit file.
    fn load_single(&mut self, name: &PackageName) -> LoaderResult<Arc<Instance>> {
        let mut found = None;
        for root in self.class_path.roots() {
            let location = locate(name, root);
            if !location.directory.is_dir() {
                debug!(
                    package = %name,
                    directory = %location.directory.display(),
                    "unit directory missing under root"
                );
                continue;
            }
            if let Some(file) = scan::find_unit_file(&location.directory, name.unit_name())? {
                debug!(package = %name, file = %file.display(), "unit file found");
                found = Some(file);
                break;
            }
        }

        let file = found.ok_or_else(|| LoaderError::PackageNotFound {
            package: name.as_str().to_string(),
        })?;

        self.load_unit(&file, name.unit_name(), &name.key())
    }

    /// Load `file`, resolve its governing symbol, instantiate it, and
    /// register `package_key`. Shared by plain loads and superpackage
    /// expansion.
    pub(crate) fn load_unit(
        &mut self,
        file: &Path,
        unit_name: &str,
        package_key: &str,
    ) -> LoaderResult<Arc<Instance>> {
        self.symbols.load_file(file)?;

        let candidates = symbol_candidates(unit_name, package_key);
        let entry =
            self.symbols
                .resolve(&candidates)
                .ok_or_else(|| LoaderError::SymbolNotFound {
                    package: package_key.to_string(),
                    unit_symbol: candidates[0].clone(),
                    path_symbol: candidates[1].clone(),
                })?;

        let instance = Arc::new(entry.instantiate(package_key));
        self.registry.add(package_key);
        info!(package = package_key, symbol = instance.symbol(), "loaded package");
        Ok(instance)
    }
}
