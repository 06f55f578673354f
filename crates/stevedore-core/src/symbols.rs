//! Symbol table and instantiation.
//!
//! Loading a unit file registers every symbol it defines; the table is the
//! factory registry consulted afterwards to default-construct instances.
//! Two rules from the host environment are enforced here:
//!
//! - load once: a unit file is tracked by canonical path and loading it
//!   again is a no-op, never a redefinition;
//! - a symbol already defined by a *different* file is a fatal redefinition.
//!
//! Symbol lookup is ASCII-case-insensitive; the declared spelling is
//! preserved on entries and instances.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use tracing::debug;

use crate::error::{LoaderError, LoaderResult};
use crate::unit::{SymbolSpec, UnitFile};

/// A registered symbol definition: the factory for its instances.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolEntry {
    name: String,
    source: PathBuf,
    spec: SymbolSpec,
}

impl SymbolEntry {
    /// Declared symbol name, original spelling.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit file that defined the symbol.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// The definition.
    pub fn spec(&self) -> &SymbolSpec {
        &self.spec
    }

    /// Default-construct an instance of this symbol for `package`.
    pub fn instantiate(&self, package: &str) -> Instance {
        Instance {
            symbol: self.name.clone(),
            package: package.to_string(),
            source: self.source.clone(),
            state: self.spec.defaults.clone(),
        }
    }
}

/// A default-constructed instance of a loaded symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    symbol: String,
    package: String,
    source: PathBuf,
    state: BTreeMap<String, Value>,
}

impl Instance {
    /// Symbol this instance was constructed from.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Package the instance was loaded as (lowercase registry form).
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Unit file the symbol came from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Instance state.
    pub fn state(&self) -> &BTreeMap<String, Value> {
        &self.state
    }

    /// Read a single state field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.state.get(field)
    }
}

/// Symbol definitions registered by loaded unit files.
#[derive(Debug, Default)]
pub struct SymbolTable {
    /// Declared symbols keyed by lowercase name.
    symbols: HashMap<String, SymbolEntry>,
    /// Canonical paths of unit files already loaded.
    loaded_files: HashSet<PathBuf>,
}

impl SymbolTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a unit file, registering the symbols it defines.
    ///
    /// Loading the same physical file again is a no-op.
    pub fn load_file(&mut self, path: &Path) -> LoaderResult<()> {
        let canonical =
            fs::canonicalize(path).map_err(|source| LoaderError::io(path, source))?;
        if self.loaded_files.contains(&canonical) {
            debug!(path = %path.display(), "unit file already loaded");
            return Ok(());
        }

        let unit = UnitFile::read(path)?;
        for (name, spec) in &unit.symbols {
            let key = name.to_ascii_lowercase();
            if let Some(existing) = self.symbols.get(&key) {
                if existing.source != canonical {
                    return Err(LoaderError::SymbolRedefined {
                        symbol: name.clone(),
                        first: existing.source.clone(),
                        second: canonical,
                    });
                }
                continue;
            }
            debug!(symbol = %name, path = %path.display(), "registered symbol");
            self.symbols.insert(
                key,
                SymbolEntry {
                    name: name.clone(),
                    source: canonical.clone(),
                    spec: spec.clone(),
                },
            );
        }
        self.loaded_files.insert(canonical);
        Ok(())
    }

    /// Whether a unit file was already loaded.
    pub fn is_file_loaded(&self, path: &Path) -> bool {
        match fs::canonicalize(path) {
            Ok(canonical) => self.loaded_files.contains(&canonical),
            Err(_) => false,
        }
    }

    /// Whether a symbol is defined (case-insensitive).
    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(&name.to_ascii_lowercase())
    }

    /// Look up a symbol (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&SymbolEntry> {
        self.symbols.get(&name.to_ascii_lowercase())
    }

    /// First candidate that resolves to a defined symbol.
    pub fn resolve(&self, candidates: &[String]) -> Option<&SymbolEntry> {
        candidates.iter().find_map(|candidate| self.get(candidate))
    }

    /// Number of defined symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether no symbols are defined.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
