//! Error types for the loading engine.

use std::path::{Path, PathBuf};

/// Errors raised while resolving, loading, or instantiating packages.
///
/// An already-loaded package is not an error: [`crate::Loader::load`] emits a
/// warning event and returns `Ok(None)` instead.
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    /// No search root contains a matching unit file.
    #[error("package {package} not found on the class path")]
    PackageNotFound { package: String },

    /// The unit file loaded, but neither naming convention resolved to a
    /// defined symbol.
    #[error("neither \"{unit_symbol}\" nor \"{path_symbol}\" is defined by package {package}")]
    SymbolNotFound {
        package: String,
        unit_symbol: String,
        path_symbol: String,
    },

    /// Two different unit files define the same symbol.
    #[error("symbol {} in {} is already defined by {}", .symbol, .second.display(), .first.display())]
    SymbolRedefined {
        symbol: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// Malformed package name.
    #[error("invalid package name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// Unit manifest could not be parsed.
    #[error("failed to parse unit file {}", .path.display())]
    UnitParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Filesystem failure while scanning or loading.
    #[error("i/o error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoaderError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Whether the failure concerns a single package rather than the engine
    /// state as a whole.
    pub fn package(&self) -> Option<&str> {
        match self {
            Self::PackageNotFound { package } | Self::SymbolNotFound { package, .. } => {
                Some(package)
            }
            Self::InvalidName { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// Result type for loader operations.
pub type LoaderResult<T> = Result<T, LoaderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_both_symbol_candidates() {
        let err = LoaderError::SymbolNotFound {
            package: "tld.domain.widget".to_string(),
            unit_symbol: "Widget".to_string(),
            path_symbol: "tld_domain_widget".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("\"Widget\""));
        assert!(rendered.contains("\"tld_domain_widget\""));
    }

    #[test]
    fn test_package_accessor() {
        let err = LoaderError::PackageNotFound {
            package: "tld.domain.Widget".to_string(),
        };
        assert_eq!(err.package(), Some("tld.domain.Widget"));

        let err = LoaderError::io(Path::new("/tmp/x"), std::io::Error::other("boom"));
        assert_eq!(err.package(), None);
    }
}
