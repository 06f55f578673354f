//! Classpath-based package resolution and loading.
//!
//! `stevedore-core` resolves dotted package names (`tld.domain.Widget`) to
//! unit files under an ordered list of search roots, loads the matching
//! unit, and instantiates the symbol it defines. It provides:
//!
//! - an ordered, append-only class path (first root wins)
//! - two-convention symbol resolution: the unit name itself, then the
//!   lowercase package path joined with `_`
//! - recursive superpackage loads (`tld.domain.*`) keyed by both
//!   fully-qualified and short names
//! - a loaded-package registry that rejects duplicate loads
//!
//! # Quick Start
//!
//! ```no_run
//! use stevedore_core::{Loaded, Loader};
//!
//! # fn example() -> stevedore_core::LoaderResult<()> {
//! let mut loader = Loader::new();
//! loader.add_class_path("/srv/packages");
//!
//! if let Some(Loaded::Single(widget)) = loader.load("tld.domain.Widget")? {
//!     println!("loaded {}", widget.symbol());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # On-disk convention
//!
//! A package `tld.domain.Widget` is implemented by a unit file one extra
//! directory level below its package path:
//!
//! ```text
//! <root>/tld/domain/Widget/Widget.unit.yaml
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `STEVEDORE_CLASS_PATH` | Initial search roots, `;`-separated (see [`Loader::from_env`]) |

pub mod classpath;
pub mod error;
pub mod loader;
pub mod package;
pub mod registry;
pub mod resolve;
pub mod scan;
pub mod symbols;
pub mod unit;

mod expand;

// Re-export main types
pub use classpath::{ClassPath, CLASS_PATH_ENV, CLASS_PATH_SEPARATOR};
pub use error::{LoaderError, LoaderResult};
pub use loader::{unload, Loaded, Loader};
pub use package::PackageName;
pub use registry::LoadedRegistry;
pub use resolve::{locate, symbol_candidates, UnitLocation};
pub use scan::{find_unit_file, scan};
pub use symbols::{Instance, SymbolEntry, SymbolTable};
pub use unit::{unit_file_name, SymbolSpec, UnitFile, UNIT_EXT};
