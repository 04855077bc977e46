//! NeoBase - points of reference from OpenTravelData
//!
//! This library loads the OPTD points of reference (POR) file, a caret
//! separated listing of airports, cities, stations and other transport
//! locations, into an in-memory [`Store`](store::Store) indexed by IATA-like
//! code. It answers field lookups, path distances and geographic searches
//! over that store.
//!
//! Rows are filtered by a reference date against their validity window, and
//! rows sharing a code are kept under derived keys (`NCE@1`, `NCE@2`) that
//! are cross-linked as duplicates.
//!
//! # Example
//!
//! ```
//! use neobase::config::{NeoBaseConfig, ReferenceDate};
//!
//! let config = NeoBaseConfig::new().with_date(ReferenceDate::parse("2026-10-19")?);
//! let store = neobase::open(&config)?;
//!
//! assert_eq!(store.get_field("ORY", "country_code")?.to_string(), "FR");
//!
//! let near: Vec<_> = store
//!     .find_closest("ORY".into(), 2, store.keys())
//!     .into_iter()
//!     .map(|n| n.key)
//!     .collect();
//! assert_eq!(near, ["ORY", "PAR"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod geo;
pub mod loader;
pub mod logging;
pub mod record;
pub mod schema;
pub mod store;

use config::NeoBaseConfig;
use loader::{LoadError, Loader};
use store::Store;

/// Version of the NeoBase library and CLI.
///
/// This is synchronized across all components in the workspace.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Load a store as described by the configuration.
///
/// Reads the configured POR file, or the bundled sample if none is set.
pub fn open(config: &NeoBaseConfig) -> Result<Store, LoadError> {
    let loader = Loader::from_config(config);
    match config.por_file() {
        Some(path) => loader.load_path(path),
        None => loader.load_bundled(),
    }
}
