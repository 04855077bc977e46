//! Configuration for loading a [`Store`](crate::store::Store).
//!
//! [`NeoBaseConfig`] groups the load parameters. Every parameter has a
//! default, so an empty configuration loads the bundled sample as of today
//! with all duplicates kept. [`ConfigFile`] reads the same parameters from
//! `~/.neobase/config.ini`.
//!
//! # Example
//!
//! ```
//! use neobase::config::{DuplicatePolicy, NeoBaseConfig, ReferenceDate};
//!
//! let config = NeoBaseConfig::new()
//!     .with_date(ReferenceDate::parse("2012-01-01")?)
//!     .with_duplicates(DuplicatePolicy::KeepFirst);
//!
//! assert_eq!(config.date().as_str(), "2012-01-01");
//! assert!(config.por_file().is_none());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod file;

pub use crate::loader::{DuplicatePolicy, ReferenceDate};
pub use file::{ConfigFile, ConfigFileError, DataSettings};

use std::path::{Path, PathBuf};

use crate::schema::Schema;

/// Parameters for one load.
#[derive(Debug, Clone, Default)]
pub struct NeoBaseConfig {
    /// Reference date; today when unset
    date: Option<ReferenceDate>,
    duplicates: DuplicatePolicy,
    /// POR file; the bundled sample when unset
    por_file: Option<PathBuf>,
    schema: Schema,
}

impl NeoBaseConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reference date rows must be valid on.
    pub fn with_date(mut self, date: ReferenceDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Set how rows sharing a key are handled.
    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    /// Load from this file instead of the bundled sample.
    pub fn with_por_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.por_file = Some(path.into());
        self
    }

    /// Replace the OPTD schema.
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    /// The reference date, resolved to today if none was set.
    pub fn date(&self) -> ReferenceDate {
        self.date.clone().unwrap_or_default()
    }

    pub fn duplicates(&self) -> DuplicatePolicy {
        self.duplicates
    }

    pub fn por_file(&self) -> Option<&Path> {
        self.por_file.as_deref()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}
