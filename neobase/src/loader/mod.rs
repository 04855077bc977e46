//! Loading points of reference from OPTD data rows.
//!
//! The loader turns raw rows into a [`Store`]:
//!
//! - the first row is a header and is always skipped,
//! - blank rows and rows whose first column starts with `#` are skipped,
//! - rows not valid on the reference date are skipped,
//! - rows with an empty key are skipped,
//! - colliding keys are renamed `KEY@n` and cross-linked, unless the
//!   duplicate policy keeps only the first row.
//!
//! The first row seen for a code owns the plain key, so upstream ordering
//! decides who wins (OPTD lists airports before cities).
//!
//! # Example
//!
//! ```
//! use neobase::loader::{Loader, ReferenceDate};
//! use neobase::schema::Schema;
//!
//! let loader = Loader::new(Schema::optd_por(), ReferenceDate::parse("2030-01-01")?);
//! let store = loader.load_bundled()?;
//! assert!(store.contains("ORY"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod date;
mod rows;

pub use date::{DateError, ReferenceDate};
pub use rows::DELIMITER;

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::config::NeoBaseConfig;
use crate::record::Record;
use crate::schema::Schema;
use crate::store::{normalize_key, Store};

/// Public location of the full OPTD points of reference file.
pub const OPTD_POR_URL: &str = "https://raw.githubusercontent.com/opentraveldata/opentraveldata/master/opentraveldata/optd_por_public.csv";

/// Small OPTD extract shipped with the crate.
pub const BUNDLED_POR: &str = include_str!("../../data/optd_por_sample.csv");

/// Error type for loading.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("POR file not found at: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to read POR data: {0}")]
    Csv(#[from] csv::Error),
    #[error("Malformed row at line {line}: expected at least {expected} columns, found {found}")]
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
}

/// What to do when a key is seen twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Keep every row; later ones get `KEY@n` keys.
    #[default]
    KeepAll,
    /// Keep only the first row for each key.
    KeepFirst,
}

impl DuplicatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicatePolicy::KeepAll => "keep-all",
            DuplicatePolicy::KeepFirst => "keep-first",
        }
    }
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    /// Accepts `keep-all`/`keep-first` and the boolean spellings used by
    /// `OPTD_POR_DUPLICATES` (`1`/`0`, `true`/`false`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keep-all" | "all" | "1" | "true" | "yes" => Ok(DuplicatePolicy::KeepAll),
            "keep-first" | "first" | "0" | "false" | "no" => Ok(DuplicatePolicy::KeepFirst),
            other => Err(format!(
                "unknown duplicate policy '{}' (expected keep-all, keep-first, 1 or 0)",
                other
            )),
        }
    }
}

/// Builds a [`Store`] from rows, a schema and a reference date.
#[derive(Debug, Clone)]
pub struct Loader {
    schema: Schema,
    date: ReferenceDate,
    duplicates: DuplicatePolicy,
}

impl Loader {
    /// Create a loader keeping all duplicates.
    pub fn new(schema: Schema, date: ReferenceDate) -> Self {
        Self {
            schema,
            date,
            duplicates: DuplicatePolicy::default(),
        }
    }

    /// Create a loader from a configuration.
    pub fn from_config(config: &NeoBaseConfig) -> Self {
        Self::new(config.schema().clone(), config.date()).with_duplicates(config.duplicates())
    }

    /// Set the duplicate policy.
    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn date(&self) -> &ReferenceDate {
        &self.date
    }

    pub fn duplicates(&self) -> DuplicatePolicy {
        self.duplicates
    }

    /// Load from rows of string columns. The first row is the header.
    pub fn load_rows<I, R, S>(&self, rows: I) -> Result<Store, LoadError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut builder = StoreBuilder::new(self);
        for (index, row) in rows.into_iter().enumerate().skip(1) {
            builder.push(index + 1, row.as_ref())?;
        }
        Ok(builder.finish())
    }

    /// Load from caret-delimited text. The first line is the header.
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Store, LoadError> {
        let mut builder = StoreBuilder::new(self);
        for row in rows::read_rows(reader).skip(1) {
            let row = row?;
            let columns: Vec<&str> = row.columns.iter().collect();
            builder.push(row.line, &columns)?;
        }
        Ok(builder.finish())
    }

    /// Load from a caret-delimited file.
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<Store, LoadError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }

        tracing::debug!(path = %path.display(), "Loading POR file");
        let file = File::open(path)?;
        self.load_reader(BufReader::new(file))
    }

    /// Load the sample data shipped with the crate.
    pub fn load_bundled(&self) -> Result<Store, LoadError> {
        self.load_reader(BUNDLED_POR.as_bytes())
    }
}

/// Accumulates records while rows are pushed, resolving key collisions.
struct StoreBuilder<'a> {
    loader: &'a Loader,
    min_width: usize,
    entries: HashMap<String, Record>,
    skipped: usize,
}

impl<'a> StoreBuilder<'a> {
    fn new(loader: &'a Loader) -> Self {
        Self {
            loader,
            min_width: loader.schema.min_row_width(),
            entries: HashMap::new(),
            skipped: 0,
        }
    }

    fn push<S: AsRef<str>>(&mut self, line: usize, row: &[S]) -> Result<(), LoadError> {
        let schema = &self.loader.schema;

        if row.is_empty() || row[0].as_ref().starts_with('#') {
            return Ok(());
        }

        if row.len() < self.min_width {
            return Err(LoadError::MalformedRow {
                line,
                expected: self.min_width,
                found: row.len(),
            });
        }

        if let Some(validity) = schema.validity() {
            let (from, until) = (row[validity.from].as_ref(), row[validity.until].as_ref());
            if !self.loader.date.is_within(from, until) {
                tracing::debug!(line, from, until, date = %self.loader.date, "Skipping inactive row");
                self.skipped += 1;
                return Ok(());
            }
        }

        let key = normalize_key(row[schema.key_column()].as_ref());
        if key.is_empty() {
            tracing::debug!(line, "Skipping row without key");
            self.skipped += 1;
            return Ok(());
        }

        if self.loader.duplicates == DuplicatePolicy::KeepFirst && self.entries.contains_key(&key) {
            self.skipped += 1;
            return Ok(());
        }

        let record = schema.build_record(row);
        self.insert(key, record);
        Ok(())
    }

    /// Insert under the plain key, or under `KEY@n` if it is taken.
    ///
    /// `n` is one plus the number of records already linked to the plain
    /// key. Every member of the clique gains the new key, and the new record
    /// lists every existing member.
    fn insert(&mut self, key: String, mut record: Record) {
        let mut clique: BTreeSet<String> = match self.entries.get(&key) {
            Some(first) => first.duplicate_keys().clone(),
            None => {
                self.entries.insert(key, record);
                return;
            }
        };

        let new_key = format!("{}@{}", key, 1 + clique.len());
        clique.insert(key);

        for member in &clique {
            if let Some(existing) = self.entries.get_mut(member) {
                existing.add_duplicate_key(new_key.clone());
            }
        }

        tracing::debug!(key = %new_key, "Renamed duplicate key");
        record.set_duplicate_keys(clique);
        self.entries.insert(new_key, record);
    }

    fn finish(self) -> Store {
        tracing::info!(
            count = self.entries.len(),
            skipped = self.skipped,
            date = %self.loader.date,
            "Loaded points of reference"
        );
        Store::from_entries(self.loader.schema.clone(), self.entries)
    }
}
