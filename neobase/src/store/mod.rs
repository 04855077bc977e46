//! Key → record map for points of reference.
//!
//! Keys are case-insensitive: they are upper-cased on every read and write.
//! Lookups distinguish an unknown key ([`StoreError::UnknownKey`]) from an
//! unknown field on a known key ([`StoreError::UnknownField`]).
//!
//! Defaults are opt-in. A plain lookup fails on an unknown key; chaining
//! [`OrUnknownKey::or_if_unknown_key`] turns that one failure into a value:
//!
//! ```
//! use neobase::store::{OrUnknownKey, Store};
//!
//! let store = Store::default();
//! let name = store.get_field("ZZZ", "name").map(Some).or_if_unknown_key(None)?;
//! assert_eq!(name, None);
//! # Ok::<(), neobase::store::StoreError>(())
//! ```

use std::collections::{BTreeSet, HashMap};

use crate::record::{FieldValue, Record};
use crate::schema::Schema;

/// Error type for store lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No point of reference under this key.
    #[error("Key not found: {0}")]
    UnknownKey(String),

    /// The key exists but its record has no such field.
    #[error("Field '{field}' (for key '{key}') not found")]
    UnknownField { key: String, field: String },

    /// A filter names a field the schema does not define.
    #[error("Field '{0}' is not part of the schema")]
    FieldNotInSchema(String),
}

/// Replace an unknown-key failure with a default value.
pub trait OrUnknownKey<T> {
    /// Map `Err(UnknownKey)` to `Ok(default)`. Other errors pass through.
    fn or_if_unknown_key(self, default: T) -> Result<T, StoreError>;
}

impl<T> OrUnknownKey<T> for Result<T, StoreError> {
    fn or_if_unknown_key(self, default: T) -> Result<T, StoreError> {
        match self {
            Err(StoreError::UnknownKey(_)) => Ok(default),
            other => other,
        }
    }
}

/// Normalise a key for storage and lookup.
pub fn normalize_key(key: &str) -> String {
    key.to_uppercase()
}

/// Points of reference indexed by key.
///
/// Built once by the [`Loader`](crate::loader::Loader), then read. Ad-hoc
/// updates go through [`Store::set`]; there is no removal.
#[derive(Debug, Clone, Default)]
pub struct Store {
    schema: Schema,
    entries: HashMap<String, Record>,
}

impl Store {
    /// Create an empty store.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            entries: HashMap::new(),
        }
    }

    pub(crate) fn from_entries(schema: Schema, entries: HashMap<String, Record>) -> Self {
        Self { schema, entries }
    }

    /// The schema records were loaded with.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if the key exists (case-insensitive).
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(&normalize_key(key))
    }

    /// All keys, in no particular order. Each call starts a fresh pass.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// All keys with their records.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Record)> + '_ {
        self.entries.iter().map(|(key, record)| (key.as_str(), record))
    }

    /// Get the full record for a key.
    pub fn get(&self, key: &str) -> Result<&Record, StoreError> {
        let key = normalize_key(key);
        self.entries
            .get(&key)
            .ok_or(StoreError::UnknownKey(key))
    }

    /// Get one field of a record.
    pub fn get_field(&self, key: &str, field: &str) -> Result<&FieldValue, StoreError> {
        let record = self.get(key)?;
        record.get(field).ok_or_else(|| StoreError::UnknownField {
            key: normalize_key(key),
            field: field.to_string(),
        })
    }

    /// Get one field, falling back to `default` when the key is unknown.
    ///
    /// An unknown field on a known key is still an error.
    pub fn get_field_or<'a>(
        &'a self,
        key: &str,
        field: &str,
        default: &'a FieldValue,
    ) -> Result<&'a FieldValue, StoreError> {
        self.get_field(key, field).or_if_unknown_key(default)
    }

    /// Keys of the other records sharing this key's real-world code.
    pub fn duplicates_of(&self, key: &str) -> Result<&BTreeSet<String>, StoreError> {
        self.get(key).map(Record::duplicate_keys)
    }

    /// Set fields on a record, creating an empty one if the key is new.
    ///
    /// Field names are not restricted to the schema.
    pub fn set<I, F, V>(&mut self, key: &str, fields: I)
    where
        I: IntoIterator<Item = (F, V)>,
        F: Into<String>,
        V: Into<FieldValue>,
    {
        let record = self.entries.entry(normalize_key(key)).or_default();
        for (field, value) in fields {
            record.set(field.into(), value.into());
        }
    }
}
