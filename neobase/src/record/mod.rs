//! Point of reference records.
//!
//! A [`Record`] holds the schema fields decoded from one data row, an
//! "extras" side map for fields added later through
//! [`Store::set`](crate::store::Store::set), and the set of keys that belong
//! to the same real-world code (see [`Record::duplicate_keys`]).

mod value;

pub use value::FieldValue;

use std::collections::{BTreeMap, BTreeSet};

/// One point of reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
    extras: BTreeMap<String, FieldValue>,
    duplicate_keys: BTreeSet<String>,
}

impl Record {
    /// Create an empty record with no fields and no duplicates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a record from decoded schema fields.
    pub(crate) fn from_fields(fields: BTreeMap<String, FieldValue>) -> Self {
        Self {
            fields,
            extras: BTreeMap::new(),
            duplicate_keys: BTreeSet::new(),
        }
    }

    /// Get a field value by name, schema fields first, then extras.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field).or_else(|| self.extras.get(field))
    }

    /// Returns true if the record carries the field.
    pub fn contains_field(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Iterate over all fields, schema fields and extras alike, sorted by name.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        let mut all: Vec<(&str, &FieldValue)> = self
            .fields
            .iter()
            .chain(self.extras.iter())
            .map(|(name, value)| (name.as_str(), value))
            .collect();
        all.sort_unstable_by_key(|(name, _)| *name);
        all.into_iter()
    }

    /// Number of fields on the record.
    pub fn len(&self) -> usize {
        self.fields.len() + self.extras.len()
    }

    /// Returns true if the record has no fields at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.extras.is_empty()
    }

    /// Keys of the other records sharing this record's real-world code.
    ///
    /// Never contains the record's own key.
    pub fn duplicate_keys(&self) -> &BTreeSet<String> {
        &self.duplicate_keys
    }

    pub(crate) fn set_duplicate_keys(&mut self, keys: BTreeSet<String>) {
        self.duplicate_keys = keys;
    }

    pub(crate) fn add_duplicate_key(&mut self, key: String) {
        self.duplicate_keys.insert(key);
    }

    /// Update a field. Existing schema fields are overwritten in place;
    /// anything else lands in the extras map.
    pub(crate) fn set(&mut self, field: String, value: FieldValue) {
        if let Some(slot) = self.fields.get_mut(&field) {
            *slot = value;
        } else {
            self.extras.insert(field, value);
        }
    }
}
