//! Field extraction schema.
//!
//! A [`Schema`] maps source columns of a data row to named record fields,
//! names the column holding the primary key, and optionally the two columns
//! holding the validity window of a row.
//!
//! The default schema ([`Schema::optd_por`]) matches the OpenTravelData
//! `optd_por_public.csv` layout. Specialised datasets extend it by
//! appending fields:
//!
//! ```
//! use neobase::schema::{Decoder, Schema};
//!
//! let schema = Schema::optd_por()
//!     .with_field("geolat", 49, Decoder::Text)?
//!     .with_field("geolng", 50, Decoder::Text)?;
//! assert!(schema.contains_field("geolat"));
//! # Ok::<(), neobase::schema::SchemaError>(())
//! ```

mod decoder;

pub use decoder::Decoder;

use std::collections::BTreeMap;

use crate::record::{FieldValue, Record};

/// Column of the IATA code in the OPTD POR file.
pub const OPTD_KEY_COLUMN: usize = 0;
/// Column of the first day a POR is valid.
pub const OPTD_VALID_FROM_COLUMN: usize = 13;
/// Column of the last day a POR is valid.
pub const OPTD_VALID_UNTIL_COLUMN: usize = 14;

/// Error type for schema construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("Field '{0}' is already defined in the schema")]
    DuplicateField(String),
}

/// One named field and where it comes from.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    name: String,
    column: usize,
    decoder: Decoder,
}

impl FieldSpec {
    /// Field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source column index (0-based).
    pub fn column(&self) -> usize {
        self.column
    }

    /// Decoder applied to the raw column.
    pub fn decoder(&self) -> Decoder {
        self.decoder
    }
}

/// Columns holding the validity window of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityColumns {
    /// First valid day, `YYYY-MM-DD`, empty for "since forever".
    pub from: usize,
    /// Last valid day, `YYYY-MM-DD`, empty for "still valid".
    pub until: usize,
}

/// Ordered list of fields plus the key and validity columns.
#[derive(Debug, Clone)]
pub struct Schema {
    key_column: usize,
    validity: Option<ValidityColumns>,
    fields: Vec<FieldSpec>,
}

impl Schema {
    /// Create a schema with only a key column.
    pub fn new(key_column: usize) -> Self {
        Self {
            key_column,
            validity: None,
            fields: Vec::new(),
        }
    }

    /// The OpenTravelData POR layout.
    pub fn optd_por() -> Self {
        let fields: [(&str, usize, Decoder); 13] = [
            ("iata_code", 0, Decoder::Text),
            ("name", 6, Decoder::Text),
            ("lat", 8, Decoder::Text),
            ("lng", 9, Decoder::Text),
            ("page_rank", 12, Decoder::OptionalFloat),
            ("country_code", 16, Decoder::Text),
            ("country_name", 18, Decoder::Text),
            ("continent_name", 19, Decoder::Text),
            ("timezone", 31, Decoder::Text),
            ("city_code_list", 36, Decoder::Split(',')),
            ("city_name_list", 37, Decoder::Split('=')),
            ("location_type", 41, Decoder::Chars),
            ("currency", 46, Decoder::Text),
        ];

        Self {
            key_column: OPTD_KEY_COLUMN,
            validity: Some(ValidityColumns {
                from: OPTD_VALID_FROM_COLUMN,
                until: OPTD_VALID_UNTIL_COLUMN,
            }),
            fields: fields
                .into_iter()
                .map(|(name, column, decoder)| FieldSpec {
                    name: name.to_string(),
                    column,
                    decoder,
                })
                .collect(),
        }
    }

    /// Set the columns holding the validity window.
    pub fn with_validity(mut self, from: usize, until: usize) -> Self {
        self.validity = Some(ValidityColumns { from, until });
        self
    }

    /// Append a field, consuming the schema.
    pub fn with_field(
        mut self,
        name: &str,
        column: usize,
        decoder: Decoder,
    ) -> Result<Self, SchemaError> {
        self.push_field(name, column, decoder)?;
        Ok(self)
    }

    /// Append a field. Field names are unique.
    pub fn push_field(
        &mut self,
        name: &str,
        column: usize,
        decoder: Decoder,
    ) -> Result<(), SchemaError> {
        if self.contains_field(name) {
            return Err(SchemaError::DuplicateField(name.to_string()));
        }
        self.fields.push(FieldSpec {
            name: name.to_string(),
            column,
            decoder,
        });
        Ok(())
    }

    pub fn key_column(&self) -> usize {
        self.key_column
    }

    pub fn validity(&self) -> Option<ValidityColumns> {
        self.validity
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn contains_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Minimum number of columns a row needs for this schema.
    pub fn min_row_width(&self) -> usize {
        let validity = self
            .validity
            .map(|v| v.from.max(v.until))
            .unwrap_or_default();
        self.fields
            .iter()
            .map(|f| f.column)
            .chain([self.key_column, validity])
            .max()
            .unwrap_or_default()
            + 1
    }

    /// Decode every field of a row.
    ///
    /// The caller guarantees the row is at least [`Self::min_row_width`] wide.
    pub(crate) fn build_record<S: AsRef<str>>(&self, row: &[S]) -> Record {
        let fields: BTreeMap<String, FieldValue> = self
            .fields
            .iter()
            .map(|f| (f.name.clone(), f.decoder.decode(row[f.column].as_ref())))
            .collect();
        Record::from_fields(fields)
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::optd_por()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optd_por_layout() {
        let schema = Schema::optd_por();
        assert_eq!(schema.key_column(), 0);
        assert_eq!(schema.fields().len(), 13);
        assert_eq!(schema.field("currency").map(FieldSpec::column), Some(46));
        assert_eq!(schema.min_row_width(), 47);
        assert_eq!(
            schema.validity(),
            Some(ValidityColumns { from: 13, until: 14 })
        );
    }

    #[test]
    fn test_extend_with_fields() {
        let schema = Schema::optd_por()
            .with_field("geolat", 49, Decoder::Text)
            .and_then(|s| s.with_field("geolng", 50, Decoder::Text))
            .unwrap();
        assert_eq!(schema.fields().len(), 15);
        assert_eq!(schema.min_row_width(), 51);
        assert_eq!(schema.fields().last().map(FieldSpec::name), Some("geolng"));
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let result = Schema::optd_por().with_field("name", 7, Decoder::Text);
        assert!(matches!(result, Err(SchemaError::DuplicateField(name)) if name == "name"));
    }

    #[test]
    fn test_build_record_decodes_all_fields() {
        let schema = Schema::new(0)
            .with_field("code", 0, Decoder::Text)
            .and_then(|s| s.with_field("types", 1, Decoder::Chars))
            .and_then(|s| s.with_field("rank", 2, Decoder::OptionalFloat))
            .unwrap();
        assert_eq!(schema.min_row_width(), 3);

        let record = schema.build_record(&["NCE", "CA", ""]);
        assert_eq!(record.get("code"), Some(&FieldValue::from("NCE")));
        assert_eq!(record.get("types"), Some(&FieldValue::list(["C", "A"])));
        assert_eq!(record.get("rank"), Some(&FieldValue::Float(None)));
    }
}
