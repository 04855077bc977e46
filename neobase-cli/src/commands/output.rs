//! Result formatting: aligned text for terminals, or CSV with `--show`.

use std::io::{self, Write};

use neobase::record::FieldValue;
use neobase::store::Store;

use crate::error::CliError;

/// Banner width above grep-like results.
pub const FIELD_BANNER_WIDTH: usize = 112;
/// Banner width above radius and k-nearest results.
pub const NEAR_BANNER_WIDTH: usize = 116;
/// Banner width above a full record.
pub const RECORD_BANNER_WIDTH: usize = 55;

/// Where results go and in which format.
pub enum Output<W: Write> {
    /// Human-readable lines.
    Table(W),
    /// One CSV row per result, holding the chosen fields.
    Csv {
        writer: csv::Writer<W>,
        fields: Vec<String>,
    },
}

impl<W: Write> Output<W> {
    /// CSV output when `show` names fields, text otherwise.
    pub fn new(writer: W, show: &[String]) -> Self {
        if show.is_empty() {
            Output::Table(writer)
        } else {
            Output::Csv {
                writer: csv::WriterBuilder::new()
                    .has_headers(false)
                    .from_writer(writer),
                fields: show.to_vec(),
            }
        }
    }

    /// Store size line printed before text results.
    pub fn summary(&mut self, store: &Store) -> io::Result<()> {
        match self {
            Output::Table(w) => writeln!(w, "{} points of reference", store.len()),
            Output::Csv { .. } => Ok(()),
        }
    }

    /// Section title centred in a line of stars. Text mode only.
    pub fn banner(&mut self, title: &str, width: usize) -> io::Result<()> {
        match self {
            Output::Table(w) => writeln!(w, "\n{:*^width$}", format!("  {}  ", title), width = width),
            Output::Csv { .. } => Ok(()),
        }
    }

    /// Report a key missing from the data.
    ///
    /// In CSV mode the message goes to stderr so the CSV stays parseable.
    pub fn not_found(&mut self, key: &str) -> io::Result<()> {
        match self {
            Output::Table(w) => writeln!(w, "'{}' not found in data.", key),
            Output::Csv { .. } => {
                eprintln!("'{}' not found in data.", key);
                Ok(())
            }
        }
    }

    /// One-line summary of a point of reference.
    ///
    /// The last column is the distance when given, the page rank otherwise.
    pub fn por(&mut self, store: &Store, key: &str, distance: Option<f64>) -> Result<(), CliError> {
        match self {
            Output::Table(w) => {
                let location_type = store
                    .get_field(key, "location_type")?
                    .as_list()
                    .map(|types| types.concat())
                    .unwrap_or_default();
                let name = store.get_field(key, "name")?.to_string();
                let country = store.get_field(key, "country_name")?.to_string();

                match distance {
                    Some(distance) => writeln!(
                        w,
                        "{:<8} {:<6} {:<60} {:<30} {:7.1}km",
                        key, location_type, name, country, distance
                    )?,
                    None => writeln!(
                        w,
                        "{:<8} {:<6} {:<60} {:<30} {:>5}",
                        key,
                        location_type,
                        name,
                        country,
                        page_rank_label(store.get_field(key, "page_rank")?)
                    )?,
                }
                Ok(())
            }
            Output::Csv { writer, fields } => write_csv_row(writer, fields, store, key),
        }
    }

    /// Every field of a point of reference, sorted by name.
    pub fn record(&mut self, store: &Store, key: &str) -> Result<(), CliError> {
        match self {
            Output::Table(w) => {
                writeln!(
                    w,
                    "\n{:*^width$}",
                    format!("  {}  ", key),
                    width = RECORD_BANNER_WIDTH
                )?;

                let record = store.get(key)?;
                for (name, value) in record.fields() {
                    writeln!(w, "{:<20}{}", name, value)?;
                }
                if !record.duplicate_keys().is_empty() {
                    let duplicates: Vec<&str> =
                        record.duplicate_keys().iter().map(String::as_str).collect();
                    writeln!(w, "{:<20}{}", "duplicates", duplicates.join(","))?;
                }
                Ok(())
            }
            Output::Csv { writer, fields } => write_csv_row(writer, fields, store, key),
        }
    }

    /// Flush buffered output.
    pub fn finish(self) -> io::Result<()> {
        match self {
            Output::Table(mut w) => w.flush(),
            Output::Csv { mut writer, .. } => writer.flush(),
        }
    }
}

fn write_csv_row<W: Write>(
    writer: &mut csv::Writer<W>,
    fields: &[String],
    store: &Store,
    key: &str,
) -> Result<(), CliError> {
    let row = fields
        .iter()
        .map(|field| store.get_field(key, field).map(ToString::to_string))
        .collect::<Result<Vec<_>, _>>()?;
    writer.write_record(&row)?;
    Ok(())
}

/// Page rank as a percentage, `-` when unknown.
fn page_rank_label(value: &FieldValue) -> String {
    match value.as_float() {
        Some(rank) => format!("{:.1}%", rank * 100.0),
        None => "-".to_string(),
    }
}
