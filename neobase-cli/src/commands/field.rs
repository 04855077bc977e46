//! Grep-like search: match each key against one field of every record.

use std::io::Write;

use neobase::store::{Store, StoreError};

use super::output::{Output, FIELD_BANNER_WIDTH};
use crate::error::CliError;

/// How a needle is matched against a field value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// Only match whole whitespace-separated words (`grep -w`)
    pub word: bool,
    /// Select non-matching records (`grep -v`)
    pub invert: bool,
    /// Compare case-sensitively
    pub case_sensitive: bool,
}

impl MatchOptions {
    pub fn matches(&self, needle: &str, haystack: &str) -> bool {
        let found = if self.case_sensitive {
            self.contains(needle, haystack)
        } else {
            self.contains(&needle.to_lowercase(), &haystack.to_lowercase())
        };
        found != self.invert
    }

    fn contains(&self, needle: &str, haystack: &str) -> bool {
        if self.word {
            haystack.split_whitespace().any(|word| word == needle)
        } else {
            haystack.contains(needle)
        }
    }
}

/// For each needle, print every record whose `field` matches, by key order.
pub fn run<W: Write>(
    store: &Store,
    field: &str,
    needles: &[String],
    options: MatchOptions,
    out: &mut Output<W>,
) -> Result<(), CliError> {
    if !store.schema().contains_field(field) {
        return Err(StoreError::FieldNotInSchema(field.to_string()).into());
    }

    let mut keys: Vec<&str> = store.keys().collect();
    keys.sort_unstable();

    for needle in needles {
        out.banner(&format!("{}={}", field, needle), FIELD_BANNER_WIDTH)?;
        for key in &keys {
            let haystack = store.get_field(key, field)?.to_string();
            if options.matches(needle, &haystack) {
                out.por(store, key, None)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use neobase::config::{NeoBaseConfig, ReferenceDate};

    #[test]
    fn test_substring_match_ignores_case() {
        let options = MatchOptions::default();
        assert!(options.matches("orly", "Paris Orly Airport"));
        assert!(options.matches("par", "Paris Orly Airport"));
        assert!(!options.matches("nice", "Paris Orly Airport"));
    }

    #[test]
    fn test_word_match() {
        let options = MatchOptions {
            word: true,
            ..Default::default()
        };
        assert!(options.matches("orly", "Paris Orly Airport"));
        assert!(!options.matches("par", "Paris Orly Airport"));
    }

    #[test]
    fn test_case_sensitive_and_invert() {
        let options = MatchOptions {
            case_sensitive: true,
            ..Default::default()
        };
        assert!(!options.matches("orly", "Paris Orly Airport"));

        let options = MatchOptions {
            invert: true,
            ..Default::default()
        };
        assert!(!options.matches("orly", "Paris Orly Airport"));
        assert!(options.matches("nice", "Paris Orly Airport"));
    }

    #[test]
    fn test_run_lists_matching_keys() {
        let config = NeoBaseConfig::new().with_date(ReferenceDate::parse("2026-10-19").unwrap());
        let store = neobase::open(&config).unwrap();
        let show = vec!["iata_code".to_string()];

        let mut buffer = Vec::new();
        let mut out = Output::new(&mut buffer, &show);
        let options = MatchOptions {
            word: true,
            ..Default::default()
        };
        run(&store, "city_code_list", &["par".to_string()], options, &mut out).unwrap();
        out.finish().unwrap();

        assert_eq!(String::from_utf8(buffer).unwrap(), "CDG\nORY\nPAR\nXPG\n");
    }

    #[test]
    fn test_run_unknown_field() {
        let store = Store::default();
        let mut out = Output::new(Vec::new(), &[]);
        let result = run(&store, "runway", &[], MatchOptions::default(), &mut out);
        assert!(matches!(
            result,
            Err(CliError::Query(StoreError::FieldNotInSchema(_)))
        ));
    }
}
