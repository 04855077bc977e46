//! Default mode: print the full record of each key.

use std::io::Write;

use neobase::store::Store;

use super::output::Output;
use crate::error::CliError;

/// Report unknown keys first, then print every known record in order.
pub fn run<W: Write>(store: &Store, keys: &[String], out: &mut Output<W>) -> Result<(), CliError> {
    let (known, unknown): (Vec<&String>, Vec<&String>) =
        keys.iter().partition(|key| store.contains(key));

    for key in unknown {
        out.not_found(key)?;
    }
    for key in known {
        out.record(store, key)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use neobase::config::{NeoBaseConfig, ReferenceDate};

    #[test]
    fn test_unknown_keys_come_first() {
        let config = NeoBaseConfig::new().with_date(ReferenceDate::parse("2026-10-19").unwrap());
        let store = neobase::open(&config).unwrap();
        let keys = vec!["ORY".to_string(), "XXX".to_string()];

        let mut buffer = Vec::new();
        let mut out = Output::new(&mut buffer, &[]);
        run(&store, &keys, &mut out).unwrap();
        out.finish().unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("'XXX' not found in data.\n"));
        assert!(text.contains("**  ORY  **"));
        assert!(text.contains("name                Paris Orly Airport\n"));
    }
}
