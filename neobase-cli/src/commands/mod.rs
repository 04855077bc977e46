//! CLI query modes.
//!
//! # Command Modules
//!
//! - [`lookup`] - Full records for known keys (default mode)
//! - [`field`] - Grep-like match of the keys against one field
//! - [`near`] - Radius and k-nearest searches around each key
//! - [`output`] - Text and CSV result formatting

pub mod field;
pub mod lookup;
pub mod near;
pub mod output;

use std::io::{self, BufRead};

/// Expand the key arguments; a lone `-` reads one key per line from stdin.
pub fn read_keys(args: &[String]) -> io::Result<Vec<String>> {
    match args {
        [dash] if dash == "-" => read_key_lines(io::stdin().lock()),
        _ => Ok(args.to_vec()),
    }
}

fn read_key_lines<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut keys = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let key = line.trim_end();
        if !key.is_empty() {
            keys.push(key.to_string());
        }
    }
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_from_args() {
        let args = vec!["ORY".to_string(), "CDG".to_string()];
        assert_eq!(read_keys(&args).unwrap(), args);
    }

    #[test]
    fn test_key_lines() {
        let input = "ORY\r\nCDG  \n\nNCE";
        let keys = read_key_lines(input.as_bytes()).unwrap();
        assert_eq!(keys, vec!["ORY", "CDG", "NCE"]);
    }
}
