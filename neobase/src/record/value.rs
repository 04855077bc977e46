//! Typed field values decoded from raw POR columns.

use std::fmt;

/// A decoded field value.
///
/// Raw columns are text; decoders turn some of them into optional floats
/// (page rank) or lists (city codes, location types).
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Raw text, possibly empty.
    Text(String),
    /// A number that may be absent (empty column or not numeric).
    Float(Option<f64>),
    /// A list of strings, compared element by element.
    List(Vec<String>),
}

impl FieldValue {
    /// Build a list value from anything yielding strings.
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldValue::List(items.into_iter().map(Into::into).collect())
    }

    /// Returns the text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number, if this is a present float value.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => *v,
            _ => None,
        }
    }

    /// Returns the items, if this is a list value.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns true for empty text, an absent float or an empty list.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Float(v) => v.is_none(),
            FieldValue::List(items) => items.is_empty(),
        }
    }

    /// Interpret the value as a coordinate in decimal degrees.
    ///
    /// Text is parsed as a float; lists and unparseable text yield `None`.
    pub fn to_coordinate(&self) -> Option<f64> {
        match self {
            FieldValue::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            FieldValue::Float(v) => v.filter(|v| v.is_finite()),
            FieldValue::List(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Float(Some(v)) => write!(f, "{}", v),
            FieldValue::Float(None) => Ok(()),
            FieldValue::List(items) => f.write_str(&items.join(",")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(Some(v))
    }
}

impl From<Option<f64>> for FieldValue {
    fn from(v: Option<f64>) -> Self {
        FieldValue::Float(v)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(items: Vec<&str>) -> Self {
        FieldValue::list(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_from_text() {
        assert_eq!(FieldValue::from("48.72528").to_coordinate(), Some(48.72528));
        assert_eq!(FieldValue::from(" 2.55 ").to_coordinate(), Some(2.55));
        assert_eq!(FieldValue::from("").to_coordinate(), None);
        assert_eq!(FieldValue::from("north").to_coordinate(), None);
        assert_eq!(FieldValue::from("NaN").to_coordinate(), None);
    }

    #[test]
    fn test_coordinate_from_other_variants() {
        assert_eq!(FieldValue::Float(Some(1.5)).to_coordinate(), Some(1.5));
        assert_eq!(FieldValue::Float(None).to_coordinate(), None);
        assert_eq!(FieldValue::list(["1.0"]).to_coordinate(), None);
    }

    #[test]
    fn test_list_equality_is_exact() {
        let paris = FieldValue::list(["PAR"]);
        assert_eq!(paris, FieldValue::from(vec!["PAR"]));
        assert_ne!(paris, FieldValue::list(["PAR", "XPG"]));
        assert_ne!(paris, FieldValue::from("PAR"));
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldValue::list(["A", "C"]).to_string(), "A,C");
        assert_eq!(FieldValue::Float(None).to_string(), "");
        assert_eq!(FieldValue::Float(Some(0.25)).to_string(), "0.25");
        assert_eq!(FieldValue::from("Nice").to_string(), "Nice");
    }

    #[test]
    fn test_is_empty() {
        assert!(FieldValue::from("").is_empty());
        assert!(FieldValue::Float(None).is_empty());
        assert!(FieldValue::List(Vec::new()).is_empty());
        assert!(!FieldValue::list([""]).is_empty());
    }
}
