//! Column decoders.

use crate::record::FieldValue;

/// Turns a raw column into a [`FieldValue`].
#[derive(Debug, Clone, Copy, Default)]
pub enum Decoder {
    /// Keep the raw text.
    #[default]
    Text,
    /// Empty text is absent, anything else is parsed as a float.
    ///
    /// Text that does not parse is treated as absent too.
    OptionalFloat,
    /// Split on a separator (`"PAR,XPG"` → `["PAR", "XPG"]`).
    Split(char),
    /// One list item per character (`"CA"` → `["C", "A"]`).
    Chars,
    /// A caller-supplied decoding function.
    Custom(fn(&str) -> FieldValue),
}

impl Decoder {
    /// Decode a raw column.
    pub fn decode(&self, raw: &str) -> FieldValue {
        match self {
            Decoder::Text => FieldValue::Text(raw.to_string()),
            Decoder::OptionalFloat => {
                if raw.is_empty() {
                    FieldValue::Float(None)
                } else {
                    FieldValue::Float(raw.trim().parse().ok())
                }
            }
            Decoder::Split(separator) => FieldValue::list(raw.split(*separator)),
            Decoder::Chars => FieldValue::List(raw.chars().map(String::from).collect()),
            Decoder::Custom(decode) => decode(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_float() {
        assert_eq!(Decoder::OptionalFloat.decode(""), FieldValue::Float(None));
        assert_eq!(
            Decoder::OptionalFloat.decode("0.4389"),
            FieldValue::Float(Some(0.4389))
        );
        assert_eq!(Decoder::OptionalFloat.decode("n/a"), FieldValue::Float(None));
    }

    #[test]
    fn test_split_keeps_empty_items() {
        assert_eq!(
            Decoder::Split(',').decode("PAR,XPG"),
            FieldValue::list(["PAR", "XPG"])
        );
        assert_eq!(Decoder::Split('=').decode(""), FieldValue::list([""]));
    }

    #[test]
    fn test_chars() {
        assert_eq!(Decoder::Chars.decode("CA"), FieldValue::list(["C", "A"]));
        assert_eq!(Decoder::Chars.decode(""), FieldValue::List(Vec::new()));
    }

    #[test]
    fn test_custom() {
        fn shout(raw: &str) -> FieldValue {
            FieldValue::Text(raw.to_uppercase())
        }
        assert_eq!(Decoder::Custom(shout).decode("nice"), FieldValue::from("NICE"));
    }
}
