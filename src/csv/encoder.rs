//! Quoting-aware row encoding, the inverse of the tokenizer

use crate::dialect::Dialect;

/// Encodes rows so that parsing them back with the same dialect yields
/// the original fields
pub struct CsvEncoder {
    delimiter: char,
    quote_char: char,
}

impl CsvEncoder {
    pub fn new(delimiter: char, quote_char: char) -> Self {
        Self {
            delimiter,
            quote_char,
        }
    }

    pub fn from_dialect(dialect: &Dialect) -> Self {
        Self::new(dialect.delimiter, dialect.quote_char)
    }

    /// Append one encoded row (without terminator) to `out`
    pub fn encode_row<S: AsRef<str>>(&self, fields: &[S], out: &mut String) {
        // an empty line would be skipped or read back as one empty field, so
        // rows with no fields or one empty field are both written as `""`
        let blank = match fields {
            [] => true,
            [only] => only.as_ref().is_empty(),
            _ => false,
        };
        if blank {
            out.push(self.quote_char);
            out.push(self.quote_char);
            return;
        }

        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                out.push(self.delimiter);
            }
            self.encode_field(field.as_ref(), out);
        }
    }

    fn encode_field(&self, field: &str, out: &mut String) {
        if !self.needs_quoting(field) {
            out.push_str(field);
            return;
        }

        out.push(self.quote_char);
        for ch in field.chars() {
            if ch == self.quote_char {
                out.push(self.quote_char);
            }
            out.push(ch);
        }
        out.push(self.quote_char);
    }

    // surrounding whitespace is quoted to survive trim_spaces
    fn needs_quoting(&self, field: &str) -> bool {
        field.chars().any(|c| {
            c == self.delimiter || c == self.quote_char || c == '\n' || c == '\r'
        }) || field.starts_with(char::is_whitespace)
            || field.ends_with(char::is_whitespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(fields: &[&str]) -> String {
        let mut out = String::new();
        CsvEncoder::new(',', '"').encode_row(fields, &mut out);
        out
    }

    #[test]
    fn test_plain_fields() {
        assert_eq!(encode(&["a", "b", "c"]), "a,b,c");
        assert_eq!(encode(&["a", "", "c"]), "a,,c");
    }

    #[test]
    fn test_quoted_fields() {
        assert_eq!(encode(&["a,b", "c"]), r#""a,b",c"#);
        assert_eq!(encode(&["Line 1\r\nLine 2"]), "\"Line 1\r\nLine 2\"");
    }

    #[test]
    fn test_escaped_quotes() {
        assert_eq!(encode(&[r#"Say "Hello""#, "world"]), r#""Say ""Hello""",world"#);
    }

    #[test]
    fn test_surrounding_whitespace_is_quoted() {
        assert_eq!(encode(&[" padded", "x"]), "\" padded\",x");
    }

    #[test]
    fn test_single_empty_field() {
        assert_eq!(encode(&[""]), "\"\"");
        assert_eq!(encode(&["", ""]), ",");
    }

    #[test]
    fn test_zero_field_row() {
        assert_eq!(encode(&[]), "\"\"");
    }

    #[test]
    fn test_custom_dialect() {
        let mut out = String::new();
        CsvEncoder::from_dialect(&Dialect::default().delimiter(';').quote_char('\''))
            .encode_row(&["a", "b;c", "it's"], &mut out);
        assert_eq!(out, "a;'b;c';'it''s'");
    }
}
