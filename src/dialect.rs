//! Dialect configuration controlling how input is tokenized

use crate::error::{CsvTableError, Result};

/// Options for one parse call
///
/// Defaults: delimiter `,`, quote `"`, newlines allowed inside quotes,
/// empty lines skipped, no whitespace trimming.
///
/// # Examples
///
/// ```
/// use csvtable::Dialect;
///
/// let dialect = Dialect::default().delimiter(';').trim_spaces(true);
/// assert_eq!(dialect.delimiter, ';');
/// assert_eq!(dialect.quote_char, '"');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Dialect {
    /// Field separator
    pub delimiter: char,
    /// Character opening and closing a quoted field
    pub quote_char: char,
    /// Keep LF / CRLF inside quoted fields instead of ending the row
    pub allow_newlines_in_quotes: bool,
    /// Drop rows that come from zero-length lines
    pub skip_empty_lines: bool,
    /// Strip surrounding whitespace from unquoted fields
    pub trim_spaces: bool,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote_char: '"',
            allow_newlines_in_quotes: true,
            skip_empty_lines: true,
            trim_spaces: false,
        }
    }
}

impl Dialect {
    /// Set the field delimiter (builder pattern)
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the quote character (builder pattern)
    pub fn quote_char(mut self, quote: char) -> Self {
        self.quote_char = quote;
        self
    }

    /// Allow or forbid line terminators inside quoted fields (builder pattern)
    ///
    /// When forbidden, a terminator inside a quoted field closes both the
    /// field and the row.
    pub fn allow_newlines_in_quotes(mut self, allow: bool) -> Self {
        self.allow_newlines_in_quotes = allow;
        self
    }

    /// Skip zero-length lines (builder pattern)
    pub fn skip_empty_lines(mut self, skip: bool) -> Self {
        self.skip_empty_lines = skip;
        self
    }

    /// Trim whitespace around unquoted fields (builder pattern)
    pub fn trim_spaces(mut self, trim: bool) -> Self {
        self.trim_spaces = trim;
        self
    }

    /// Whether both special characters can be matched on byte sources
    ///
    /// Byte sources compare one byte at a time, so only ASCII delimiters and
    /// quote characters are recognized there.
    pub fn is_byte_compatible(&self) -> bool {
        self.delimiter.is_ascii() && self.quote_char.is_ascii()
    }

    /// Reject option sets the tokenizer cannot honor
    ///
    /// Parsing never calls this; it is offered to callers that accept
    /// dialects from user input.
    pub fn validate(&self) -> Result<()> {
        if self.delimiter == self.quote_char {
            return Err(CsvTableError::InvalidDialect(format!(
                "delimiter and quote character are both {:?}",
                self.delimiter
            )));
        }
        for (name, ch) in [("delimiter", self.delimiter), ("quote character", self.quote_char)] {
            if ch == '\n' || ch == '\r' {
                return Err(CsvTableError::InvalidDialect(format!(
                    "{} cannot be a line terminator",
                    name
                )));
            }
        }
        Ok(())
    }
}
