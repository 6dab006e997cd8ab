//! CSV tokenizer: a five-state machine over a [`Source`]
//!
//! The tokenizer is total. Malformed input is resolved permissively:
//! an unterminated quoted field is flushed at end of input, and content
//! following a closing quote is kept as part of the field.

use super::source::{BufferSource, ByteSource, Source, TextSource, Unit};
use crate::dialect::Dialect;
use bytes::BytesMut;

/// One parsed row
pub type Row = Vec<String>;

/// All rows of one input, in input order
pub type RowSequence = Vec<Row>;

/// Tokenizer state between two units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Nothing consumed for the current field yet
    FieldStart,
    InUnquotedField,
    InQuotedField,
    /// A quote was read inside a quoted field; it either closes the field
    /// or starts a doubled-quote escape
    QuoteSeenInQuotedField,
    /// Content followed a closing quote before the next separator
    AfterClosedQuote,
}

/// What a unit means under the current dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    Quote(Unit),
    Delimiter(Unit),
    /// LF, or CR immediately followed by LF
    Terminator { crlf: bool },
    /// Anything else, including a lone CR
    Other(Unit),
    End,
}

/// Side effect of a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Nothing,
    /// Open a new quoted field
    StartQuoted,
    Append(Unit),
    /// Keep the exact terminator inside a quoted field
    AppendTerminator { crlf: bool },
    EmitField,
    /// Emit the current field, then the current row
    EmitRow,
    /// Emit field and row, then stop
    Finish,
    /// Stop, emitting field and row only if anything is pending
    FinishIfPending,
}

/// Pure transition function of the tokenizer
///
/// Only `allow_newlines_in_quotes` affects transitions; trimming and
/// empty-line skipping are applied when fields and rows are emitted.
pub fn transition(state: State, class: Class, dialect: &Dialect) -> (State, Action) {
    use Action::*;
    use State::*;

    match (state, class) {
        (FieldStart, Class::Quote(_)) => (InQuotedField, StartQuoted),
        (FieldStart, Class::Delimiter(_)) => (FieldStart, EmitField),
        (FieldStart, Class::Terminator { .. }) => (FieldStart, EmitRow),
        (FieldStart, Class::End) => (FieldStart, FinishIfPending),
        (FieldStart, Class::Other(u)) => (InUnquotedField, Append(u)),

        (InUnquotedField, Class::Delimiter(_)) => (FieldStart, EmitField),
        (InUnquotedField, Class::Terminator { .. }) => (FieldStart, EmitRow),
        (InUnquotedField, Class::End) => (FieldStart, Finish),
        (InUnquotedField, Class::Quote(u) | Class::Other(u)) => (InUnquotedField, Append(u)),

        (InQuotedField, Class::Quote(_)) => (QuoteSeenInQuotedField, Nothing),
        (InQuotedField, Class::Terminator { crlf }) => {
            if dialect.allow_newlines_in_quotes {
                (InQuotedField, AppendTerminator { crlf })
            } else {
                (FieldStart, EmitRow)
            }
        }
        (InQuotedField, Class::End) => (FieldStart, Finish),
        (InQuotedField, Class::Delimiter(u) | Class::Other(u)) => (InQuotedField, Append(u)),

        (QuoteSeenInQuotedField, Class::Quote(u)) => (InQuotedField, Append(u)),
        (QuoteSeenInQuotedField, Class::Delimiter(_)) => (FieldStart, EmitField),
        (QuoteSeenInQuotedField, Class::Terminator { .. }) => (FieldStart, EmitRow),
        (QuoteSeenInQuotedField, Class::End) => (FieldStart, Finish),
        (QuoteSeenInQuotedField, Class::Other(u)) => (AfterClosedQuote, Append(u)),

        (AfterClosedQuote, Class::Delimiter(_)) => (FieldStart, EmitField),
        (AfterClosedQuote, Class::Terminator { .. }) => (FieldStart, EmitRow),
        (AfterClosedQuote, Class::End) => (FieldStart, Finish),
        (AfterClosedQuote, Class::Quote(u) | Class::Other(u)) => (AfterClosedQuote, Append(u)),
    }
}

/// Row iterator over an in-memory source
///
/// Yields rows lazily; the eager entry points ([`parse`], [`parse_str`], ...)
/// simply collect it. Single pass, not restartable.
///
/// # Examples
///
/// ```
/// use csvtable::csv::{TextSource, Tokenizer};
/// use csvtable::Dialect;
///
/// let mut rows = Tokenizer::new(TextSource::new("a,b\n1,2"), Dialect::default());
/// assert_eq!(rows.next(), Some(vec!["a".to_string(), "b".to_string()]));
/// assert_eq!(rows.next(), Some(vec!["1".to_string(), "2".to_string()]));
/// assert_eq!(rows.next(), None);
/// ```
pub struct Tokenizer<S> {
    source: S,
    dialect: Dialect,
    state: State,
    field: Vec<u8>,
    field_quoted: bool,
    row: Row,
    // any unit other than a bare terminator consumed for this row
    line_has_content: bool,
    done: bool,
}

impl<S: Source> Tokenizer<S> {
    pub fn new(source: S, dialect: Dialect) -> Self {
        Self {
            source,
            dialect,
            state: State::FieldStart,
            field: Vec::with_capacity(64),
            field_quoted: false,
            row: Vec::new(),
            line_has_content: false,
            done: false,
        }
    }

    /// Current state, mostly useful for tests and debugging
    pub fn state(&self) -> State {
        self.state
    }

    fn next_class(&mut self) -> Class {
        let Some(unit) = self.source.advance_unit() else {
            return Class::End;
        };

        if unit.is(self.dialect.quote_char) {
            Class::Quote(unit)
        } else if unit.is(self.dialect.delimiter) {
            Class::Delimiter(unit)
        } else if unit.is('\n') {
            Class::Terminator { crlf: false }
        } else if unit.is('\r') && self.source.peek_unit().is_some_and(|u| u.is('\n')) {
            self.source.advance_unit();
            Class::Terminator { crlf: true }
        } else {
            Class::Other(unit)
        }
    }

    fn take_field(&mut self) -> String {
        let bytes = std::mem::take(&mut self.field);
        let value = match String::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        };
        let quoted = std::mem::replace(&mut self.field_quoted, false);

        if self.dialect.trim_spaces && !quoted {
            value.trim().to_string()
        } else {
            value
        }
    }

    fn push_field(&mut self) {
        let value = self.take_field();
        self.row.push(value);
    }

    fn take_row(&mut self) -> Option<Row> {
        self.push_field();
        let row = std::mem::take(&mut self.row);
        let had_content = std::mem::replace(&mut self.line_has_content, false);

        if self.dialect.skip_empty_lines && !had_content {
            None
        } else {
            Some(row)
        }
    }

    fn apply(&mut self, action: Action) -> Option<Row> {
        match action {
            Action::Nothing => None,
            Action::StartQuoted => {
                self.field.clear();
                self.field_quoted = true;
                None
            }
            Action::Append(unit) => {
                unit.push_to(&mut self.field);
                None
            }
            Action::AppendTerminator { crlf } => {
                if crlf {
                    self.field.extend_from_slice(b"\r\n");
                } else {
                    self.field.push(b'\n');
                }
                None
            }
            Action::EmitField => {
                self.push_field();
                None
            }
            Action::EmitRow => self.take_row(),
            Action::Finish => {
                self.done = true;
                self.push_field();
                Some(std::mem::take(&mut self.row))
            }
            Action::FinishIfPending => {
                self.done = true;
                if self.row.is_empty() && self.field.is_empty() {
                    None
                } else {
                    self.push_field();
                    Some(std::mem::take(&mut self.row))
                }
            }
        }
    }
}

impl<S: Source> Iterator for Tokenizer<S> {
    type Item = Row;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let class = self.next_class();
            match class {
                Class::Terminator { .. } | Class::End => {}
                _ => self.line_has_content = true,
            }

            let (state, action) = transition(self.state, class, &self.dialect);
            self.state = state;
            if let Some(row) = self.apply(action) {
                return Some(row);
            }
        }
        None
    }
}

/// Parse any [`Source`] into a fully materialized row sequence
pub fn parse<S: Source>(source: S, dialect: &Dialect) -> RowSequence {
    let rows: RowSequence = Tokenizer::new(source, *dialect).collect();
    tracing::debug!(
        rows = rows.len(),
        delimiter = ?dialect.delimiter,
        quote = ?dialect.quote_char,
        "parsed delimited input"
    );
    rows
}

/// Parse Unicode text, comparing code points
pub fn parse_str(text: &str, dialect: &Dialect) -> RowSequence {
    parse(TextSource::new(text), dialect)
}

/// Parse the contents of a growable byte buffer, comparing bytes
pub fn parse_buffer(buffer: &BytesMut, dialect: &Dialect) -> RowSequence {
    parse(BufferSource::new(buffer), dialect)
}

/// Parse a raw byte sequence, comparing bytes
pub fn parse_bytes(bytes: &[u8], dialect: &Dialect) -> RowSequence {
    parse(ByteSource::new(bytes), dialect)
}
