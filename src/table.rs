//! Header/rows tables built from parsed row sequences

use crate::csv::{parse_buffer, parse_bytes, parse_str, CsvEncoder, Row, RowSequence};
use crate::dialect::Dialect;
use bytes::BytesMut;
use std::borrow::Cow;
use std::fmt;
use unicode_width::UnicodeWidthStr;

/// How the first parsed row is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TableOptions {
    /// First row holds the column names
    pub has_header: bool,
    /// Without a header row, name columns `column1..columnN` instead of
    /// leaving them blank
    pub generate_headers: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            generate_headers: true,
        }
    }
}

impl TableOptions {
    /// Set whether the first row is a header (builder pattern)
    pub fn has_header(mut self, has: bool) -> Self {
        self.has_header = has;
        self
    }

    /// Set whether missing headers are synthesized (builder pattern)
    pub fn generate_headers(mut self, generate: bool) -> Self {
        self.generate_headers = generate;
        self
    }
}

/// Parsed table of string values
///
/// Rows may be shorter or longer than the header; nothing is padded or
/// truncated.
///
/// # Examples
///
/// ```
/// use csvtable::{Dialect, Table, TableOptions};
///
/// let table = Table::parse_str(
///     "a,b,c\r\n1,\"\",\"\"\r\n2,3,4",
///     &Dialect::default(),
///     &TableOptions::default(),
/// );
/// assert_eq!(table.headers(), &["a", "b", "c"]);
/// assert_eq!(table.rows()[1], vec!["2", "3", "4"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Table {
    headers: Vec<String>,
    rows: RowSequence,
}

impl Table {
    /// Build a table from raw rows
    pub fn from_rows(mut rows: RowSequence, options: &TableOptions) -> Self {
        if rows.is_empty() {
            return Self::default();
        }

        let headers = if options.has_header {
            rows.remove(0)
        } else {
            let width = rows[0].len();
            if options.generate_headers {
                (1..=width).map(|i| format!("column{}", i)).collect()
            } else {
                vec![String::new(); width]
            }
        };

        Self { headers, rows }
    }

    /// Parse text and build a table
    pub fn parse_str(text: &str, dialect: &Dialect, options: &TableOptions) -> Self {
        Self::from_rows(parse_str(text, dialect), options)
    }

    /// Parse a byte buffer and build a table
    pub fn parse_buffer(buffer: &BytesMut, dialect: &Dialect, options: &TableOptions) -> Self {
        Self::from_rows(parse_buffer(buffer, dialect), options)
    }

    /// Parse a byte sequence and build a table
    pub fn parse_bytes(bytes: &[u8], dialect: &Dialect, options: &TableOptions) -> Self {
        Self::from_rows(parse_bytes(bytes, dialect), options)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }

    /// Number of columns needed to show every header and field
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0)
    }

    /// Split into headers and rows
    pub fn into_parts(self) -> (Vec<String>, RowSequence) {
        (self.headers, self.rows)
    }

    /// Join headers and rows with `delimiter`, one line each
    ///
    /// Values are written as-is: nothing is quoted or escaped, so values
    /// containing the delimiter, a quote or a line break do not survive a
    /// parse of the output. Use [`Table::to_csv_string`] for that.
    pub fn to_delimited_string(&self, delimiter: char) -> String {
        let sep = delimiter.to_string();
        let mut out = String::new();
        for line in std::iter::once(&self.headers).chain(self.rows.iter()) {
            out.push_str(&line.join(&sep));
            out.push('\n');
        }
        out
    }

    /// Encode headers and rows with quoting, so that parsing the output
    /// with the same dialect reproduces the table
    ///
    /// The parser never yields a row without fields, so a zero-field row
    /// (or empty headers) is written as one empty quoted field and reads
    /// back as `[""]`. Row positions are preserved; every other table
    /// round-trips exactly.
    pub fn to_csv_string(&self, dialect: &Dialect) -> String {
        let encoder = CsvEncoder::from_dialect(dialect);
        let mut out = String::new();
        for line in std::iter::once(&self.headers).chain(self.rows.iter()) {
            encoder.encode_row(line, &mut out);
            out.push('\n');
        }
        out
    }
}

// line breaks would tear the grid apart
fn display_cell(row: &[String], index: usize) -> Cow<'_, str> {
    match row.get(index) {
        Some(value) if value.contains(['\r', '\n']) => {
            Cow::Owned(value.replace('\r', "\\r").replace('\n', "\\n"))
        }
        Some(value) => Cow::Borrowed(value.as_str()),
        None => Cow::Borrowed(""),
    }
}

fn write_grid_row(f: &mut fmt::Formatter<'_>, widths: &[usize], row: &[String]) -> fmt::Result {
    write!(f, "|")?;
    for (i, width) in widths.iter().enumerate() {
        let value = display_cell(row, i);
        let pad = width - value.width();
        write!(f, " {}{} |", value, " ".repeat(pad))?;
    }
    writeln!(f)
}

impl fmt::Display for Table {
    /// Bordered fixed-width grid; absent trailing fields render empty
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = self.column_count();
        if columns == 0 {
            return Ok(());
        }

        let mut widths = vec![0usize; columns];
        for row in std::iter::once(&self.headers).chain(self.rows.iter()) {
            for (i, width) in widths.iter_mut().enumerate() {
                *width = (*width).max(display_cell(row, i).width());
            }
        }

        let mut border = String::from("+");
        for width in &widths {
            border.push_str(&"-".repeat(width + 2));
            border.push('+');
        }

        writeln!(f, "{}", border)?;
        write_grid_row(f, &widths, &self.headers)?;
        writeln!(f, "{}", border)?;
        for row in &self.rows {
            write_grid_row(f, &widths, row)?;
        }
        writeln!(f, "{}", border)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Row {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_header_row() {
        let t = Table::from_rows(
            vec![strings(&["a", "b"]), strings(&["1", "2"])],
            &TableOptions::default(),
        );
        assert_eq!(t.headers(), &["a", "b"]);
        assert_eq!(t.rows(), &[strings(&["1", "2"])]);
    }

    #[test]
    fn test_generated_headers() {
        let t = Table::from_rows(
            vec![strings(&["x", "y", "z"])],
            &TableOptions::default().has_header(false),
        );
        assert_eq!(t.headers(), &["column1", "column2", "column3"]);
        assert_eq!(t.rows().len(), 1);
    }

    #[test]
    fn test_blank_headers() {
        let t = Table::from_rows(
            vec![strings(&["x", "y"])],
            &TableOptions::default().has_header(false).generate_headers(false),
        );
        assert_eq!(t.headers(), &["", ""]);
    }

    #[test]
    fn test_empty_first_row_without_header() {
        let t = Table::from_rows(
            vec![vec![], strings(&["Some", "Data", "Here"])],
            &TableOptions::default().has_header(false).generate_headers(false),
        );
        assert!(t.headers().is_empty());
        assert_eq!(t.rows().len(), 2);
        assert!(t.rows()[0].is_empty());
        assert_eq!(t.rows()[1], strings(&["Some", "Data", "Here"]));
    }

    #[test]
    fn test_empty_rows_ignore_flags() {
        for options in [
            TableOptions::default(),
            TableOptions::default().has_header(false),
            TableOptions::default().has_header(false).generate_headers(false),
        ] {
            let t = Table::from_rows(Vec::new(), &options);
            assert!(t.is_empty());
        }
    }

    #[test]
    fn test_end_to_end() {
        let t = Table::parse_str(
            "a,b,c\r\n1,\"\",\"\"\r\n2,3,4",
            &Dialect::default(),
            &TableOptions::default(),
        );
        assert_eq!(t.headers(), &["a", "b", "c"]);
        assert_eq!(t.rows(), &[strings(&["1", "", ""]), strings(&["2", "3", "4"])]);
    }

    #[test]
    fn test_to_delimited_string_is_unescaped() {
        let t = Table::from_rows(
            vec![strings(&["h1", "h2"]), strings(&["a;b", "\"q\""])],
            &TableOptions::default(),
        );
        assert_eq!(t.to_delimited_string(';'), "h1;h2\na;b;\"q\"\n");
    }

    #[test]
    fn test_to_csv_string_round_trips() {
        let dialect = Dialect::default();
        let t = Table::from_rows(
            vec![
                strings(&["name", "note"]),
                strings(&["Doe, J", "said \"hi\"\nthen left"]),
                strings(&[""]),
            ],
            &TableOptions::default(),
        );
        let text = t.to_csv_string(&dialect);
        assert_eq!(Table::parse_str(&text, &dialect, &TableOptions::default()), t);
    }

    #[test]
    fn test_to_csv_string_keeps_zero_field_rows_in_place() {
        let dialect = Dialect::default();
        let options = TableOptions::default().has_header(false).generate_headers(false);
        let t = Table::from_rows(vec![vec![], strings(&["Some", "Data", "Here"])], &options);
        assert!(t.headers().is_empty());

        let text = t.to_csv_string(&dialect);
        assert_eq!(text, "\"\"\n\"\"\nSome,Data,Here\n");

        let back = Table::parse_str(&text, &dialect, &TableOptions::default());
        assert_eq!(back.headers(), &[""]);
        assert_eq!(back.rows(), &[strings(&[""]), strings(&["Some", "Data", "Here"])]);
    }

    #[test]
    fn test_display_grid() {
        let t = Table::from_rows(
            vec![strings(&["id", "name"]), strings(&["1", "Alice"]), strings(&["22"])],
            &TableOptions::default(),
        );
        let expected = "\
+----+-------+
| id | name  |
+----+-------+
| 1  | Alice |
| 22 |       |
+----+-------+
";
        assert_eq!(t.to_string(), expected);
    }

    #[test]
    fn test_display_wide_chars() {
        let t = Table::from_rows(vec![strings(&["名前"]), strings(&["ab"])], &TableOptions::default());
        let expected = "\
+------+
| 名前 |
+------+
| ab   |
+------+
";
        assert_eq!(t.to_string(), expected);
    }

    #[test]
    fn test_display_escapes_line_breaks() {
        let t = Table::from_rows(vec![strings(&["h"]), strings(&["a\r\nb"])], &TableOptions::default());
        assert!(t.to_string().contains("| a\\r\\nb |"));
    }

    #[test]
    fn test_display_empty() {
        assert_eq!(Table::default().to_string(), "");
    }
}
