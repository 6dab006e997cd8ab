//! Loading CSV files (plain or compressed) into memory for parsing

use crate::csv::{parse_bytes, RowSequence};
use crate::dialect::Dialect;
use crate::error::{CsvTableError, Result};
use crate::table::{Table, TableOptions};
use s_zip::StreamingZipReader;
use std::path::Path;

/// Whole-file CSV reader
///
/// The file is read completely before tokenizing; the parse itself runs
/// over the raw bytes with byte-wise comparison.
///
/// # Examples
///
/// ```no_run
/// use csvtable::csv_reader::CsvReader;
///
/// let table = CsvReader::open("data.csv")
///     .unwrap()
///     .delimiter(';')
///     .has_header(true)
///     .into_table();
///
/// println!("{}", table);
/// ```
#[derive(Debug, Clone)]
pub struct CsvReader {
    data: Vec<u8>,
    dialect: Dialect,
    options: TableOptions,
}

impl CsvReader {
    /// Open a CSV file, decompressing it when the extension says so
    ///
    /// # File Extensions
    /// - `.csv.zst`, `.csv.zip`, `.csv.gz` → read as a ZIP archive (also for
    ///   the `.csv.gz` name; a bare gzip stream is not supported); the first
    ///   `.csv` entry (or the first entry) is used
    /// - anything else → read directly
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let path_str = path_ref.to_str().unwrap_or("");

        let data = if path_str.ends_with(".csv.zst")
            || path_str.ends_with(".csv.zip")
            || path_str.ends_with(".csv.gz")
        {
            read_archive(path_ref)?
        } else {
            std::fs::read(path_ref)?
        };

        tracing::debug!(path = %path_ref.display(), bytes = data.len(), "loaded CSV input");
        Ok(Self::from_bytes(data))
    }

    /// Wrap bytes that are already in memory
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self {
            data,
            dialect: Dialect::default(),
            options: TableOptions::default(),
        }
    }

    /// Replace the whole dialect (builder pattern)
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Set custom delimiter (builder pattern)
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.dialect = self.dialect.delimiter(delimiter);
        self
    }

    /// Set custom quote character (builder pattern)
    pub fn quote_char(mut self, quote: char) -> Self {
        self.dialect = self.dialect.quote_char(quote);
        self
    }

    pub fn trim_spaces(mut self, trim: bool) -> Self {
        self.dialect = self.dialect.trim_spaces(trim);
        self
    }

    pub fn skip_empty_lines(mut self, skip: bool) -> Self {
        self.dialect = self.dialect.skip_empty_lines(skip);
        self
    }

    pub fn allow_newlines_in_quotes(mut self, allow: bool) -> Self {
        self.dialect = self.dialect.allow_newlines_in_quotes(allow);
        self
    }

    /// Indicate that the first row contains headers (builder pattern)
    pub fn has_header(mut self, has: bool) -> Self {
        self.options.has_header = has;
        self
    }

    /// Synthesize `column1..columnN` headers when there is no header row
    pub fn generate_headers(mut self, generate: bool) -> Self {
        self.options.generate_headers = generate;
        self
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Raw input size in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// All rows, header row included
    pub fn rows(&self) -> RowSequence {
        parse_bytes(&self.data, &self.dialect)
    }

    /// Parse and split into headers and rows
    pub fn into_table(self) -> Table {
        Table::from_rows(self.rows(), &self.options)
    }
}

fn read_archive(path: &Path) -> Result<Vec<u8>> {
    let mut zip = StreamingZipReader::open(path)
        .map_err(|e| CsvTableError::ReadError(format!("Failed to open ZIP: {}", e)))?;

    let entry_name = zip
        .entries()
        .iter()
        .find(|e| e.name.ends_with(".csv"))
        .or_else(|| zip.entries().first())
        .ok_or_else(|| CsvTableError::ReadError("No CSV entry found in archive".to_string()))?
        .name
        .clone();

    tracing::trace!(entry = %entry_name, "reading archive entry");

    zip.read_entry_by_name(&entry_name)
        .map_err(|e| CsvTableError::ReadError(format!("Failed to read ZIP entry: {}", e)))
}
