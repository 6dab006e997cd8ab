//! # csvtable
//!
//! Permissive CSV tokenizer turning text, byte buffers and byte slices into
//! tables of strings.
//!
//! - Five-state tokenizer with quoting, doubled-quote escapes and embedded
//!   line breaks
//! - Configurable [`Dialect`]: delimiter, quote, newline policy, blank-line
//!   skipping, trimming
//! - Never fails on malformed input
//! - [`Table`] with header handling, grid display and CSV output
//! - Whole-file reader with `.csv.zst` / `.csv.gz` / `.csv.zip` support
//!
//! ## Quick Start
//!
//! ```
//! use csvtable::{parse_str, Dialect};
//!
//! let rows = parse_str("a,b\n1,\"ha \"\"ha\"\" ha\"\n", &Dialect::default());
//! assert_eq!(rows[1][1], "ha \"ha\" ha");
//! ```

pub mod csv;
pub mod csv_reader;
pub mod dialect;
pub mod error;
pub mod table;

#[cfg(feature = "parallel")]
pub mod batch;

pub use csv::{parse, parse_buffer, parse_bytes, parse_str, Row, RowSequence};
pub use csv_reader::CsvReader;
pub use dialect::Dialect;
pub use error::{CsvTableError, Result};
pub use table::{Table, TableOptions};

#[cfg(feature = "parallel")]
pub use batch::{par_parse_bytes, par_parse_texts};
