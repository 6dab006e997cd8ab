//! Parsing many independent inputs across threads (`parallel` feature)

use crate::csv::{parse_bytes, parse_str, RowSequence};
use crate::dialect::Dialect;
use rayon::prelude::*;

/// Parse each text with the same dialect; output order matches input order
pub fn par_parse_texts<S: AsRef<str> + Sync>(inputs: &[S], dialect: &Dialect) -> Vec<RowSequence> {
    inputs
        .par_iter()
        .map(|text| parse_str(text.as_ref(), dialect))
        .collect()
}

/// Parse each byte sequence with the same dialect
pub fn par_parse_bytes<B: AsRef<[u8]> + Sync>(inputs: &[B], dialect: &Dialect) -> Vec<RowSequence> {
    inputs
        .par_iter()
        .map(|bytes| parse_bytes(bytes.as_ref(), dialect))
        .collect()
}
