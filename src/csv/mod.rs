//! CSV tokenizing and encoding

mod encoder;
mod parser;
mod source;

pub use encoder::CsvEncoder;
pub use parser::{
    parse, parse_buffer, parse_bytes, parse_str, transition, Action, Class, Row, RowSequence,
    State, Tokenizer,
};
pub use source::{BufferSource, ByteSource, Source, TextSource, Unit};
