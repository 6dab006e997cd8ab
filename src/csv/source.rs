//! Positional readers over the three supported input representations

use bytes::BytesMut;

/// One step of a source cursor
///
/// Text sources advance by code point, byte sources by single byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Unicode scalar value from a text source
    Char(char),
    /// Raw byte from a buffer or byte sequence
    Byte(u8),
}

impl Unit {
    /// Compare against a dialect character
    ///
    /// A byte only matches ASCII characters, so a multi-byte delimiter or
    /// quote never matches on byte sources.
    #[inline]
    pub fn is(self, ch: char) -> bool {
        match self {
            Unit::Char(c) => c == ch,
            Unit::Byte(b) => ch.is_ascii() && b == ch as u8,
        }
    }

    /// Append the raw encoding of this unit to a field buffer
    #[inline]
    pub(crate) fn push_to(self, buffer: &mut Vec<u8>) {
        match self {
            Unit::Char(c) => {
                let mut tmp = [0u8; 4];
                buffer.extend_from_slice(c.encode_utf8(&mut tmp).as_bytes());
            }
            Unit::Byte(b) => buffer.push(b),
        }
    }
}

/// Cursor over an in-memory input
///
/// End of input is `None`; advancing past the end keeps returning `None`.
pub trait Source {
    /// Unit at the cursor, without consuming it
    fn peek_unit(&self) -> Option<Unit>;

    /// Unit at the cursor, moving the cursor forward by one unit
    fn advance_unit(&mut self) -> Option<Unit>;

    /// Whether the cursor is at or past the end
    fn at_end(&self) -> bool;
}

/// Reads Unicode scalar values from a string
#[derive(Debug, Clone)]
pub struct TextSource<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> TextSource<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl Source for TextSource<'_> {
    fn peek_unit(&self) -> Option<Unit> {
        self.text[self.pos..].chars().next().map(Unit::Char)
    }

    fn advance_unit(&mut self) -> Option<Unit> {
        let ch = self.text[self.pos..].chars().next()?;
        self.pos += ch.len_utf8();
        Some(Unit::Char(ch))
    }

    fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }
}

/// Reads raw bytes from an immutable byte sequence
#[derive(Debug, Clone)]
pub struct ByteSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl Source for ByteSource<'_> {
    fn peek_unit(&self) -> Option<Unit> {
        self.data.get(self.pos).copied().map(Unit::Byte)
    }

    fn advance_unit(&mut self) -> Option<Unit> {
        let b = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(Unit::Byte(b))
    }

    fn at_end(&self) -> bool {
        self.pos >= self.data.len()
    }
}

/// Reads raw bytes from the contents of a growable buffer
///
/// The buffer is borrowed for the whole parse, so it cannot change
/// underneath the cursor.
#[derive(Debug, Clone)]
pub struct BufferSource<'a> {
    inner: ByteSource<'a>,
}

impl<'a> BufferSource<'a> {
    pub fn new(buffer: &'a BytesMut) -> Self {
        Self {
            inner: ByteSource::new(&buffer[..]),
        }
    }
}

impl Source for BufferSource<'_> {
    fn peek_unit(&self) -> Option<Unit> {
        self.inner.peek_unit()
    }

    fn advance_unit(&mut self) -> Option<Unit> {
        self.inner.advance_unit()
    }

    fn at_end(&self) -> bool {
        self.inner.at_end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_advances_by_code_point() {
        let mut src = TextSource::new("aé€");
        assert_eq!(src.peek_unit(), Some(Unit::Char('a')));
        assert_eq!(src.advance_unit(), Some(Unit::Char('a')));
        assert_eq!(src.advance_unit(), Some(Unit::Char('é')));
        assert_eq!(src.peek_unit(), Some(Unit::Char('€')));
        assert!(!src.at_end());
        assert_eq!(src.advance_unit(), Some(Unit::Char('€')));
        assert!(src.at_end());
    }

    #[test]
    fn test_end_is_sticky() {
        let mut src = TextSource::new("x");
        src.advance_unit();
        assert_eq!(src.advance_unit(), None);
        assert_eq!(src.advance_unit(), None);
        assert_eq!(src.peek_unit(), None);
        assert!(src.at_end());
    }

    #[test]
    fn test_bytes_advance_by_byte() {
        let data = "é".as_bytes();
        let mut src = ByteSource::new(data);
        assert_eq!(src.advance_unit(), Some(Unit::Byte(0xC3)));
        assert_eq!(src.advance_unit(), Some(Unit::Byte(0xA9)));
        assert_eq!(src.advance_unit(), None);
    }

    #[test]
    fn test_buffer_source() {
        let buf = BytesMut::from(&b"ab"[..]);
        let mut src = BufferSource::new(&buf);
        assert_eq!(src.peek_unit(), Some(Unit::Byte(b'a')));
        assert_eq!(src.advance_unit(), Some(Unit::Byte(b'a')));
        assert_eq!(src.advance_unit(), Some(Unit::Byte(b'b')));
        assert!(src.at_end());
        assert_eq!(src.advance_unit(), None);
    }

    #[test]
    fn test_unit_matching() {
        assert!(Unit::Char('§').is('§'));
        assert!(Unit::Byte(b',').is(','));
        // U+00E9 must not match the lone byte 0xE9
        assert!(!Unit::Byte(0xE9).is('é'));
    }

    #[test]
    fn test_push_to() {
        let mut buf = Vec::new();
        Unit::Char('€').push_to(&mut buf);
        Unit::Byte(b'!').push_to(&mut buf);
        assert_eq!(buf, "€!".as_bytes());
    }
}
