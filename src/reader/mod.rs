#![doc = r#"
The byte cursor the decoder reads through.

[`Reader`] knows nothing about MIDI. It owns a byte buffer and a read
position, hands out big-endian integers, and supports a single byte of
lookahead through [`Reader::push_back`].

# Example
```rust
# use smfread::reader::Reader;
let mut reader = Reader::from_byte_slice(&[0x4D, 0x54, 0x68, 0x64, 0x00, 0x06]);

assert_eq!(reader.read_u32_be().unwrap(), 0x4D546864);
assert_eq!(reader.read_u16_be().unwrap(), 6);
assert!(reader.read_u8().unwrap_err().is_truncated());
```
"#]
mod error;
pub use error::*;

use alloc::borrow::Cow;

/// A cursor over an immutable byte buffer.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: Cow<'a, [u8]>,
    position: usize,
    pushed_back: Option<u8>,
}

impl<'a> Reader<'a> {
    /// Create a reader over anything that can be borrowed or owned as bytes
    pub fn from_bytes<B>(bytes: B) -> Self
    where
        B: Into<Cow<'a, [u8]>>,
    {
        Self {
            buf: bytes.into(),
            position: 0,
            pushed_back: None,
        }
    }

    /// Create a reader over a borrowed slice
    pub const fn from_byte_slice(bytes: &'a [u8]) -> Self {
        Self {
            buf: Cow::Borrowed(bytes),
            position: 0,
            pushed_back: None,
        }
    }

    /// The offset of the next byte [`Reader::read_u8`] will logically return.
    ///
    /// A pushed back byte counts as unread.
    pub const fn buffer_position(&self) -> usize {
        match self.pushed_back {
            Some(_) => self.position - 1,
            None => self.position,
        }
    }

    /// Total length of the underlying buffer
    pub fn buffer_len(&self) -> usize {
        self.buf.len()
    }

    /// Number of unread bytes left before `limit_offset`.
    ///
    /// Returns 0 once the reader is at or past the limit.
    pub const fn bytes_remaining_before(&self, limit_offset: usize) -> usize {
        limit_offset.saturating_sub(self.buffer_position())
    }

    /// Make the next call to [`Reader::read_u8`] return `byte`.
    ///
    /// Only one byte of lookahead exists. The slot must be empty, i.e. a
    /// consuming read has happened since the previous push back. `byte`
    /// should be the byte that was just read: slice reads resume from the
    /// buffer, not from the slot.
    pub fn push_back(&mut self, byte: u8) {
        debug_assert!(
            self.pushed_back.is_none(),
            "pushed back a byte while another was pending"
        );
        debug_assert!(self.position > 0, "nothing has been read yet");
        self.pushed_back = Some(byte);
    }

    /// Consume one byte
    pub fn read_u8(&mut self) -> ReadResult<u8> {
        if let Some(byte) = self.pushed_back.take() {
            return Ok(byte);
        }
        let byte = *self
            .buf
            .get(self.position)
            .ok_or_else(|| ReaderError::truncated(self.position))?;
        self.position += 1;
        Ok(byte)
    }

    /// Consume two bytes as a big-endian integer
    pub fn read_u16_be(&mut self) -> ReadResult<u16> {
        self.read_exact_size().map(u16::from_be_bytes)
    }

    /// Consume four bytes as a big-endian integer
    pub fn read_u32_be(&mut self) -> ReadResult<u32> {
        self.read_exact_size().map(u32::from_be_bytes)
    }

    /// Consume exactly `N` bytes.
    ///
    /// Nothing is consumed if fewer than `N` bytes remain.
    pub fn read_exact_size<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let mut out = [0; N];
        let slice = self.read_slice(N)?;
        out.copy_from_slice(slice);
        Ok(out)
    }

    /// Consume `len` bytes and borrow them from the buffer.
    ///
    /// Nothing is consumed if fewer than `len` bytes remain.
    pub fn read_slice(&mut self, len: usize) -> ReadResult<&[u8]> {
        let start = self.buffer_position();
        let end = start
            .checked_add(len)
            .filter(|end| *end <= self.buf.len())
            .ok_or_else(|| ReaderError::truncated(self.buf.len()))?;
        self.pushed_back = None;
        self.position = end;
        Ok(&self.buf[start..end])
    }

    /// Consume and drop `len` bytes
    pub fn skip(&mut self, len: usize) -> ReadResult<()> {
        self.read_slice(len).map(|_| ())
    }
}

#[test]
fn reads_big_endian_words() {
    use pretty_assertions::assert_eq;
    let mut reader = Reader::from_byte_slice(&[0x00, 0x00, 0x01, 0x00, 0x01, 0x02, 0xFF]);
    assert_eq!(reader.read_u32_be().unwrap(), 256);
    assert_eq!(reader.read_u16_be().unwrap(), 0x0102);
    assert_eq!(reader.read_u8().unwrap(), 0xFF);
    assert_eq!(reader.buffer_position(), 7);
}

#[test]
fn short_read_consumes_nothing() {
    use pretty_assertions::assert_eq;
    let mut reader = Reader::from_byte_slice(&[0x00, 0x01, 0x02]);
    let err = reader.read_u32_be().unwrap_err();
    assert!(err.is_truncated());
    assert_eq!(err.position(), 3);
    assert_eq!(reader.buffer_position(), 0);
    assert_eq!(reader.read_u16_be().unwrap(), 1);
}

#[test]
fn push_back_returns_byte_once() {
    use pretty_assertions::assert_eq;
    let mut reader = Reader::from_byte_slice(&[0x3C, 0x40]);
    let first = reader.read_u8().unwrap();
    reader.push_back(first);
    assert_eq!(reader.buffer_position(), 0);
    assert_eq!(reader.read_u8().unwrap(), 0x3C);
    assert_eq!(reader.read_u8().unwrap(), 0x40);
    assert!(reader.read_u8().unwrap_err().is_truncated());
}

#[test]
fn push_back_is_seen_by_slices() {
    use pretty_assertions::assert_eq;
    let mut reader = Reader::from_byte_slice(&[0x01, 0x02, 0x03]);
    let first = reader.read_u8().unwrap();
    reader.push_back(first);
    assert_eq!(reader.read_exact_size::<2>().unwrap(), [0x01, 0x02]);
    assert_eq!(reader.bytes_remaining_before(3), 1);
}

#[test]
fn remaining_before_limit() {
    use pretty_assertions::assert_eq;
    let mut reader = Reader::from_byte_slice(&[0; 8]);
    assert_eq!(reader.bytes_remaining_before(5), 5);
    reader.skip(6).unwrap();
    assert_eq!(reader.bytes_remaining_before(5), 0);
}
