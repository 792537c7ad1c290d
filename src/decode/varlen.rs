use crate::reader::{ReadResult, Reader};

/// Read a variable-length quantity.
///
/// Each byte carries 7 bits, most significant group first. A set top bit
/// means another byte follows. No limit is put on the number of bytes; bits
/// shifted past 64 are lost.
///
/// # Example
/// ```rust
/// # use smfread::{decode::read_varlen, reader::Reader};
/// let mut reader = Reader::from_byte_slice(&[0x81, 0x00, 0x7F]);
/// assert_eq!(read_varlen(&mut reader).unwrap(), 128);
/// assert_eq!(read_varlen(&mut reader).unwrap(), 127);
/// ```
pub fn read_varlen(reader: &mut Reader<'_>) -> ReadResult<u64> {
    let mut value = 0u64;
    loop {
        let byte = reader.read_u8()?;
        value = (value << 7) | u64::from(byte & 0x7F);
        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }
}

#[test]
fn varlen_values() {
    use pretty_assertions::assert_eq;
    let cases: [(&[u8], u64); 6] = [
        (&[0x00], 0),
        (&[0x40], 0x40),
        (&[0x7F], 127),
        (&[0x81, 0x00], 128),
        (&[0xC0, 0x00], 0x2000),
        (&[0xFF, 0xFF, 0xFF, 0x7F], 0x0FFF_FFFF),
    ];
    for (bytes, expected) in cases {
        let mut reader = Reader::from_byte_slice(bytes);
        assert_eq!(read_varlen(&mut reader).unwrap(), expected);
        assert_eq!(reader.buffer_position(), bytes.len());
    }
}

#[test]
fn varlen_without_terminator() {
    let mut reader = Reader::from_byte_slice(&[0x81, 0x80]);
    assert!(read_varlen(&mut reader).unwrap_err().is_truncated());
}

#[test]
fn varlen_longer_than_four_bytes() {
    use pretty_assertions::assert_eq;
    let mut reader = Reader::from_byte_slice(&[0x81, 0x80, 0x80, 0x80, 0x00]);
    assert_eq!(read_varlen(&mut reader).unwrap(), 1 << 28);
}
