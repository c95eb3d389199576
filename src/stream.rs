//! Fixed-width integer primitives the column codec reads and writes through.
//!
//! Multi-byte values are little-endian. Any [`std::io::Read`] is a
//! [`Decoder`] and any [`std::io::Write`] is an [`Encoder`], so a `&[u8]`
//! or a `Vec<u8>` can be handed to a column directly.

use std::io::{self, Read, Write};

/// Source of fixed-width integers.
pub trait Decoder {
    fn read_u8(&mut self) -> io::Result<u8>;
    fn read_i8(&mut self) -> io::Result<i8>;
    fn read_i16(&mut self) -> io::Result<i16>;
}

/// Sink of fixed-width integers.
pub trait Encoder {
    fn write_u8(&mut self, value: u8) -> io::Result<()>;
    fn write_i8(&mut self, value: i8) -> io::Result<()>;
    fn write_i16(&mut self, value: i16) -> io::Result<()>;
    /// Writes already encoded bytes in one call.
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()>;
}

impl<R: Read + ?Sized> Decoder for R {
    fn read_u8(&mut self) -> io::Result<u8> {
        let mut buf = [0u8; 1];
        self.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    fn read_i8(&mut self) -> io::Result<i8> {
        let mut buf = [0u8; 1];
        self.read_exact(&mut buf)?;
        Ok(i8::from_le_bytes(buf))
    }

    fn read_i16(&mut self) -> io::Result<i16> {
        let mut buf = [0u8; 2];
        self.read_exact(&mut buf)?;
        Ok(i16::from_le_bytes(buf))
    }
}

impl<W: Write + ?Sized> Encoder for W {
    fn write_u8(&mut self, value: u8) -> io::Result<()> {
        self.write_all(&[value])
    }

    fn write_i8(&mut self, value: i8) -> io::Result<()> {
        self.write_all(&value.to_le_bytes())
    }

    fn write_i16(&mut self, value: i16) -> io::Result<()> {
        self.write_all(&value.to_le_bytes())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.write_all(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_little_endian_layout() {
        let mut buf = Vec::new();
        buf.write_i8(-1).unwrap();
        buf.write_i16(-127).unwrap();
        buf.write_u8(200).unwrap();
        buf.write_bytes(&[1, 2]).unwrap();

        assert_eq!(buf, vec![0xFF, 0x81, 0xFF, 0xC8, 1, 2]);

        let mut src = buf.as_slice();
        assert_eq!(src.read_i8().unwrap(), -1);
        assert_eq!(src.read_i16().unwrap(), -127);
        assert_eq!(src.read_u8().unwrap(), 200);
        assert_eq!(src, &[1, 2]);
    }

    #[test]
    fn test_short_read() {
        let mut src: &[u8] = &[0x01];
        let err = src.read_i16().unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
