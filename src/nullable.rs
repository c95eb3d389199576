use bitvec::prelude::*;

use crate::column::EnumColumn;
use crate::config::EnumConfig;
use crate::error::{Error, Result};
use crate::stream::{Decoder, Encoder};
use crate::value::Value;

/// Upper bound on rows reserved up front; larger blocks grow as bytes arrive.
const MAX_PREALLOC_ROWS: usize = 8192;

/// A `Nullable(Enum8(...))` or `Nullable(Enum16(...))` column.
///
/// A block of `n` rows is laid out as `n` null-map bytes (`1` marks a null
/// row) followed by `n` enum values. Null rows still carry a value on the
/// wire, a sentinel that need not be a declared code.
#[derive(Debug, Clone)]
pub struct NullableEnumColumn {
    column_type: String,
    inner: EnumColumn,
}

impl NullableEnumColumn {
    pub fn parse(name: &str, column_type: &str) -> Result<Self> {
        Self::parse_with_config(name, column_type, &EnumConfig::default())
    }

    /// Parses the wrapper and hands the inner type string to [EnumColumn].
    pub fn parse_with_config(name: &str, column_type: &str, config: &EnumConfig) -> Result<Self> {
        let inner_type = column_type
            .strip_prefix("Nullable(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| Error::InvalidFormat(column_type.to_string()))?;

        Ok(Self {
            column_type: column_type.to_string(),
            inner: EnumColumn::parse_with_config(name, inner_type, config)?,
        })
    }

    pub fn column_type(&self) -> &str {
        &self.column_type
    }

    /// The wrapped enum column.
    pub fn inner(&self) -> &EnumColumn {
        &self.inner
    }

    /// Reads a block of `rows` values. Null rows come back as [Value::Null].
    ///
    /// # Errors
    /// Fails if a non-null row holds an undeclared code, or if the decoder
    /// runs out of data.
    pub fn read_block<D: Decoder + ?Sized>(&self, decoder: &mut D, rows: usize) -> Result<Vec<Value>> {
        let mut null_bitmap: BitVec = BitVec::with_capacity(rows.min(MAX_PREALLOC_ROWS));
        for _ in 0..rows {
            null_bitmap.push(decoder.read_u8()? != 0);
        }

        let mut values = Vec::with_capacity(null_bitmap.len());
        for is_null in null_bitmap.iter().by_vals() {
            let value = self.inner.read(decoder, is_null)?;
            values.push(if is_null { Value::Null } else { value });
        }
        Ok(values)
    }

    /// Writes a block: the null map, then one value per row, using the
    /// column's default code for [Value::Null].
    ///
    /// The block is staged in memory first, so a failure on any row leaves
    /// `encoder` untouched.
    pub fn write_block<E: Encoder + ?Sized>(&self, encoder: &mut E, values: &[Value]) -> Result<()> {
        let null_bitmap: BitVec = values.iter().map(Value::is_null).collect();

        let mut staged = Vec::with_capacity(values.len() * (1 + self.inner.width().byte_width()));
        for is_null in null_bitmap.iter().by_vals() {
            staged.write_u8(u8::from(is_null))?;
        }

        let default = self.inner.default_value();
        for value in values {
            let value = if value.is_null() { &default } else { value };
            self.inner.write(&mut staged, value)?;
        }

        encoder.write_bytes(&staged)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_type::EnumWidth;

    fn nullable(column_type: &str) -> NullableEnumColumn {
        NullableEnumColumn::parse("device", column_type).unwrap()
    }

    #[test]
    fn test_parse() {
        let column = nullable("Nullable(Enum16('a' = 1, 'b' = 2))");

        assert_eq!(column.column_type(), "Nullable(Enum16('a' = 1, 'b' = 2))");
        assert_eq!(column.inner().column_type(), "Enum16('a' = 1, 'b' = 2)");
        assert_eq!(column.inner().width(), EnumWidth::Enum16);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            NullableEnumColumn::parse("c", "Enum8('a' = 1)"),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!(
            NullableEnumColumn::parse("c", "Nullable(String)"),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!(
            NullableEnumColumn::parse("c", "Nullable(Int16('a' = 1))"),
            Err(Error::NotEnumType(_))
        ));
    }

    #[test]
    fn test_read_block_with_sentinel() {
        let column = nullable("Nullable(Enum8('a' = 1, 'b' = 2))");
        // Null map, then values; the null row carries 0, which is undeclared.
        let bytes: &[u8] = &[0, 1, 0, 2, 0, 1];

        let values = column.read_block(&mut &bytes[..], 3).unwrap();

        assert_eq!(values, vec![Value::from("b"), Value::Null, Value::from("a")]);
    }

    #[test]
    fn test_read_block_rejects_unknown_non_null() {
        let column = nullable("Nullable(Enum8('a' = 1))");
        let bytes: &[u8] = &[0, 7];

        assert!(matches!(
            column.read_block(&mut &bytes[..], 1),
            Err(Error::InvalidValue { code: 7 })
        ));
    }

    #[test]
    fn test_read_block_short_input() {
        let column = nullable("Nullable(Enum16('a' = 1))");
        let bytes: &[u8] = &[0, 0, 1, 0];

        assert!(matches!(
            column.read_block(&mut &bytes[..], 2),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_read_block_huge_row_count_on_short_input() {
        let column = nullable("Nullable(Enum8('a' = 1))");
        let bytes: &[u8] = &[0, 0, 1];

        assert!(matches!(
            column.read_block(&mut &bytes[..], usize::MAX),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_write_block_single_write() {
        struct CountingWriter {
            calls: usize,
            buf: Vec<u8>,
        }

        impl std::io::Write for CountingWriter {
            fn write(&mut self, bytes: &[u8]) -> std::io::Result<usize> {
                self.calls += 1;
                self.buf.extend_from_slice(bytes);
                Ok(bytes.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let column = nullable("Nullable(Enum8('a' = 1, 'b' = 2))");
        let mut writer = CountingWriter {
            calls: 0,
            buf: Vec::new(),
        };

        column
            .write_block(&mut writer, &[Value::from("a"), Value::Null, Value::from("b")])
            .unwrap();

        assert_eq!(writer.calls, 1);
        assert_eq!(writer.buf, vec![0, 1, 0, 1, 1, 2]);
    }

    #[test]
    fn test_write_then_read_block() {
        let column = nullable("Nullable(Enum16('a' = -5, 'b' = 300))");
        let values = vec![Value::from("b"), Value::Null, Value::from("a")];

        let mut buf = Vec::new();
        column.write_block(&mut buf, &values).unwrap();

        let mut expected = vec![0, 1, 0];
        expected.extend_from_slice(&300i16.to_le_bytes());
        expected.extend_from_slice(&(-5i16).to_le_bytes());
        expected.extend_from_slice(&(-5i16).to_le_bytes());
        assert_eq!(buf, expected);

        assert_eq!(column.read_block(&mut buf.as_slice(), 3).unwrap(), values);
    }

    #[test]
    fn test_write_block_failure_writes_nothing() {
        let column = nullable("Nullable(Enum8('a' = 1))");
        let mut buf = Vec::new();

        let result = column.write_block(&mut buf, &[Value::from("a"), Value::from("z")]);

        assert!(matches!(result, Err(Error::InvalidIdentifier(_))));
        assert!(buf.is_empty());
    }
}
