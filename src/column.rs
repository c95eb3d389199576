use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use allocative::Allocative;
use tracing::{debug, trace, warn};

use crate::config::{DuplicatePolicy, EnumConfig};
use crate::data_type::EnumWidth;
use crate::error::{Error, Result};
use crate::stream::{Decoder, Encoder};
use crate::tokenizer::{EnumPair, Tokenizer, quote_identifier};
use crate::value::Value;

/// Shortest type string that can hold a tag, parentheses and one pair.
const MIN_TYPE_LEN: usize = 8;

/// Bidirectional identifier ↔ code lookup of one enum declaration.
///
/// The two maps are always exact inverses of each other.
#[derive(Debug, Clone, Default, Allocative)]
pub struct EnumTable {
    identifier_to_code: HashMap<Arc<str>, i16>,
    code_to_identifier: HashMap<i16, Arc<str>>,
}

impl EnumTable {
    /// Builds a table from scanned pairs, clipping every code into `width`.
    ///
    /// # Errors
    /// Under [DuplicatePolicy::Reject], fails on the first identifier or
    /// code (after clipping) that was already declared.
    pub fn build(width: EnumWidth, pairs: &[EnumPair], policy: DuplicatePolicy) -> Result<Self> {
        let mut table = Self::default();
        for pair in pairs {
            let code = width.clip(pair.code);
            if i64::from(code) != pair.code {
                warn!(
                    ident = %pair.ident,
                    declared = pair.code,
                    clipped = code,
                    width = width.tag(),
                    "enum code clipped to column width"
                );
            }
            table.insert(Arc::from(pair.ident.as_str()), code, policy)?;
        }
        Ok(table)
    }

    fn insert(&mut self, ident: Arc<str>, code: i16, policy: DuplicatePolicy) -> Result<()> {
        match policy {
            DuplicatePolicy::Reject => {
                if self.identifier_to_code.contains_key(&ident) {
                    return Err(Error::DuplicateIdentifier {
                        ident: ident.to_string(),
                    });
                }
                if let Some(existing) = self.code_to_identifier.get(&code) {
                    return Err(Error::DuplicateCode {
                        code,
                        ident: ident.to_string(),
                        existing: existing.to_string(),
                    });
                }
            }
            DuplicatePolicy::LastWins => {
                if let Some(old_code) = self.identifier_to_code.get(&ident).copied() {
                    warn!(ident = %ident, old_code, code, "enum ident redeclared, keeping last");
                    self.code_to_identifier.remove(&old_code);
                }
                if let Some(old_ident) = self.code_to_identifier.remove(&code) {
                    warn!(ident = %ident, old_ident = %old_ident, code, "enum value redeclared, keeping last");
                    self.identifier_to_code.remove(&old_ident);
                }
            }
        }

        self.identifier_to_code.insert(Arc::clone(&ident), code);
        self.code_to_identifier.insert(code, ident);
        Ok(())
    }

    /// Returns the code declared for `ident`.
    pub fn code_of(&self, ident: &str) -> Option<i16> {
        self.identifier_to_code.get(ident).copied()
    }

    /// Returns the identifier declared for `code`.
    pub fn identifier_of(&self, code: i16) -> Option<&Arc<str>> {
        self.code_to_identifier.get(&code)
    }

    pub fn len(&self) -> usize {
        self.code_to_identifier.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries ordered by code.
    pub fn iter(&self) -> impl Iterator<Item = (i16, &str)> + '_ {
        let mut entries: Vec<(i16, &str)> = self
            .code_to_identifier
            .iter()
            .map(|(code, ident)| (*code, &**ident))
            .collect();
        entries.sort_unstable_by_key(|(code, _)| *code);
        entries.into_iter()
    }
}

/// An `Enum8` or `Enum16` column: its descriptor plus the lookup table
/// used to code its values.
///
/// Built once from the column's type string and immutable afterwards, so a
/// single instance can serve any number of concurrent reads and writes.
#[derive(Debug, Clone, Allocative)]
pub struct EnumColumn {
    name: String,
    column_type: String,
    width: EnumWidth,
    table: EnumTable,
    /// Clipped code of the first declared pair.
    default_code: i16,
}

impl EnumColumn {
    /// Parses `column_type` with the default [EnumConfig].
    ///
    /// # Example
    /// ```
    /// # use enumcol::{EnumColumn, EnumWidth, Value};
    /// let column = EnumColumn::parse("os", "Enum8('Linux' = 1, 'Mac OS' = 2)").unwrap();
    /// assert_eq!(column.width(), EnumWidth::Enum8);
    ///
    /// let mut buf = Vec::new();
    /// column.write(&mut buf, &Value::from("Mac OS")).unwrap();
    /// assert_eq!(buf, vec![2]);
    ///
    /// let value = column.read(&mut buf.as_slice(), false).unwrap();
    /// assert_eq!(value.as_str(), Some("Mac OS"));
    /// ```
    pub fn parse(name: &str, column_type: &str) -> Result<Self> {
        Self::parse_with_config(name, column_type, &EnumConfig::default())
    }

    /// Parses a type string such as `Enum16('a' = 1, 'b' = 2)`.
    ///
    /// # Errors
    /// Returns an error if the string is shorter than a minimal declaration,
    /// does not start with `Enum8` or `Enum16`, is not parenthesized, has a
    /// malformed body, or repeats an entry under [DuplicatePolicy::Reject].
    pub fn parse_with_config(name: &str, column_type: &str, config: &EnumConfig) -> Result<Self> {
        if column_type.len() < MIN_TYPE_LEN {
            return Err(Error::InvalidFormat(column_type.to_string()));
        }

        let width = EnumWidth::from_type_prefix(column_type)
            .ok_or_else(|| Error::NotEnumType(column_type.to_string()))?;

        let body = column_type[width.tag().len()..]
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| Error::InvalidFormat(column_type.to_string()))?;

        let pairs = Tokenizer::new(body)
            .allow_leading_zeros(config.allow_leading_zeros)
            .tokenize()?;
        let table = EnumTable::build(width, &pairs, config.duplicates)?;

        // The tokenizer never returns an empty list.
        let default_code = pairs.first().map_or(0, |pair| width.clip(pair.code));

        debug!(
            column = name,
            width = width.tag(),
            entries = table.len(),
            "built enum column"
        );

        Ok(Self {
            name: name.to_string(),
            column_type: column_type.to_string(),
            width,
            table,
            default_code,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type string the column was parsed from.
    pub fn column_type(&self) -> &str {
        &self.column_type
    }

    pub fn width(&self) -> EnumWidth {
        self.width
    }

    pub fn table(&self) -> &EnumTable {
        &self.table
    }

    /// The value written in place of an unset cell: the first declared code.
    pub fn default_value(&self) -> Value {
        self.code_value(self.default_code)
    }

    /// Reads one value and resolves it to its identifier.
    ///
    /// When `is_null` is set the bytes are a null sentinel, so an unknown
    /// code is returned as a raw [Value::Int8] / [Value::Int16] instead of
    /// failing.
    ///
    /// # Errors
    /// [Error::InvalidValue] for an unknown code without `is_null`, or
    /// [Error::Io] if the decoder fails.
    pub fn read<D: Decoder + ?Sized>(&self, decoder: &mut D, is_null: bool) -> Result<Value> {
        let code = match self.width {
            EnumWidth::Enum8 => i16::from(decoder.read_i8()?),
            EnumWidth::Enum16 => decoder.read_i16()?,
        };

        if let Some(ident) = self.table.identifier_of(code) {
            return Ok(Value::Text(Arc::clone(ident)));
        }
        if is_null {
            trace!(column = %self.name, code, "passing through null sentinel");
            return Ok(self.code_value(code));
        }
        Err(Error::InvalidValue { code })
    }

    /// Writes one value, given either as an identifier or as a raw code.
    ///
    /// Integer codes must fit the column width: `Int8`/`UInt8` for `Enum8`,
    /// `Int16`/`UInt16` for `Enum16`, and `Int64` for either when the value
    /// is representable. Raw codes are not checked against the table.
    ///
    /// # Errors
    /// [Error::InvalidIdentifier] for an undeclared identifier,
    /// [Error::UnexpectedType] for any other kind or an out-of-range code,
    /// or [Error::Io] if the encoder fails. Nothing is written on a lookup
    /// or type error.
    pub fn write<E: Encoder + ?Sized>(&self, encoder: &mut E, value: &Value) -> Result<()> {
        let code = match (value, self.width) {
            (Value::Text(ident), _) => Some(
                self.table
                    .code_of(ident)
                    .ok_or_else(|| Error::InvalidIdentifier(ident.to_string()))?,
            ),
            (Value::Int8(v), EnumWidth::Enum8) => Some(i16::from(*v)),
            (Value::UInt8(v), EnumWidth::Enum8) => i8::try_from(*v).ok().map(i16::from),
            (Value::Int16(v), EnumWidth::Enum16) => Some(*v),
            (Value::UInt16(v), EnumWidth::Enum16) => i16::try_from(*v).ok(),
            (Value::Int64(v), width) if width.contains(*v) => i16::try_from(*v).ok(),
            _ => None,
        };

        match code {
            Some(code) => self.write_code(encoder, code),
            None => Err(Error::UnexpectedType {
                value: format!("{} ({value})", value.kind()),
                column: format!("{} ({})", self.name, self.column_type),
            }),
        }
    }

    /// `code` is already known to fit the column width.
    fn write_code<E: Encoder + ?Sized>(&self, encoder: &mut E, code: i16) -> Result<()> {
        match self.width {
            EnumWidth::Enum8 => encoder.write_i8(code as i8)?,
            EnumWidth::Enum16 => encoder.write_i16(code)?,
        }
        Ok(())
    }

    fn code_value(&self, code: i16) -> Value {
        match self.width {
            EnumWidth::Enum8 => Value::Int8(code as i8),
            EnumWidth::Enum16 => Value::Int16(code),
        }
    }
}

/// Canonical declaration, entries ordered by code.
impl fmt::Display for EnumColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.width.tag())?;
        for (i, (code, ident)) in self.table.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} = {code}", quote_identifier(ident))?;
        }
        f.write_str(")")
    }
}
