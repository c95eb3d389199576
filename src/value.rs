use std::fmt;
use std::sync::Arc;

/// A single column value exchanged with an enum column.
///
/// Reads produce [Value::Text] for resolved identifiers, or the raw code as
/// [Value::Int8] / [Value::Int16] when a null sentinel is passed through.
/// Writes accept an identifier or a numeric code; the remaining variants
/// exist so that callers can hand over whatever a row holds and get a typed
/// error back instead of a panic.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// represents an empty or missing value.
    Null,
    /// An enum identifier, wrapped in an [Arc] for cheap cloning.
    Text(Arc<str>),
    UInt8(u8),
    Int8(i8),
    UInt16(u16),
    Int16(i16),
    Int64(i64),
    Float(f64),
    Bool(bool),
}

impl Value {
    /// Returns `true` if the value is [Value::Null].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns a reference to the inner string slice if this is a [Value::Text].
    /// Otherwise, returns `None`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Widens any integer variant to `i64`.
    /// Returns `None` for non-integer values.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::UInt8(v) => Some(i64::from(*v)),
            Self::Int8(v) => Some(i64::from(*v)),
            Self::UInt16(v) => Some(i64::from(*v)),
            Self::Int16(v) => Some(i64::from(*v)),
            Self::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Short name of the variant, used in type errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Text(_) => "String",
            Self::UInt8(_) => "UInt8",
            Self::Int8(_) => "Int8",
            Self::UInt16(_) => "UInt16",
            Self::Int16(_) => "Int16",
            Self::Int64(_) => "Int64",
            Self::Float(_) => "Float64",
            Self::Bool(_) => "Bool",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            other => match other.as_i64() {
                Some(v) => write!(f, "{v}"),
                None => f.write_str("?"),
            },
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(Arc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(Arc::from(s))
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Self::Int8(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Self::Int16(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}
