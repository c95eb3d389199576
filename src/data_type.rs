use allocative::Allocative;

/// The integer width backing an enum column.
/// It fixes both the wire size of a value and the range of valid codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Allocative)]
pub enum EnumWidth {
    /// Codes are signed 8-bit integers, one byte on the wire.
    Enum8,
    /// Codes are signed 16-bit integers, two bytes on the wire.
    Enum16,
}

impl EnumWidth {
    /// Returns the type tag that introduces a declaration of this width.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Enum8 => "Enum8",
            Self::Enum16 => "Enum16",
        }
    }

    /// Selects the width from the tag prefix of a type string.
    pub fn from_type_prefix(column_type: &str) -> Option<Self> {
        if column_type.starts_with(Self::Enum16.tag()) {
            Some(Self::Enum16)
        } else if column_type.starts_with(Self::Enum8.tag()) {
            Some(Self::Enum8)
        } else {
            None
        }
    }

    /// Number of bytes a value occupies on the wire.
    pub fn byte_width(self) -> usize {
        match self {
            Self::Enum8 => 1,
            Self::Enum16 => 2,
        }
    }

    /// Truncates `code` into this width, two's-complement style.
    pub fn clip(self, code: i64) -> i16 {
        match self {
            Self::Enum8 => i16::from(code as i8),
            Self::Enum16 => code as i16,
        }
    }

    /// Returns `true` if `code` is representable without clipping.
    pub fn contains(self, code: i64) -> bool {
        match self {
            Self::Enum8 => i8::try_from(code).is_ok(),
            Self::Enum16 => i16::try_from(code).is_ok(),
        }
    }
}
