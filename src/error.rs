use thiserror::Error;

/// Errors raised while building an enum column or coding its values.
///
/// Declaration errors abort construction of the whole column. Lookup and
/// type errors only concern the single value being read or written.
#[derive(Error, Debug)]
pub enum Error {
    // === Declaration Errors ===
    /// A specific character was required at `offset`.
    #[error("invalid char '{expected}' at offset {offset}, found {}", describe(.found))]
    ExpectedChar {
        expected: char,
        found: Option<char>,
        offset: usize,
    },

    /// A quoted identifier opened at `offset` never closes.
    #[error("unterminated identifier starting at offset {offset}")]
    UnterminatedIdentifier { offset: usize },

    /// A signed integer was required at `offset`.
    #[error("expected number at offset {offset}, found {}", describe(.found))]
    ExpectedNumber { found: Option<char>, offset: usize },

    /// The integer starting at `offset` does not fit in 64 bits.
    #[error("number at offset {offset} is out of range")]
    NumberOverflow { offset: usize },

    /// The type string is too short or lacks its parentheses.
    #[error("invalid Enum format: {0}")]
    InvalidFormat(String),

    /// The type string does not start with a supported tag.
    #[error("'{0}' is not Enum type")]
    NotEnumType(String),

    /// The same identifier is declared twice.
    #[error("duplicate Enum ident: '{ident}'")]
    DuplicateIdentifier { ident: String },

    /// The same code is declared twice, possibly after clipping.
    #[error("duplicate Enum value {code} for '{ident}' (already used by '{existing}')")]
    DuplicateCode {
        code: i16,
        ident: String,
        existing: String,
    },

    // === Lookup Errors ===
    /// The identifier has no code in the column's table.
    #[error("invalid Enum ident: {0}")]
    InvalidIdentifier(String),

    /// The decoded code has no identifier in the column's table.
    #[error("invalid Enum value: {code}")]
    InvalidValue { code: i16 },

    // === Type Errors ===
    /// The value kind or width does not match the column.
    #[error("column {column}: unexpected type {value}")]
    UnexpectedType { value: String, column: String },

    // === Transport ===
    /// The underlying stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` for errors that make a declaration unusable.
    pub fn is_declaration_error(&self) -> bool {
        matches!(
            self,
            Self::ExpectedChar { .. }
                | Self::UnterminatedIdentifier { .. }
                | Self::ExpectedNumber { .. }
                | Self::NumberOverflow { .. }
                | Self::InvalidFormat(_)
                | Self::NotEnumType(_)
                | Self::DuplicateIdentifier { .. }
                | Self::DuplicateCode { .. }
        )
    }
}

fn describe(found: &Option<char>) -> String {
    match found {
        Some(c) => format!("{c:?}"),
        None => "end of input".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
