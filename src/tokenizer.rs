use crate::error::{Error, Result};

/// One `'identifier' = code` entry of an enum declaration, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumPair {
    pub ident: String,
    pub code: i64,
}

impl EnumPair {
    pub fn new(ident: impl Into<String>, code: i64) -> Self {
        Self {
            ident: ident.into(),
            code,
        }
    }
}

/// A lexical scanner over the body of an enum declaration, the text between
/// the parentheses of `Enum8(...)` or `Enum16(...)`.
///
/// Offsets reported in errors count characters from the start of the body.
pub struct Tokenizer {
    /// The input string stored as a vector of characters for easy iteration.
    input: Vec<char>,
    /// The current position in the character vector.
    position: usize,
    allow_leading_zeros: bool,
}

impl Tokenizer {
    /// Creates a new Tokenizer for the given declaration body.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            allow_leading_zeros: true,
        }
    }

    /// Controls whether codes such as `01` are accepted.
    pub fn allow_leading_zeros(mut self, allow: bool) -> Self {
        self.allow_leading_zeros = allow;
        self
    }

    /// Scans the entire body and returns its pairs in declaration order.
    ///
    /// # Errors
    /// Returns an error on a missing quote, a missing `=`, a missing or
    /// oversized number, or anything other than `,` or the end of input
    /// after a pair.
    ///
    /// # Example
    /// ```
    /// # use enumcol::tokenizer::{EnumPair, Tokenizer};
    /// let pairs = Tokenizer::new("'a' = 1, 'b' = -2").tokenize().unwrap();
    /// assert_eq!(pairs, vec![EnumPair::new("a", 1), EnumPair::new("b", -2)]);
    /// ```
    pub fn tokenize(&mut self) -> Result<Vec<EnumPair>> {
        let mut pairs = Vec::new();

        loop {
            self.skip_whitespace();
            let ident = self.read_identifier()?;

            self.skip_whitespace();
            self.expect('=')?;

            self.skip_whitespace();
            let code = self.read_number()?;
            pairs.push(EnumPair { ident, code });

            self.skip_whitespace();
            if self.is_at_end() {
                break;
            }
            self.expect(',')?;
        }

        Ok(pairs)
    }

    // --- Navigation Helpers ---

    /// Returns the character at the current position, if any.
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Moves the cursor forward by one character.
    fn advance(&mut self) {
        self.position += 1;
    }

    /// Checks if the cursor has reached the end of the input.
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Consumes any whitespace characters (spaces, tabs, newlines).
    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Consumes `expected` or fails without moving the cursor.
    fn expect(&mut self, expected: char) -> Result<()> {
        match self.peek() {
            Some(c) if c == expected => {
                self.advance();
                Ok(())
            }
            found => Err(Error::ExpectedChar {
                expected,
                found,
                offset: self.position,
            }),
        }
    }

    // --- Extraction Logic ---

    /// Reads an identifier enclosed in single quotes.
    ///
    /// A backslash makes the next character literal, and a doubled quote
    /// stands for one quote. Any other quote closes the identifier.
    fn read_identifier(&mut self) -> Result<String> {
        let start = self.position;
        self.expect('\'')?;

        let mut ident = String::new();
        loop {
            match self.peek() {
                None => return Err(Error::UnterminatedIdentifier { offset: start }),
                Some('\\') => {
                    self.advance();
                    let escaped = self
                        .peek()
                        .ok_or(Error::UnterminatedIdentifier { offset: start })?;
                    ident.push(escaped);
                    self.advance();
                }
                Some('\'') => {
                    self.advance();
                    if self.peek() != Some('\'') {
                        return Ok(ident);
                    }
                    ident.push('\'');
                    self.advance();
                }
                Some(c) => {
                    ident.push(c);
                    self.advance();
                }
            }
        }
    }

    /// Reads a signed decimal integer: an optional `-` then ASCII digits.
    fn read_number(&mut self) -> Result<i64> {
        let start = self.position;
        let negative = self.peek() == Some('-');
        if negative {
            self.advance();
        }

        let first_digit = self.position;
        let mut value: i64 = 0;
        while let Some(digit) = self.peek().and_then(|c| c.to_digit(10)) {
            if !self.allow_leading_zeros
                && digit == 0
                && self.position == first_digit
                && self.input.get(self.position + 1).is_some_and(char::is_ascii_digit)
            {
                return Err(Error::ExpectedNumber {
                    found: Some('0'),
                    offset: self.position,
                });
            }

            // Accumulating on the negative side keeps i64::MIN reachable.
            let digit = i64::from(digit);
            value = value
                .checked_mul(10)
                .and_then(|v| {
                    if negative {
                        v.checked_sub(digit)
                    } else {
                        v.checked_add(digit)
                    }
                })
                .ok_or(Error::NumberOverflow { offset: start })?;
            self.advance();
        }

        if self.position == first_digit {
            return Err(Error::ExpectedNumber {
                found: self.peek(),
                offset: self.position,
            });
        }

        Ok(value)
    }
}

/// Renders `ident` as a quoted identifier the tokenizer reads back verbatim.
pub fn quote_identifier(ident: &str) -> String {
    let mut quoted = String::with_capacity(ident.len() + 2);
    quoted.push('\'');
    for c in ident.chars() {
        if c == '\'' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}
