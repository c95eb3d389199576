/// What the builder does when a declaration repeats an identifier or a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Fail construction of the column.
    #[default]
    Reject,
    /// Keep the later pair and drop the entry it collides with.
    LastWins,
}

/// Options that shape how a type declaration is turned into a column.
///
/// The value is immutable once handed to the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumConfig {
    pub duplicates: DuplicatePolicy,
    /// Accept codes such as `007`.
    pub allow_leading_zeros: bool,
}

impl Default for EnumConfig {
    fn default() -> Self {
        Self {
            duplicates: DuplicatePolicy::Reject,
            allow_leading_zeros: true,
        }
    }
}

impl EnumConfig {
    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    pub fn with_leading_zeros(mut self, allow: bool) -> Self {
        self.allow_leading_zeros = allow;
        self
    }
}
