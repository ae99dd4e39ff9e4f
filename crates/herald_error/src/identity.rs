//! Guild identity error types.

/// Kinds of guild identity errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum IdentityErrorKind {
    /// Guild id failed validation; ids are positive 64-bit integers
    #[display("Invalid guild id: {}", _0)]
    InvalidGuildId(u64),
}

/// Guild identity error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Identity Error: {} at line {} in {}", kind, line, file)]
pub struct IdentityError {
    /// The kind of error that occurred
    pub kind: IdentityErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl IdentityError {
    /// Create a new identity error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: IdentityErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
