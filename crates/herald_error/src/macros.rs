//! Macro store error types.

/// Kinds of macro store errors.
///
/// Both variants are expected, user-facing outcomes; adapters translate
/// them into a friendly reply without retry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum MacroErrorKind {
    /// A macro with this name already exists (names compare case-insensitively)
    #[display("Macro '{}' already exists", _0)]
    DuplicateName(String),
    /// No macro with this name exists in the guild
    #[display("Macro '{}' does not exist", _0)]
    NotFound(String),
}

/// Macro store error with location tracking.
///
/// # Examples
///
/// ```
/// use herald_error::{MacroError, MacroErrorKind};
///
/// let err = MacroError::new(MacroErrorKind::DuplicateName("welcome".to_string()));
/// assert!(format!("{}", err).contains("already exists"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Macro Error: {} at line {} in {}", kind, line, file)]
pub struct MacroError {
    /// The kind of error that occurred
    pub kind: MacroErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl MacroError {
    /// Create a new macro error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: MacroErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
