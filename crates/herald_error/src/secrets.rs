//! Secrets and process-settings error types.

/// Kinds of secrets/settings errors.
///
/// These are fatal at process startup only; they are never raised on a
/// per-request path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SecretsErrorKind {
    /// No candidate settings path existed
    #[display("No settings file found; tried: {}", _0)]
    NoConfigFound(String),
    /// Settings file exists but could not be read
    #[display("Failed to read settings: {}", _0)]
    Read(String),
    /// Settings file could not be parsed
    #[display("Failed to parse settings: {}", _0)]
    Parse(String),
    /// No token configured for the requested environment
    #[display("No token configured for environment '{}'", _0)]
    MissingToken(String),
    /// Token is still the placeholder value from the settings template
    #[display("Token for environment '{}' is a placeholder", _0)]
    PlaceholderToken(String),
}

/// Secrets/settings error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Secrets Error: {} at line {} in {}", kind, line, file)]
pub struct SecretsError {
    /// The kind of error that occurred
    pub kind: SecretsErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl SecretsError {
    /// Create a new secrets error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SecretsErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
