//! Access control error types.

/// Kinds of access control errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum AccessErrorKind {
    /// The acting user satisfies neither the admin role list nor the
    /// admin permission list
    #[display("'{}' requires admin access", action)]
    Forbidden {
        /// The operation that was refused
        action: String,
    },
}

/// Access control error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Access Error: {} at line {} in {}", kind, line, file)]
pub struct AccessError {
    /// The kind of error that occurred
    pub kind: AccessErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl AccessError {
    /// Create a new access error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AccessErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Convenience constructor for the refused-operation case.
    #[track_caller]
    pub fn forbidden(action: impl Into<String>) -> Self {
        Self::new(AccessErrorKind::Forbidden {
            action: action.into(),
        })
    }
}
