//! Bot-specific error types.
//!
//! These cover transport and interaction plumbing only. Outcomes the user
//! should see (duplicate name, not found, forbidden) never become a
//! `BotError`; the command dispatcher turns them into friendly replies.

/// Bot error variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum BotErrorKind {
    /// Serenity API error (HTTP error, gateway error, rate limit)
    #[display("Serenity API error: {_0}")]
    Serenity(String),

    /// Connection to the Discord gateway failed
    #[display("Connection failed: {_0}")]
    ConnectionFailed(String),

    /// The interaction payload is missing something it must carry
    #[display("Malformed command interaction: {_0}")]
    MalformedCommand(String),

    /// The platform handed us an unusable guild id
    #[display("Invalid guild: {_0}")]
    InvalidGuild(String),
}

/// Bot error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Bot Error: {} at line {} in {}", kind, line, file)]
pub struct BotError {
    /// The kind of error that occurred
    pub kind: BotErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl BotError {
    /// Create a new bot error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: BotErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for bot operations.
pub type BotResult<T> = Result<T, BotError>;

impl From<serenity::Error> for BotError {
    #[track_caller]
    fn from(err: serenity::Error) -> Self {
        BotError::new(BotErrorKind::Serenity(err.to_string()))
    }
}

impl From<herald_error::IdentityError> for BotError {
    #[track_caller]
    fn from(err: herald_error::IdentityError) -> Self {
        BotError::new(BotErrorKind::InvalidGuild(err.to_string()))
    }
}
