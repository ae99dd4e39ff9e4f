//! Storage error types.

/// Kinds of storage errors.
///
/// All variants carry the path that failed so operators can act on the
/// report without reproducing the failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Failed to create a guild data directory
    #[display("Failed to create data directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write a record file
    #[display("Failed to write record: {}", _0)]
    FileWrite(String),
    /// Failed to read a record file
    #[display("Failed to read record: {}", _0)]
    FileRead(String),
    /// Failed to rename a file or directory
    #[display("Failed to rename: {}", _0)]
    Rename(String),
    /// Base storage location is not usable
    #[display("Storage unavailable: {}", _0)]
    Unavailable(String),
    /// A record failed to parse; the original bytes were preserved
    #[display("Corrupt record for guild {}: original preserved at {}", guild_id, preserved_at)]
    CorruptRecord {
        /// Guild whose record failed to parse
        guild_id: u64,
        /// Path the unparseable bytes were moved to
        preserved_at: String,
    },
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use herald_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::Unavailable("/data".to_string()));
/// assert!(format!("{}", err).contains("unavailable"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
