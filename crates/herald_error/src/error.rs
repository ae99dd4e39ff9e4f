//! Top-level error wrapper types.

use crate::{AccessError, IdentityError, MacroError, SecretsError, StorageError};

/// This is the foundation error enum. Each variant wraps the error type of
/// one Herald subsystem.
///
/// # Examples
///
/// ```
/// use herald_error::{HeraldError, MacroError, MacroErrorKind};
///
/// let macro_err = MacroError::new(MacroErrorKind::NotFound("welcome".to_string()));
/// let err: HeraldError = macro_err.into();
/// assert!(format!("{}", err).contains("does not exist"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum HeraldErrorKind {
    /// Guild identity validation error
    #[from(IdentityError)]
    Identity(IdentityError),
    /// Macro store error (duplicate name, not found)
    #[from(MacroError)]
    Macro(MacroError),
    /// Access control refusal
    #[from(AccessError)]
    Access(AccessError),
    /// Storage error (unavailable, corrupt record)
    #[from(StorageError)]
    Storage(StorageError),
    /// Secrets/settings error (startup only)
    #[from(SecretsError)]
    Secrets(SecretsError),
}

/// Herald error with kind discrimination.
///
/// # Examples
///
/// ```
/// use herald_error::{AccessError, HeraldResult};
///
/// fn guarded_delete() -> HeraldResult<()> {
///     Err(AccessError::forbidden("delete_macro"))?
/// }
///
/// match guarded_delete() {
///     Ok(_) => println!("Deleted"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Herald Error: {}", _0)]
pub struct HeraldError(Box<HeraldErrorKind>);

impl HeraldError {
    /// Create a new error from a kind.
    pub fn new(kind: HeraldErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &HeraldErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to HeraldErrorKind
impl<T> From<T> for HeraldError
where
    T: Into<HeraldErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Herald operations.
///
/// # Examples
///
/// ```
/// use herald_error::{HeraldResult, StorageError, StorageErrorKind};
///
/// fn open_store() -> HeraldResult<()> {
///     Err(StorageError::new(StorageErrorKind::Unavailable("/data".to_string())))?
/// }
/// ```
pub type HeraldResult<T> = std::result::Result<T, HeraldError>;
