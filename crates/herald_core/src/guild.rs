//! Guild identity types.

use herald_error::{IdentityError, IdentityErrorKind};
use serde::{Deserialize, Serialize};

/// Opaque numeric guild identifier.
///
/// Globally unique and immutable; the primary key for all persisted guild
/// data. The display name is never used as a lookup key, only to derive a
/// human-readable directory name.
///
/// # Examples
///
/// ```
/// use herald_core::GuildId;
///
/// let id = GuildId::new(123456789012345678).unwrap();
/// assert_eq!(id.get(), 123456789012345678);
/// assert!(GuildId::new(0).is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct GuildId(u64);

impl GuildId {
    /// Create a validated guild id.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGuildId` when `raw` is zero; guild ids are positive
    /// 64-bit integers.
    pub fn new(raw: u64) -> Result<Self, IdentityError> {
        if raw == 0 {
            return Err(IdentityError::new(IdentityErrorKind::InvalidGuildId(raw)));
        }
        Ok(Self(raw))
    }

    /// The raw numeric value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

/// A guild id paired with its current display name.
///
/// The display name may contain arbitrary Unicode, including characters
/// illegal in filesystem paths; the identity resolver sanitizes it before
/// deriving the directory name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildIdentity {
    /// Immutable numeric key
    pub id: GuildId,
    /// Current display name, as reported by the platform
    pub display_name: String,
}

impl GuildIdentity {
    /// Pair a validated guild id with its display name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGuildId` when `raw_id` is zero.
    pub fn new(raw_id: u64, display_name: impl Into<String>) -> Result<Self, IdentityError> {
        Ok(Self {
            id: GuildId::new(raw_id)?,
            display_name: display_name.into(),
        })
    }
}
