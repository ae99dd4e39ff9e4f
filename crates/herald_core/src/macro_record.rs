//! Macro record types and their on-disk forms.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named text snippet stored by one guild.
///
/// Macros are owned exclusively by one guild's store; there are no
/// cross-guild references. Names are unique within a guild, compared
/// case-insensitively. There is no update-in-place: deletion plus
/// recreation is the only modification path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Macro {
    /// Macro name, unique within the guild (case-insensitive)
    pub name: String,
    /// The stored message replayed on invocation
    pub message: String,
    /// Numeric id of the creating user
    pub created_by: u64,
    /// Display name of the creating user at creation time
    pub created_by_name: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Macro {
    /// The on-disk body form of this macro (everything but the name, which
    /// is the record's map key).
    pub fn to_body(&self) -> MacroBody {
        MacroBody {
            message: self.message.clone(),
            created_by: self.created_by,
            created_by_name: self.created_by_name.clone(),
            created_at: self.created_at,
        }
    }
}

/// The persisted body of a macro.
///
/// The macro file maps name → body; see the store crate for the file
/// layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroBody {
    /// The stored message
    pub message: String,
    /// Numeric id of the creating user
    pub created_by: u64,
    /// Display name of the creating user
    pub created_by_name: String,
    /// Creation timestamp (ISO-8601 on disk)
    pub created_at: DateTime<Utc>,
}

/// On-disk macro value, covering the legacy plain-string format.
///
/// Early record files stored the message string directly under the name
/// key. Reading upgrades the legacy form to a full body with an unknown
/// author and epoch timestamp; the next write persists the upgraded form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StoredMacro {
    /// Current format: a full macro body
    Body(MacroBody),
    /// Legacy format: the message string alone
    Legacy(String),
}

impl StoredMacro {
    /// Upgrade this stored value into a domain [`Macro`] under `name`.
    pub fn into_macro(self, name: impl Into<String>) -> Macro {
        match self {
            StoredMacro::Body(body) => Macro {
                name: name.into(),
                message: body.message,
                created_by: body.created_by,
                created_by_name: body.created_by_name,
                created_at: body.created_at,
            },
            StoredMacro::Legacy(message) => Macro {
                name: name.into(),
                message,
                created_by: 0,
                created_by_name: "unknown".to_string(),
                created_at: DateTime::UNIX_EPOCH,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_round_trips_through_json() {
        let body = MacroBody {
            message: "hi".to_string(),
            created_by: 42,
            created_by_name: "maker".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&body).unwrap();
        let back: StoredMacro = serde_json::from_str(&json).unwrap();
        assert_eq!(back, StoredMacro::Body(body));
    }

    #[test]
    fn legacy_string_upgrades_to_unknown_author() {
        let stored: StoredMacro = serde_json::from_str("\"plain message\"").unwrap();
        let upgraded = stored.into_macro("old");
        assert_eq!(upgraded.message, "plain message");
        assert_eq!(upgraded.created_by, 0);
        assert_eq!(upgraded.created_by_name, "unknown");
        assert_eq!(upgraded.created_at, DateTime::UNIX_EPOCH);
    }
}
