//! Request and response bodies.

use chrono::{DateTime, Utc};
use herald_core::Macro;
use serde::{Deserialize, Serialize};

/// A macro as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroDto {
    /// Macro name
    pub name: String,
    /// The stored message
    pub message: String,
    /// Numeric id of the creating user
    pub created_by: u64,
    /// Display name of the creating user
    pub created_by_name: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<Macro> for MacroDto {
    fn from(m: Macro) -> Self {
        Self {
            name: m.name,
            message: m.message,
            created_by: m.created_by,
            created_by_name: m.created_by_name,
            created_at: m.created_at,
        }
    }
}

/// Body of `POST /guilds/{guild_id}/macros`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMacroRequest {
    /// Macro name, unique within the guild (case-insensitive)
    pub name: String,
    /// Message the macro replays
    pub message: String,
}

/// Body of `PUT /guilds/{guild_id}/config/temperature`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TemperatureToggleRequest {
    /// Whether the temperature event should run in this guild
    pub enabled: bool,
}

/// Query parameters every guild-scoped route carries.
///
/// The dashboard knows each guild's display name from the user's guild
/// list; the store needs it to keep the on-disk directory name current.
#[derive(Debug, Clone, Deserialize)]
pub struct GuildQuery {
    /// The guild's current display name
    pub guild_name: String,
}
