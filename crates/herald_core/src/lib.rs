//! Core data types for the Herald guild state manager.
//!
//! This crate holds the value types shared by the store and both adapter
//! processes (the Discord bot and the dashboard server):
//!
//! - **Guild identity**: [`GuildId`] and [`GuildIdentity`], the immutable
//!   numeric key and the mutable display name it travels with.
//! - **Macro records**: [`Macro`] plus the on-disk body/legacy forms.
//! - **Guild configuration**: [`GuildConfig`], a forward-compatible nested
//!   record with typed accessors for the known keys.
//! - **Access policy**: [`AccessPolicy`] and [`Requester`], explicit value
//!   types so authorization stays a pure function, independent of any bot
//!   or web framework's user model.
//! - **Process settings**: [`Settings`] loaded from a TOML file discovered
//!   via [`resolve_secrets_path`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod guild;
mod guild_config;
mod macro_record;
mod policy;
mod secrets;
mod settings;

pub use guild::{GuildId, GuildIdentity};
pub use guild_config::GuildConfig;
pub use macro_record::{Macro, MacroBody, StoredMacro};
pub use policy::{AccessPolicy, Requester};
pub use secrets::{default_candidates, resolve_secrets_path};
pub use settings::{
    BotSettings, DiscordSettings, ServerSettings, Settings, StorageSettings,
};
