//! Dashboard JSON API for Herald guild data.
//!
//! A thin adapter over [`GuildStore`](herald_store::GuildStore): the same
//! operations the Discord bot exposes, reachable over HTTP for the
//! companion dashboard. The two processes share the on-disk guild
//! directories; atomic replace plus mtime-gated caching keeps them
//! consistent without coordination.
//!
//! Authentication is out of scope here. The fronting login layer injects
//! the acting user's context as headers:
//!
//! - `x-herald-user-id`: numeric user id
//! - `x-herald-user-name`: display name
//! - `x-herald-roles`: comma-separated role names
//! - `x-herald-permissions`: comma-separated permission names
//!
//! Because a guild's directory is named after its current display name,
//! every guild-scoped route takes a `guild_name` query parameter alongside
//! the numeric id in the path.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod models;
pub mod routes;
mod server;

pub use error::ApiError;
pub use models::{CreateMacroRequest, GuildQuery, MacroDto, TemperatureToggleRequest};
pub use server::{AppState, app, serve};
