//! Discord slash-command adapter for Herald.
//!
//! This crate is a thin adapter: it maps slash-command invocations onto the
//! guild store's operations and translates the store's user-facing errors
//! into friendly replies. All state lives in
//! [`GuildStore`](herald_store::GuildStore); the bot holds no state of its
//! own beyond the Serenity client.
//!
//! # Commands
//!
//! - `/create_macro name message`: store a new macro
//! - `/macro name`: replay a stored macro
//! - `/list_macros`: list the guild's macros
//! - `/delete_macro name`: remove a macro (admin only)
//! - `/config show` / `/config temperature enabled:<bool>`: guild
//!   configuration (admin only)
//!
//! The bot also watches guild messages for temperature mentions and replies
//! with conversions when the guild has the event enabled.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod commands;
mod error;
mod handler;
mod temperature;

pub use client::HeraldBot;
pub use error::{BotError, BotErrorKind, BotResult};
pub use handler::Handler;
