//! Guild-scoped persistent state manager for Herald.
//!
//! This crate owns macro records and per-guild configuration for every
//! guild the bot serves. Each guild's data is fully isolated in its own
//! directory, named for human readability but keyed by the immutable guild
//! id, so the directory survives display-name changes by renaming in place.
//!
//! # On-disk layout
//!
//! ```text
//! {data_directory}/
//! ├── Aurora_Keepers_123456789012345678/
//! │   ├── 123456789012345678_macros.json
//! │   └── 123456789012345678_config.json
//! └── Another_Guild_987654321098765432/
//!     └── 987654321098765432_macros.json
//! ```
//!
//! # Concurrency
//!
//! Two independent processes (the bot and the dashboard) share these
//! directories. Every write goes through atomic temp-write-then-rename, so
//! readers never observe a partial file; per-process caches are invalidated
//! by comparing the backing file's modification time before each read, so
//! the other process's writes are observed without a restart. Last write
//! wins, which is acceptable for rare, human-paced mutations.
//!
//! # Example
//!
//! ```no_run
//! use herald_core::{AccessPolicy, GuildIdentity, Requester};
//! use herald_store::GuildStore;
//!
//! # async fn example() -> herald_error::HeraldResult<()> {
//! let store = GuildStore::new("server_data", AccessPolicy::default())?;
//! let guild = GuildIdentity::new(123456789012345678, "Aurora Keepers!")?;
//! let author = Requester::new(42, "maker", vec![], vec![]);
//!
//! let created = store.create_macro(&guild, "Welcome", "hi", &author).await?;
//! let fetched = store.get_macro(&guild, "welcome").await?;
//! assert_eq!(created, fetched);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cache;
mod config;
mod identity;
mod macros;
mod record;
mod store;

pub use identity::sanitize_display_name;
pub use store::GuildStore;
