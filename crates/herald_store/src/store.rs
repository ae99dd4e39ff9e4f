//! The guild store root.

use crate::cache::Cached;
use herald_core::{AccessPolicy, GuildConfig, GuildId, Macro};
use herald_error::{StorageError, StorageErrorKind};
use herald_security::AccessChecker;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::info;

/// The set of macros belonging to one guild, keyed by stored name.
///
/// `BTreeMap` gives listings a deterministic name order for free.
pub(crate) type MacroSet = BTreeMap<String, Macro>;

/// Owns the data directory and the per-guild caches.
///
/// One instance per process; both adapter processes construct their own
/// over the same data directory. All operations are local filesystem calls
/// and run on the calling task.
pub struct GuildStore {
    data_dir: PathBuf,
    checker: AccessChecker,
    pub(crate) macros: Mutex<HashMap<u64, Cached<MacroSet>>>,
    pub(crate) configs: Mutex<HashMap<u64, Cached<GuildConfig>>>,
}

impl GuildStore {
    /// Create a store rooted at `data_dir`, creating the directory if it
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns `Unavailable` when the base directory cannot be created or
    /// accessed.
    pub fn new(
        data_dir: impl Into<PathBuf>,
        policy: AccessPolicy,
    ) -> Result<Self, StorageError> {
        let data_dir = data_dir.into();

        std::fs::create_dir_all(&data_dir).map_err(|e| {
            StorageError::new(StorageErrorKind::Unavailable(format!(
                "{}: {}",
                data_dir.display(),
                e
            )))
        })?;

        info!(path = %data_dir.display(), "Opened guild store");
        Ok(Self {
            data_dir,
            checker: AccessChecker::new(policy),
            macros: Mutex::new(HashMap::new()),
            configs: Mutex::new(HashMap::new()),
        })
    }

    /// Base directory holding one subdirectory per guild.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The access checker carrying the process-wide admin policy.
    ///
    /// Adapters consult this before mutating configuration; the store
    /// itself consults it before destructive macro operations.
    pub fn checker(&self) -> &AccessChecker {
        &self.checker
    }

    /// Path of a guild's macro record inside its resolved directory.
    pub(crate) fn macros_file(dir: &Path, guild_id: GuildId) -> PathBuf {
        dir.join(format!("{}_macros.json", guild_id))
    }

    /// Path of a guild's configuration record inside its resolved directory.
    pub(crate) fn config_file(dir: &Path, guild_id: GuildId) -> PathBuf {
        dir.join(format!("{}_config.json", guild_id))
    }
}
