//! Macro CRUD operations, scoped to one guild's resolved directory.

use crate::cache::Cached;
use crate::record;
use crate::store::{GuildStore, MacroSet};
use chrono::Utc;
use herald_core::{GuildIdentity, Macro, MacroBody, Requester, StoredMacro};
use herald_error::{HeraldResult, MacroError, MacroErrorKind};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

impl GuildStore {
    /// Create a macro.
    ///
    /// Name comparison against existing macros is case-insensitive. On
    /// success the full set is persisted atomically and the new record is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` when any case variation of `name` already
    /// exists, or a storage error when persisting fails.
    #[instrument(skip(self, guild, message, author), fields(guild_id = %guild.id))]
    pub async fn create_macro(
        &self,
        guild: &GuildIdentity,
        name: &str,
        message: &str,
        author: &Requester,
    ) -> HeraldResult<Macro> {
        let (dir, mut set) = self.load_macro_set(guild).await?;

        if find_key(&set, name).is_some() {
            return Err(MacroError::new(MacroErrorKind::DuplicateName(name.to_string())).into());
        }

        let created = Macro {
            name: name.to_string(),
            message: message.to_string(),
            created_by: author.id,
            created_by_name: author.name.clone(),
            created_at: Utc::now(),
        };
        set.insert(created.name.clone(), created.clone());
        self.save_macro_set(&dir, guild, &set).await?;

        info!(guild_id = %guild.id, name, "Created macro");
        Ok(created)
    }

    /// Fetch a macro by name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no macro matches.
    #[instrument(skip(self, guild), fields(guild_id = %guild.id))]
    pub async fn get_macro(&self, guild: &GuildIdentity, name: &str) -> HeraldResult<Macro> {
        let (_, set) = self.load_macro_set(guild).await?;
        match find_key(&set, name) {
            Some(key) => Ok(set[&key].clone()),
            None => Err(MacroError::new(MacroErrorKind::NotFound(name.to_string())).into()),
        }
    }

    /// List the guild's macros, sorted by name.
    ///
    /// The order is deterministic across repeated calls with no
    /// intervening writes.
    #[instrument(skip(self, guild), fields(guild_id = %guild.id))]
    pub async fn list_macros(&self, guild: &GuildIdentity) -> HeraldResult<Vec<Macro>> {
        let (_, set) = self.load_macro_set(guild).await?;
        Ok(set.into_values().collect())
    }

    /// Delete a macro on behalf of `requester`.
    ///
    /// The access policy is checked before existence so unauthorized
    /// callers learn nothing about the macro set.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` when the requester lacks admin access,
    /// `NotFound` when no macro matches, or a storage error when
    /// persisting fails.
    #[instrument(skip(self, guild, requester), fields(guild_id = %guild.id, user_id = requester.id))]
    pub async fn delete_macro(
        &self,
        guild: &GuildIdentity,
        name: &str,
        requester: &Requester,
    ) -> HeraldResult<()> {
        self.checker().require_admin(requester, "delete_macro")?;

        let (dir, mut set) = self.load_macro_set(guild).await?;
        let Some(key) = find_key(&set, name) else {
            return Err(MacroError::new(MacroErrorKind::NotFound(name.to_string())).into());
        };
        set.remove(&key);
        self.save_macro_set(&dir, guild, &set).await?;

        info!(guild_id = %guild.id, name, "Deleted macro");
        Ok(())
    }

    /// Resolve the guild directory and load its macro set, consulting the
    /// mtime-gated cache first.
    async fn load_macro_set(&self, guild: &GuildIdentity) -> HeraldResult<(PathBuf, MacroSet)> {
        let dir = self.resolve_guild_dir(guild).await?;
        let path = Self::macros_file(&dir, guild.id);
        let disk_mtime = record::file_mtime(&path).await;

        if let Some(entry) = self.macros.lock().get(&guild.id.get()) {
            if entry.is_fresh(disk_mtime) {
                return Ok((dir, entry.value.clone()));
            }
        }

        let stored: Option<BTreeMap<String, StoredMacro>> =
            match record::load_record(&path, guild.id.get()).await {
                Ok(stored) => stored,
                Err(e) => {
                    // The corrupt file has been quarantined; drop any stale
                    // cache entry so the next read starts from empty.
                    self.macros.lock().remove(&guild.id.get());
                    return Err(e.into());
                }
            };

        let set: MacroSet = stored
            .unwrap_or_default()
            .into_iter()
            .map(|(name, stored)| {
                let record = stored.into_macro(name.clone());
                (name, record)
            })
            .collect();

        self.macros
            .lock()
            .insert(guild.id.get(), Cached::new(disk_mtime, set.clone()));
        Ok((dir, set))
    }

    /// Persist the full macro set atomically and refresh the cache entry.
    async fn save_macro_set(
        &self,
        dir: &Path,
        guild: &GuildIdentity,
        set: &MacroSet,
    ) -> HeraldResult<()> {
        let path = Self::macros_file(dir, guild.id);
        let bodies: BTreeMap<&str, MacroBody> = set
            .iter()
            .map(|(name, record)| (name.as_str(), record.to_body()))
            .collect();
        record::write_record(&path, &bodies).await?;

        let mtime = record::file_mtime(&path).await;
        self.macros
            .lock()
            .insert(guild.id.get(), Cached::new(mtime, set.clone()));
        Ok(())
    }
}

/// Find the stored key matching `name` case-insensitively.
fn find_key(set: &MacroSet, name: &str) -> Option<String> {
    let wanted = name.to_lowercase();
    set.keys().find(|k| k.to_lowercase() == wanted).cloned()
}
