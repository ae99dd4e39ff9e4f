//! Per-guild configuration operations.

use crate::cache::Cached;
use crate::record;
use crate::store::GuildStore;
use herald_core::{GuildConfig, GuildIdentity};
use herald_error::HeraldResult;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{info, instrument};

impl GuildStore {
    /// The guild's configuration record: defaults merged with any
    /// persisted overrides. A missing file yields all defaults, never an
    /// error.
    #[instrument(skip(self, guild), fields(guild_id = %guild.id))]
    pub async fn get_config(&self, guild: &GuildIdentity) -> HeraldResult<GuildConfig> {
        let (_, config) = self.load_config(guild).await?;
        Ok(config)
    }

    /// Merge a single nested key into the guild's configuration record and
    /// persist atomically. Unknown top-level keys already in the record are
    /// preserved, tolerating version skew between the two adapter
    /// processes.
    #[instrument(skip(self, guild, value), fields(guild_id = %guild.id))]
    pub async fn set_config_value(
        &self,
        guild: &GuildIdentity,
        key_path: &str,
        value: Value,
    ) -> HeraldResult<GuildConfig> {
        let (dir, mut config) = self.load_config(guild).await?;
        config.merge_path(key_path, value);

        let path = Self::config_file(&dir, guild.id);
        record::write_record(&path, &config.to_value()).await?;

        let mtime = record::file_mtime(&path).await;
        self.configs
            .lock()
            .insert(guild.id.get(), Cached::new(mtime, config.clone()));

        info!(guild_id = %guild.id, key_path, "Updated guild configuration");
        Ok(config)
    }

    /// Toggle the temperature-conversion event for the guild.
    pub async fn set_temperature_enabled(
        &self,
        guild: &GuildIdentity,
        enabled: bool,
    ) -> HeraldResult<GuildConfig> {
        self.set_config_value(guild, "events.temperature.enabled", Value::Bool(enabled))
            .await
    }

    /// Resolve the guild directory and load its configuration record,
    /// consulting the mtime-gated cache first.
    async fn load_config(&self, guild: &GuildIdentity) -> HeraldResult<(PathBuf, GuildConfig)> {
        let dir = self.resolve_guild_dir(guild).await?;
        let path = Self::config_file(&dir, guild.id);
        let disk_mtime = record::file_mtime(&path).await;

        if let Some(entry) = self.configs.lock().get(&guild.id.get()) {
            if entry.is_fresh(disk_mtime) {
                return Ok((dir, entry.value.clone()));
            }
        }

        let stored: Option<Value> = match record::load_record(&path, guild.id.get()).await {
            Ok(stored) => stored,
            Err(e) => {
                self.configs.lock().remove(&guild.id.get());
                return Err(e.into());
            }
        };

        let config = match stored {
            Some(value) => GuildConfig::from_stored(value),
            None => GuildConfig::default(),
        };

        self.configs
            .lock()
            .insert(guild.id.get(), Cached::new(disk_mtime, config.clone()));
        Ok((dir, config))
    }
}
