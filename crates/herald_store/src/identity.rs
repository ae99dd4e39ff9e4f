//! Guild directory resolution.
//!
//! Maps a guild id plus its mutable display name to a single stable
//! directory under the data directory. The trailing `_{guild_id}` segment
//! is the key; the name segment exists only for operators browsing the
//! data directory.

use crate::store::GuildStore;
use herald_core::GuildIdentity;
use herald_error::{HeraldResult, StorageError, StorageErrorKind};
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, instrument, warn};

/// Bound on directory creation and rename, so unresponsive storage (e.g. a
/// network-mounted volume) surfaces as an error instead of hanging.
const STORAGE_OP_TIMEOUT: Duration = Duration::from_secs(5);

/// Longest name segment kept in a directory name; longer display names are
/// truncated to stay clear of path-length limits.
const MAX_NAME_LEN: usize = 100;

/// Name segment used when sanitization leaves nothing.
const EMPTY_NAME_FALLBACK: &str = "guild";

/// Sanitize a guild display name into a filesystem-friendly segment.
///
/// Keeps letters, digits, and hyphens; every other run of characters
/// (including underscores) collapses to a single underscore. Leading and
/// trailing separators are trimmed and the result is capped at 100
/// characters.
///
/// # Examples
///
/// ```
/// use herald_store::sanitize_display_name;
///
/// assert_eq!(sanitize_display_name("Aurora Keepers!"), "Aurora_Keepers");
/// assert_eq!(sanitize_display_name("***"), "guild");
/// ```
pub fn sanitize_display_name(display_name: &str) -> String {
    let mut sanitized = String::with_capacity(display_name.len());
    let mut last_was_separator = false;
    for c in display_name.chars() {
        if c.is_alphanumeric() || c == '-' {
            sanitized.push(c);
            last_was_separator = false;
        } else if !last_was_separator {
            sanitized.push('_');
            last_was_separator = true;
        }
    }

    let capped: String = sanitized.chars().take(MAX_NAME_LEN).collect();
    let trimmed = capped.trim_matches('_');
    if trimmed.is_empty() {
        EMPTY_NAME_FALLBACK.to_string()
    } else {
        trimmed.to_string()
    }
}

impl GuildStore {
    /// Resolve the directory for `guild`, creating or renaming as needed.
    ///
    /// Scans the data directory for an existing entry with the guild's
    /// `_{guild_id}` suffix. When one exists under a stale name segment it
    /// is renamed in place (data preserved, never duplicated); a failed
    /// rename falls back to the existing directory and logs the
    /// discrepancy. When none exists a fresh directory is created.
    ///
    /// Idempotent: repeated calls with identical inputs settle on the same
    /// directory with no further effect.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the data directory cannot be scanned,
    /// the guild directory cannot be created, or the operation times out on
    /// unresponsive storage.
    #[instrument(skip(self, guild), fields(guild_id = %guild.id))]
    pub async fn resolve_guild_dir(&self, guild: &GuildIdentity) -> HeraldResult<PathBuf> {
        let desired_name = format!("{}_{}", sanitize_display_name(&guild.display_name), guild.id);
        let desired_path = self.data_dir().join(&desired_name);
        let id_suffix = format!("_{}", guild.id);

        let existing = self.find_existing_dir(&id_suffix).await?;

        let Some(existing) = existing else {
            match timeout(
                STORAGE_OP_TIMEOUT,
                tokio::fs::create_dir_all(&desired_path),
            )
            .await
            {
                Ok(Ok(())) => {
                    info!(path = %desired_path.display(), "Created guild directory");
                    return Ok(desired_path);
                }
                Ok(Err(e)) => {
                    return Err(StorageError::new(StorageErrorKind::DirectoryCreation(
                        format!("{}: {}", desired_path.display(), e),
                    ))
                    .into());
                }
                Err(_) => {
                    return Err(StorageError::new(StorageErrorKind::Unavailable(format!(
                        "timed out creating {}",
                        desired_path.display()
                    )))
                    .into());
                }
            }
        };

        if existing.file_name().and_then(|n| n.to_str()) == Some(desired_name.as_str()) {
            return Ok(existing);
        }

        // Display name changed since the directory was created; reconcile.
        match timeout(STORAGE_OP_TIMEOUT, tokio::fs::rename(&existing, &desired_path)).await {
            Ok(Ok(())) => {
                info!(
                    from = %existing.display(),
                    to = %desired_path.display(),
                    "Renamed guild directory to match current display name"
                );
                Ok(desired_path)
            }
            Ok(Err(e)) => {
                warn!(
                    from = %existing.display(),
                    to = %desired_path.display(),
                    error = %e,
                    "Rename failed, continuing with existing directory"
                );
                Ok(existing)
            }
            Err(_) => Err(StorageError::new(StorageErrorKind::Unavailable(format!(
                "timed out renaming {}",
                existing.display()
            )))
            .into()),
        }
    }

    /// Find a directory whose name carries the guild's id suffix.
    async fn find_existing_dir(&self, id_suffix: &str) -> HeraldResult<Option<PathBuf>> {
        let unavailable = |e: std::io::Error| {
            StorageError::new(StorageErrorKind::Unavailable(format!(
                "{}: {}",
                self.data_dir().display(),
                e
            )))
        };

        let mut entries = tokio::fs::read_dir(self.data_dir())
            .await
            .map_err(unavailable)?;
        while let Some(entry) = entries.next_entry().await.map_err(unavailable)? {
            let file_type = entry.file_type().await.map_err(unavailable)?;
            if !file_type.is_dir() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if name.ends_with(id_suffix) {
                return Ok(Some(entry.path()));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_illegal_characters_with_underscores() {
        assert_eq!(sanitize_display_name("a/b\\c:d"), "a_b_c_d");
    }

    #[test]
    fn collapses_separator_runs() {
        assert_eq!(sanitize_display_name("a  ?? b"), "a_b");
        assert_eq!(sanitize_display_name("a___b"), "a_b");
    }

    #[test]
    fn trims_leading_and_trailing_separators() {
        assert_eq!(sanitize_display_name("  spaced out  "), "spaced_out");
        assert_eq!(sanitize_display_name("!bang!"), "bang");
    }

    #[test]
    fn keeps_unicode_letters_and_hyphens() {
        assert_eq!(sanitize_display_name("Café-Gilde"), "Café-Gilde");
    }

    #[test]
    fn empty_result_falls_back() {
        assert_eq!(sanitize_display_name(""), "guild");
        assert_eq!(sanitize_display_name("!!!"), "guild");
    }

    #[test]
    fn caps_very_long_names() {
        let long = "x".repeat(500);
        assert_eq!(sanitize_display_name(&long).chars().count(), 100);
    }
}
