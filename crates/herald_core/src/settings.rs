//! Process settings loaded from the TOML settings file.

use crate::policy::AccessPolicy;
use crate::secrets::{default_candidates, resolve_secrets_path};
use herald_error::{SecretsError, SecretsErrorKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Settings shared by the bot and dashboard processes.
///
/// Every section has serde defaults so a minimal file with just the tokens
/// parses. Lifecycle is process start to process shutdown; the file is read
/// once and passed down explicitly, never through ambient state.
///
/// ```toml
/// [discord.tokens]
/// dev = "your_dev_token_here"
/// prod = "your_prod_token_here"
///
/// [storage]
/// data_directory = "server_data"
///
/// [bot.permissions]
/// admin_roles = ["admin"]
/// admin_permissions = ["administrator"]
///
/// [server]
/// bind_addr = "127.0.0.1:8080"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Discord credentials
    #[serde(default)]
    pub discord: DiscordSettings,
    /// Guild data location
    #[serde(default)]
    pub storage: StorageSettings,
    /// Bot behavior, including the admin policy
    #[serde(default)]
    pub bot: BotSettings,
    /// Dashboard process settings
    #[serde(default)]
    pub server: ServerSettings,
}

/// Discord credentials, one token per environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DiscordSettings {
    /// Environment name → bot token
    #[serde(default)]
    pub tokens: BTreeMap<String, String>,
}

/// Guild data location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Base directory holding one subdirectory per guild
    #[serde(default = "default_data_directory")]
    pub data_directory: PathBuf,
}

fn default_data_directory() -> PathBuf {
    PathBuf::from("server_data")
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_directory: default_data_directory(),
        }
    }
}

/// Bot behavior settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BotSettings {
    /// Process-wide admin policy
    #[serde(default)]
    pub permissions: AccessPolicy,
}

/// Dashboard process settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Address the dashboard API binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `Read` when the file cannot be read and `Parse` when it is
    /// not valid TOML for this schema.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SecretsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SecretsError::new(SecretsErrorKind::Read(format!("{}: {}", path.display(), e)))
        })?;
        toml::from_str(&content).map_err(|e| {
            SecretsError::new(SecretsErrorKind::Parse(format!("{}: {}", path.display(), e)))
        })
    }

    /// Discover and load settings from the default candidate locations.
    ///
    /// # Errors
    ///
    /// Returns `NoConfigFound` when no candidate exists, or a `Read`/`Parse`
    /// error from the resolved file. All of these are fatal at startup.
    pub fn discover() -> Result<(Self, PathBuf), SecretsError> {
        let path = resolve_secrets_path(&default_candidates())?;
        let settings = Self::from_file(&path)?;
        Ok((settings, path))
    }

    /// The bot token for `environment`.
    ///
    /// # Errors
    ///
    /// Returns `MissingToken` when the environment has no entry, and
    /// `PlaceholderToken` when the entry still carries the template value
    /// (`your_<env>_token_here`) or is empty.
    pub fn token(&self, environment: &str) -> Result<&str, SecretsError> {
        let token = self.discord.tokens.get(environment).ok_or_else(|| {
            SecretsError::new(SecretsErrorKind::MissingToken(environment.to_string()))
        })?;
        if token.is_empty() || token == &format!("your_{environment}_token_here") {
            return Err(SecretsError::new(SecretsErrorKind::PlaceholderToken(
                environment.to_string(),
            )));
        }
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_file_parses_with_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [discord.tokens]
            dev = "abc123"
            "#,
        )
        .unwrap();
        assert_eq!(settings.storage.data_directory, PathBuf::from("server_data"));
        assert_eq!(settings.bot.permissions.admin_roles, vec!["admin"]);
        assert_eq!(settings.server.bind_addr, "127.0.0.1:8080");
        assert_eq!(settings.token("dev").unwrap(), "abc123");
    }

    #[test]
    fn missing_environment_token_is_reported() {
        let settings = Settings::default();
        let err = settings.token("prod").unwrap_err();
        assert!(matches!(err.kind, SecretsErrorKind::MissingToken(_)));
    }

    #[test]
    fn placeholder_token_is_rejected() {
        let settings: Settings = toml::from_str(
            r#"
            [discord.tokens]
            prod = "your_prod_token_here"
            "#,
        )
        .unwrap();
        let err = settings.token("prod").unwrap_err();
        assert!(matches!(err.kind, SecretsErrorKind::PlaceholderToken(_)));
    }

    #[test]
    fn full_file_round_trips() {
        let settings: Settings = toml::from_str(
            r#"
            [discord.tokens]
            dev = "a"
            prod = "b"

            [storage]
            data_directory = "/var/lib/herald"

            [bot.permissions]
            admin_roles = ["admin", "Moderators"]
            admin_permissions = ["administrator", "manage_guild"]

            [server]
            bind_addr = "0.0.0.0:9000"
            "#,
        )
        .unwrap();
        assert_eq!(
            settings.storage.data_directory,
            PathBuf::from("/var/lib/herald")
        );
        assert_eq!(settings.bot.permissions.admin_roles.len(), 2);
        assert_eq!(settings.server.bind_addr, "0.0.0.0:9000");
    }
}
