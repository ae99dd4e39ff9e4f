//! Slash command definitions and dispatch.

use crate::error::{BotError, BotErrorKind, BotResult};
use herald_core::{AccessPolicy, GuildConfig, GuildIdentity, Requester};
use herald_error::{HeraldError, HeraldErrorKind, MacroErrorKind};
use herald_store::GuildStore;
use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption, GuildId,
    Permissions, ResolvedOption, ResolvedValue,
};
use tracing::{error, warn};

/// A command's textual outcome, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Message content
    pub content: String,
    /// Whether only the invoking user sees it
    pub ephemeral: bool,
}

impl Reply {
    /// A reply only the invoking user sees.
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: true,
        }
    }

    /// A reply visible to the whole channel.
    pub fn public(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: false,
        }
    }
}

/// The slash commands this bot registers.
pub fn definitions() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("create_macro")
            .description("Create a new macro")
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "name", "Macro name")
                    .required(true),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "message",
                    "Message the macro replays",
                )
                .required(true),
            ),
        CreateCommand::new("macro")
            .description("Replay a stored macro")
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "name", "Macro name")
                    .required(true),
            ),
        CreateCommand::new("list_macros").description("List all available macros"),
        CreateCommand::new("delete_macro")
            .description("Delete an existing macro (admin only)")
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "name", "Macro name")
                    .required(true),
            ),
        CreateCommand::new("config")
            .description("Configure bot settings for this server (admin only)")
            .add_option(CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "show",
                "Show the current configuration",
            ))
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::SubCommand,
                    "temperature",
                    "Toggle temperature conversions",
                )
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::Boolean,
                        "enabled",
                        "Enable or disable the event",
                    )
                    .required(true),
                ),
            ),
    ]
}

/// Route a command interaction to the store and produce its reply.
///
/// User-facing outcomes (duplicate, not found, forbidden) come back as
/// friendly replies; only transport and plumbing failures surface as
/// errors.
pub async fn dispatch(
    ctx: &Context,
    cmd: &CommandInteraction,
    store: &GuildStore,
) -> BotResult<Reply> {
    let Some(guild_id) = cmd.guild_id else {
        return Ok(Reply::ephemeral("This command can only be used in a server!"));
    };
    let guild = guild_identity(ctx, guild_id).await?;
    let requester = requester_from(ctx, guild_id, cmd).await?;
    let options = cmd.data.options();

    match cmd.data.name.as_str() {
        "create_macro" => {
            let name = require_str(&options, "name")?;
            let message = require_str(&options, "message")?;
            match store.create_macro(&guild, name, message, &requester).await {
                Ok(created) => Ok(Reply::ephemeral(format!(
                    "✅ Created macro **{}**",
                    created.name
                ))),
                Err(e) => Ok(friendly(e, store)),
            }
        }
        "macro" => {
            let name = require_str(&options, "name")?;
            match store.get_macro(&guild, name).await {
                Ok(found) => Ok(Reply::public(found.message)),
                Err(e) => Ok(friendly(e, store)),
            }
        }
        "list_macros" => match store.list_macros(&guild).await {
            Ok(macros) if macros.is_empty() => {
                Ok(Reply::ephemeral("📂 No macros available in this server."))
            }
            Ok(macros) => {
                let lines: Vec<String> =
                    macros.iter().map(|m| format!("💬 {}", m.name)).collect();
                Ok(Reply::ephemeral(format!("📂 Macros:\n{}", lines.join("\n"))))
            }
            Err(e) => Ok(friendly(e, store)),
        },
        "delete_macro" => {
            let name = require_str(&options, "name")?;
            match store.delete_macro(&guild, name, &requester).await {
                Ok(()) => Ok(Reply::ephemeral(format!("🗑️ Deleted macro **{name}**"))),
                Err(e) => Ok(friendly(e, store)),
            }
        }
        "config" => dispatch_config(&options, store, &guild, &requester).await,
        other => {
            warn!(command = other, "Unknown command interaction");
            Ok(Reply::ephemeral("Unknown command."))
        }
    }
}

async fn dispatch_config(
    options: &[ResolvedOption<'_>],
    store: &GuildStore,
    guild: &GuildIdentity,
    requester: &Requester,
) -> BotResult<Reply> {
    if store.checker().require_admin(requester, "config").is_err() {
        return Ok(Reply::ephemeral(permission_denied(
            store.checker().policy(),
        )));
    }

    let Some(sub) = options.first() else {
        return Err(BotError::new(BotErrorKind::MalformedCommand(
            "config requires a subcommand".to_string(),
        )));
    };

    match (sub.name, &sub.value) {
        ("show", _) => match store.get_config(guild).await {
            Ok(config) => Ok(Reply::ephemeral(config_status(&config))),
            Err(e) => Ok(friendly(e, store)),
        },
        ("temperature", ResolvedValue::SubCommand(sub_options)) => {
            let enabled = require_bool(sub_options, "enabled")?;
            match store.set_temperature_enabled(guild, enabled).await {
                Ok(config) => Ok(Reply::ephemeral(config_status(&config))),
                Err(e) => Ok(friendly(e, store)),
            }
        }
        _ => Err(BotError::new(BotErrorKind::MalformedCommand(format!(
            "unknown config subcommand '{}'",
            sub.name
        )))),
    }
}

/// Resolve the guild's current display name, preferring the gateway cache
/// over an HTTP round trip.
pub(crate) async fn guild_identity(ctx: &Context, guild_id: GuildId) -> BotResult<GuildIdentity> {
    let cached = ctx.cache.guild(guild_id).map(|g| g.name.clone());
    let name = match cached {
        Some(name) => name,
        None => guild_id.to_partial_guild(&ctx.http).await?.name,
    };
    Ok(GuildIdentity::new(guild_id.get(), name)?)
}

/// Build the acting user's value-type view: id, name, role names, and
/// lowercased permission names.
async fn requester_from(
    ctx: &Context,
    guild_id: GuildId,
    cmd: &CommandInteraction,
) -> BotResult<Requester> {
    let Some(member) = cmd.member.as_deref() else {
        return Err(BotError::new(BotErrorKind::MalformedCommand(
            "guild command carried no member".to_string(),
        )));
    };

    let cached: Option<Vec<String>> = ctx.cache.guild(guild_id).map(|g| {
        member
            .roles
            .iter()
            .filter_map(|id| g.roles.get(id).map(|r| r.name.clone()))
            .collect()
    });
    let roles = match cached {
        Some(roles) => roles,
        None => ctx
            .http
            .get_guild_roles(guild_id)
            .await?
            .into_iter()
            .filter(|r| member.roles.contains(&r.id))
            .map(|r| r.name)
            .collect(),
    };

    let permissions = member.permissions.map(permission_names).unwrap_or_default();

    Ok(Requester::new(
        cmd.user.id.get(),
        cmd.user.name.clone(),
        roles,
        permissions,
    ))
}

fn permission_names(permissions: Permissions) -> Vec<String> {
    permissions
        .iter_names()
        .map(|(name, _)| name.to_lowercase())
        .collect()
}

fn require_str<'a>(options: &[ResolvedOption<'a>], name: &str) -> BotResult<&'a str> {
    options
        .iter()
        .find(|o| o.name == name)
        .and_then(|o| match &o.value {
            ResolvedValue::String(s) => Some(*s),
            _ => None,
        })
        .ok_or_else(|| {
            BotError::new(BotErrorKind::MalformedCommand(format!(
                "missing option '{name}'"
            )))
        })
}

fn require_bool(options: &[ResolvedOption<'_>], name: &str) -> BotResult<bool> {
    options
        .iter()
        .find(|o| o.name == name)
        .and_then(|o| match o.value {
            ResolvedValue::Boolean(b) => Some(b),
            _ => None,
        })
        .ok_or_else(|| {
            BotError::new(BotErrorKind::MalformedCommand(format!(
                "missing option '{name}'"
            )))
        })
}

/// Translate a store outcome into a friendly reply. Operator-facing
/// failures get logged and a generic apology; the user can do nothing
/// about them.
fn friendly(err: HeraldError, store: &GuildStore) -> Reply {
    match err.kind() {
        HeraldErrorKind::Macro(e) => match &e.kind {
            MacroErrorKind::DuplicateName(name) => {
                Reply::ephemeral(format!("Macro '{name}' already exists!"))
            }
            MacroErrorKind::NotFound(name) => {
                Reply::ephemeral(format!("Macro '{name}' does not exist!"))
            }
        },
        HeraldErrorKind::Access(_) => Reply::ephemeral(permission_denied(store.checker().policy())),
        _ => {
            error!(error = %err, "Guild store operation failed");
            Reply::ephemeral("Storage is unavailable right now, please try again later.")
        }
    }
}

fn permission_denied(policy: &AccessPolicy) -> String {
    let roles = policy
        .admin_roles
        .iter()
        .map(|r| format!("'{r}'"))
        .collect::<Vec<_>>()
        .join(", ");
    let perms = policy.admin_permissions.join(", ");
    format!("❌ Permission denied. You need either:\n• Role: {roles}\n• Permission: {perms}")
}

fn config_status(config: &GuildConfig) -> String {
    let state = if config.temperature_enabled() {
        "✅ Enabled"
    } else {
        "❌ Disabled"
    };
    format!("⚙️ Configuration:\n🌡️ Temperature conversion: {state}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn permission_denied_names_roles_and_permissions() {
        let policy = AccessPolicy {
            admin_roles: vec!["admin".to_string(), "mods".to_string()],
            admin_permissions: vec!["administrator".to_string()],
        };
        let text = permission_denied(&policy);
        assert!(text.contains("'admin', 'mods'"));
        assert!(text.contains("administrator"));
    }

    #[test]
    fn config_status_reflects_the_toggle() {
        let enabled = GuildConfig::default();
        assert!(config_status(&enabled).contains("✅ Enabled"));

        let disabled =
            GuildConfig::from_stored(json!({"events": {"temperature": {"enabled": false}}}));
        assert!(config_status(&disabled).contains("❌ Disabled"));
    }

    #[test]
    fn five_commands_are_registered() {
        assert_eq!(definitions().len(), 5);
    }
}
