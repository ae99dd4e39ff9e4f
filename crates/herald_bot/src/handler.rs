//! Serenity event handler.

use crate::commands;
use crate::temperature;
use herald_store::GuildStore;
use serenity::all::{
    Command, Context, CreateInteractionResponse, CreateInteractionResponseMessage, EventHandler,
    GatewayIntents, Interaction, Message, Ready,
};
use serenity::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Wires Discord events to the guild store.
///
/// Slash commands dispatch through [`commands`]; guild messages feed the
/// temperature-conversion event when the guild has it enabled.
pub struct Handler {
    store: Arc<GuildStore>,
}

impl Handler {
    /// Create a handler over the shared store.
    pub fn new(store: Arc<GuildStore>) -> Self {
        Self { store }
    }

    /// Gateway intents the handler needs: guild metadata for role lookups,
    /// plus message content for the temperature event.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(user = %ready.user.name, "Connected to Discord");

        match Command::set_global_commands(&ctx.http, commands::definitions()).await {
            Ok(registered) => {
                let names: Vec<&str> = registered.iter().map(|c| c.name.as_str()).collect();
                info!(commands = ?names, "Registered slash commands");
            }
            Err(e) => error!(error = %e, "Failed to register slash commands"),
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(cmd) = interaction else {
            return;
        };
        debug!(command = %cmd.data.name, "Dispatching slash command");

        let reply = match commands::dispatch(&ctx, &cmd, &self.store).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(command = %cmd.data.name, error = %e, "Command dispatch failed");
                commands::Reply::ephemeral("Something went wrong handling that command.")
            }
        };

        let response = CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new()
                .content(reply.content)
                .ephemeral(reply.ephemeral),
        );
        if let Err(e) = cmd.create_response(&ctx.http, response).await {
            error!(command = %cmd.data.name, error = %e, "Failed to send command response");
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        let Some(guild_id) = msg.guild_id else {
            return;
        };
        // Cheap text scan first; only consult the store when the message
        // actually mentions a temperature.
        let Some(reply) = temperature::conversion_reply(&msg.content) else {
            return;
        };

        let guild = match commands::guild_identity(&ctx, guild_id).await {
            Ok(guild) => guild,
            Err(e) => {
                warn!(error = %e, "Could not resolve guild for message event");
                return;
            }
        };

        match self.store.get_config(&guild).await {
            Ok(config) if config.temperature_enabled() => {
                if let Err(e) = msg.reply(&ctx.http, reply).await {
                    warn!(guild_id = %guild.id, error = %e, "Failed to send temperature reply");
                }
            }
            Ok(_) => {}
            Err(e) => warn!(guild_id = %guild.id, error = %e, "Could not load guild config"),
        }
    }
}
