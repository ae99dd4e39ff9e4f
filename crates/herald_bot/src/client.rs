//! Discord bot client setup and lifecycle management.

use crate::error::{BotError, BotErrorKind};
use crate::handler::Handler;
use herald_store::GuildStore;
use serenity::all::Client;
use std::sync::Arc;
use tracing::{info, instrument};

/// Main Discord bot client for Herald.
///
/// Manages the Serenity client connection and hands every event to the
/// shared guild store through [`Handler`].
///
/// # Example
/// ```no_run
/// use herald_bot::HeraldBot;
/// use herald_core::AccessPolicy;
/// use herald_store::GuildStore;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let token = std::env::var("DISCORD_TOKEN")?;
///     let store = Arc::new(GuildStore::new("server_data", AccessPolicy::default())?);
///
///     let mut bot = HeraldBot::new(token, store).await?;
///     bot.start().await?;
///     Ok(())
/// }
/// ```
pub struct HeraldBot {
    client: Client,
}

impl HeraldBot {
    /// Create a new bot instance over the shared guild store.
    ///
    /// # Errors
    ///
    /// Returns an error when the bot token is invalid or the Serenity
    /// client fails to initialize.
    #[instrument(skip(token, store), fields(token_len = token.len()))]
    pub async fn new(token: String, store: Arc<GuildStore>) -> Result<Self, BotError> {
        info!("Initializing Herald Discord bot");

        let handler = Handler::new(store);
        let intents = Handler::intents();

        let client = Client::builder(&token, intents)
            .event_handler(handler)
            .await
            .map_err(|e| {
                BotError::new(BotErrorKind::ConnectionFailed(format!(
                    "Failed to build client: {}",
                    e
                )))
            })?;

        info!("Serenity client built successfully");
        Ok(Self { client })
    }

    /// Start the bot.
    ///
    /// Blocks until the bot is shut down.
    ///
    /// # Errors
    ///
    /// Returns an error when the client fails to start or hits a fatal
    /// gateway error.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> Result<(), BotError> {
        info!("Starting Discord bot");

        self.client.start().await.map_err(|e| {
            BotError::new(BotErrorKind::ConnectionFailed(format!("Client error: {}", e)))
        })?;

        Ok(())
    }
}
