use dioxus_logger::tracing;
use serenity::all::{Client, GatewayIntents};

use crate::{bot::handler::Handler, config::Config, error::AppError, state::GovernanceState};

/// Builds the Discord client without connecting to the gateway
///
/// The client's HTTP client and cache are available immediately, so the scheduler can be
/// started before the gateway connects. Call `start()` on the returned client from
/// within a tokio task since it blocks until the bot shuts down.
///
/// # Arguments
/// - `config` - Application configuration with the bot token
/// - `state` - Governance state shared with the event handler
///
/// # Returns
/// - `Ok(Client)` if the client was built
/// - `Err(AppError)` if client initialization fails
pub async fn init_bot(config: &Config, state: GovernanceState) -> Result<Client, AppError> {
    // GUILD_MEMBERS is a privileged intent - must be enabled in Discord Developer Portal
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_VOICE_STATES
        | GatewayIntents::GUILD_INVITES
        | GatewayIntents::GUILD_MESSAGES;

    let handler = Handler::new(state, config.platform_timeout);

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;

    Ok(client)
}

/// Connects the client to the gateway and runs it until shutdown
///
/// # Returns
/// - `Ok(())` if the bot shuts down cleanly
/// - `Err(AppError)` if the gateway connection fails
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
