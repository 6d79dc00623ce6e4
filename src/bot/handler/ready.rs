use dioxus_logger::tracing;
use serenity::all::{Context, Ready};

/// Handles the ready event when the bot connects to Discord
pub async fn handle_ready(_ctx: Context, ready: Ready) {
    tracing::info!(
        "{} is connected to Discord ({} guilds)",
        ready.user.name,
        ready.guilds.len()
    );
}
