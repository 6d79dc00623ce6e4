use dioxus_logger::tracing;
use serenity::all::{Context, Guild};

use crate::{bot::handler::Handler, model::event::GovernanceEvent};

/// Handles the guild_create event when a guild becomes available
///
/// Fired for every guild at startup and when the bot joins a new guild. Captures the
/// guild's invite snapshot so the next join can be attributed.
pub async fn handle_guild_create(
    handler: &Handler,
    ctx: Context,
    guild: Guild,
    _is_new: Option<bool>,
) {
    tracing::debug!("Guild available: {} ({})", guild.name, guild.id);

    handler
        .dispatch(&ctx, GovernanceEvent::GuildAvailable { guild_id: guild.id })
        .await;
}
