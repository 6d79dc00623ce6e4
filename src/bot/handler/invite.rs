use serenity::all::{Context, InviteCreateEvent, InviteDeleteEvent};

use crate::{bot::handler::Handler, model::event::GovernanceEvent};

/// Handles the invite_create event
///
/// Invites outside a guild (group DMs) are ignored.
pub async fn handle_invite_create(handler: &Handler, ctx: Context, data: InviteCreateEvent) {
    let Some(guild_id) = data.guild_id else {
        return;
    };

    handler
        .dispatch(&ctx, GovernanceEvent::InviteCreated { guild_id })
        .await;
}

/// Handles the invite_delete event
pub async fn handle_invite_delete(handler: &Handler, ctx: Context, data: InviteDeleteEvent) {
    let Some(guild_id) = data.guild_id else {
        return;
    };

    handler
        .dispatch(&ctx, GovernanceEvent::InviteDeleted { guild_id })
        .await;
}
