use serenity::all::{Context, VoiceState};

use crate::{
    bot::handler::Handler,
    model::{event::GovernanceEvent, key::MemberKey},
};

/// Handles the voice_state_update event
///
/// The previous channel comes from the cache; without a cached state the member is
/// treated as not connected before the update.
pub async fn handle_voice_state_update(
    handler: &Handler,
    ctx: Context,
    old: Option<VoiceState>,
    new: VoiceState,
) {
    let Some(guild_id) = new.guild_id else {
        return;
    };

    let is_bot = new
        .member
        .as_ref()
        .map(|member| member.user.bot)
        .unwrap_or(false);

    let event = GovernanceEvent::VoiceStateChange {
        member: MemberKey::new(guild_id, new.user_id),
        is_bot,
        old_channel: old.and_then(|state| state.channel_id),
        new_channel: new.channel_id,
    };

    handler.dispatch(&ctx, event).await;
}
