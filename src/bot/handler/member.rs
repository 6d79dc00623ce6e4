use serenity::all::{Context, GuildId, Member, User};

use crate::{
    bot::handler::Handler,
    model::{event::GovernanceEvent, key::MemberKey},
};

/// Handles the guild_member_addition event when a member joins a guild
pub async fn handle_guild_member_addition(handler: &Handler, ctx: Context, new_member: Member) {
    let event = GovernanceEvent::MemberJoin {
        member: MemberKey::new(new_member.guild_id, new_member.user.id),
        is_bot: new_member.user.bot,
    };

    handler.dispatch(&ctx, event).await;
}

/// Handles the guild_member_removal event when a member leaves a guild
pub async fn handle_guild_member_removal(
    handler: &Handler,
    ctx: Context,
    guild_id: GuildId,
    user: User,
    _member_data_if_available: Option<Member>,
) {
    let event = GovernanceEvent::MemberLeave {
        member: MemberKey::new(guild_id, user.id),
    };

    handler.dispatch(&ctx, event).await;
}
