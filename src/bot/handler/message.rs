use serenity::all::{Context, Message};

use crate::{
    bot::handler::Handler,
    model::{event::GovernanceEvent, key::MemberKey},
};

/// Handles the message event when a message is sent in a channel
///
/// Direct messages carry no guild and are ignored.
pub async fn handle_message(handler: &Handler, ctx: Context, message: Message) {
    let Some(guild_id) = message.guild_id else {
        return;
    };

    let event = GovernanceEvent::MessageCreate {
        author: MemberKey::new(guild_id, message.author.id),
        is_bot: message.author.bot,
        channel_id: message.channel_id,
        message_id: message.id,
    };

    handler.dispatch(&ctx, event).await;
}
