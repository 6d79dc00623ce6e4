//! Normalized platform events.
//!
//! The bot handler layer turns serenity callbacks into `GovernanceEvent` values so the
//! governance services can dispatch on an exhaustive enum instead of probing callback
//! shapes. Events without a guild (direct messages, guildless invites) never become a
//! `GovernanceEvent`.

use serenity::all::{ChannelId, GuildId, MessageId};

use crate::model::key::MemberKey;

/// Which fixed-interval scan a tick drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickKind {
    VoicePresence,
    Restrictions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GovernanceEvent {
    /// The guild became available, either at startup or after the bot joined it.
    GuildAvailable { guild_id: GuildId },
    MemberJoin { member: MemberKey, is_bot: bool },
    MemberLeave { member: MemberKey },
    /// A member's voice state changed. `None` means not connected to any channel.
    VoiceStateChange {
        member: MemberKey,
        is_bot: bool,
        old_channel: Option<ChannelId>,
        new_channel: Option<ChannelId>,
    },
    InviteCreated { guild_id: GuildId },
    InviteDeleted { guild_id: GuildId },
    MessageCreate {
        author: MemberKey,
        is_bot: bool,
        channel_id: ChannelId,
        message_id: MessageId,
    },
    Tick(TickKind),
}
