//! Chat platform commands consumed by the governance services.
//!
//! The services never talk to serenity directly; they go through the `Platform` trait
//! so every call is bounded, classified into a `PlatformError`, and replaceable by the
//! recording implementation in tests.

pub mod discord;


use chrono::{DateTime, Utc};
use serenity::all::{ChannelId, GuildId, MessageId, RoleId, UserId};
use serenity::async_trait;

use crate::{
    error::platform::PlatformError,
    model::{invite::InviteUses, voice::VoiceMember},
};

#[async_trait]
pub trait Platform: Send + Sync {
    /// Fetches every invite of a guild with its current use count.
    async fn fetch_invites(&self, guild_id: GuildId) -> Result<Vec<InviteUses>, PlatformError>;

    /// Lists the members currently connected to a voice channel.
    async fn voice_channel_members(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
    ) -> Result<Vec<VoiceMember>, PlatformError>;

    /// Reads the roles a member currently holds.
    async fn member_roles(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<Vec<RoleId>, PlatformError>;

    /// Whether the member is the guild owner or holds moderation/administration permissions.
    async fn is_privileged(&self, guild_id: GuildId, user_id: UserId) -> Result<bool, PlatformError>;

    async fn grant_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
        reason: &str,
    ) -> Result<(), PlatformError>;

    async fn revoke_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
        reason: &str,
    ) -> Result<(), PlatformError>;

    /// Applies a platform-native communication timeout until `until`.
    async fn apply_timeout(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        until: DateTime<Utc>,
        reason: &str,
    ) -> Result<(), PlatformError>;

    async fn remove_timeout(&self, guild_id: GuildId, user_id: UserId) -> Result<(), PlatformError>;

    /// Moves the member out of whatever voice channel they are connected to.
    async fn disconnect_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<(), PlatformError>;

    async fn delete_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<(), PlatformError>;

    /// Sends a direct message to the member.
    async fn send_direct_notice(&self, user_id: UserId, content: &str)
        -> Result<(), PlatformError>;

    /// Posts a message to a guild channel and returns its id.
    async fn post_to_channel(
        &self,
        channel_id: ChannelId,
        content: &str,
    ) -> Result<MessageId, PlatformError>;
}
