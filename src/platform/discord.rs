//! Discord implementation of the `Platform` trait.
//!
//! REST calls go through serenity's `Http` client; voice channel membership comes from
//! the gateway cache because Discord offers no endpoint listing a channel's occupants.
//! Every call is bounded by the configured timeout.

use std::{future::Future, sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use serenity::{
    all::{
        ChannelId, CreateMessage, EditMember, GuildId, MessageId, Permissions, RoleId, Timestamp,
        UserId,
    },
    async_trait,
    cache::Cache,
    http::Http,
};

use crate::{
    error::platform::PlatformError,
    model::{invite::InviteUses, voice::VoiceMember},
    platform::Platform,
};

/// Permissions that make a member immune to restrictions.
fn elevated_permissions() -> Permissions {
    Permissions::ADMINISTRATOR
        | Permissions::MANAGE_GUILD
        | Permissions::BAN_MEMBERS
        | Permissions::KICK_MEMBERS
        | Permissions::MODERATE_MEMBERS
}

/// Platform backed by the bot's serenity HTTP client and gateway cache.
///
/// Both handles are reference counted, so the platform is cheap to construct per event
/// from a serenity `Context`.
#[derive(Clone)]
pub struct DiscordPlatform {
    http: Arc<Http>,
    cache: Arc<Cache>,
    timeout: Duration,
}

impl DiscordPlatform {
    /// Creates a new platform instance.
    ///
    /// # Arguments
    /// - `http` - Serenity HTTP client used for REST calls
    /// - `cache` - Gateway cache holding guild voice states
    /// - `timeout` - Upper bound applied to every API call
    pub fn new(http: Arc<Http>, cache: Arc<Cache>, timeout: Duration) -> Self {
        Self {
            http,
            cache,
            timeout,
        }
    }

    /// Runs a serenity call under the configured timeout and classifies its failure.
    async fn call<T, F>(&self, action: &str, request: F) -> Result<T, PlatformError>
    where
        F: Future<Output = Result<T, serenity::Error>>,
    {
        match tokio::time::timeout(self.timeout, request).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(classify(action, err)),
            Err(_) => Err(PlatformError::Transient(format!(
                "{} timed out after {:?}",
                action, self.timeout
            ))),
        }
    }
}

/// Maps a serenity error onto the platform error taxonomy by HTTP status.
fn classify(action: &str, err: serenity::Error) -> PlatformError {
    let status = match &err {
        serenity::Error::Http(http_err) => http_err.status_code().map(|code| code.as_u16()),
        _ => None,
    };

    let message = format!("{}: {}", action, err);
    match status {
        Some(401) | Some(403) => PlatformError::PermissionDenied(message),
        Some(404) => PlatformError::NotFound(message),
        _ => PlatformError::Transient(message),
    }
}

#[async_trait]
impl Platform for DiscordPlatform {
    async fn fetch_invites(&self, guild_id: GuildId) -> Result<Vec<InviteUses>, PlatformError> {
        let invites = self
            .call("fetch invites", self.http.get_guild_invites(guild_id))
            .await?;

        Ok(invites
            .into_iter()
            .map(|invite| InviteUses::new(invite.code, invite.uses))
            .collect())
    }

    async fn voice_channel_members(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
    ) -> Result<Vec<VoiceMember>, PlatformError> {
        let Some(guild) = self.cache.guild(guild_id) else {
            return Err(PlatformError::Transient(format!(
                "guild {} is not cached",
                guild_id
            )));
        };

        let members = guild
            .voice_states
            .values()
            .filter(|state| state.channel_id == Some(channel_id))
            .map(|state| VoiceMember {
                user_id: state.user_id,
                is_bot: state
                    .member
                    .as_ref()
                    .or_else(|| guild.members.get(&state.user_id))
                    .map(|member| member.user.bot)
                    .unwrap_or(false),
            })
            .collect();

        Ok(members)
    }

    async fn member_roles(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<Vec<RoleId>, PlatformError> {
        let member = self
            .call("fetch member", self.http.get_member(guild_id, user_id))
            .await?;

        Ok(member.roles)
    }

    async fn is_privileged(&self, guild_id: GuildId, user_id: UserId) -> Result<bool, PlatformError> {
        let guild = self
            .call("fetch guild", self.http.get_guild(guild_id))
            .await?;

        if guild.owner_id == user_id {
            return Ok(true);
        }

        let member = self
            .call("fetch member", self.http.get_member(guild_id, user_id))
            .await?;

        // The @everyone role shares the guild's id
        let everyone = RoleId::new(guild_id.get());
        let permissions = guild
            .roles
            .iter()
            .filter(|(role_id, _)| **role_id == everyone || member.roles.contains(role_id))
            .fold(Permissions::empty(), |acc, (_, role)| acc | role.permissions);

        Ok(permissions.intersects(elevated_permissions()))
    }

    async fn grant_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
        reason: &str,
    ) -> Result<(), PlatformError> {
        self.call(
            "grant role",
            self.http
                .add_member_role(guild_id, user_id, role_id, Some(reason)),
        )
        .await
    }

    async fn revoke_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
        reason: &str,
    ) -> Result<(), PlatformError> {
        self.call(
            "revoke role",
            self.http
                .remove_member_role(guild_id, user_id, role_id, Some(reason)),
        )
        .await
    }

    async fn apply_timeout(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        until: DateTime<Utc>,
        reason: &str,
    ) -> Result<(), PlatformError> {
        let timestamp = Timestamp::from_unix_timestamp(until.timestamp()).map_err(|e| {
            PlatformError::Transient(format!(
                "invalid timeout end {}: {}",
                until.timestamp(),
                e
            ))
        })?;

        let builder = EditMember::new()
            .disable_communication_until_datetime(timestamp)
            .audit_log_reason(reason);

        self.call(
            "apply timeout",
            guild_id.edit_member(&*self.http, user_id, builder),
        )
        .await
        .map(|_| ())
    }

    async fn remove_timeout(&self, guild_id: GuildId, user_id: UserId) -> Result<(), PlatformError> {
        let builder = EditMember::new().enable_communication();

        self.call(
            "remove timeout",
            guild_id.edit_member(&*self.http, user_id, builder),
        )
        .await
        .map(|_| ())
    }

    async fn disconnect_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<(), PlatformError> {
        self.call(
            "disconnect member",
            guild_id.disconnect_member(&*self.http, user_id),
        )
        .await
        .map(|_| ())
    }

    async fn delete_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<(), PlatformError> {
        self.call(
            "delete message",
            self.http.delete_message(channel_id, message_id, None),
        )
        .await
    }

    async fn send_direct_notice(
        &self,
        user_id: UserId,
        content: &str,
    ) -> Result<(), PlatformError> {
        self.call(
            "send direct notice",
            user_id.direct_message(&*self.http, CreateMessage::new().content(content)),
        )
        .await
        .map(|_| ())
    }

    async fn post_to_channel(
        &self,
        channel_id: ChannelId,
        content: &str,
    ) -> Result<MessageId, PlatformError> {
        let message = self
            .call(
                "post to channel",
                channel_id.send_message(&*self.http, CreateMessage::new().content(content)),
            )
            .await?;

        Ok(message.id)
    }
}
