use chrono::{DateTime, Utc};
use dioxus_logger::tracing;
use serenity::all::{ChannelId, MessageId};

use crate::{
    error::{platform::PlatformError, AppError},
    model::{key::MemberKey, restriction::RestrictionMode},
    service::{notice, restriction::RestrictionService},
};

use super::text;

impl<'a> RestrictionService<'a> {
    /// Deletes a message written by a restricted member.
    ///
    /// # Returns
    /// - `Ok(true)` - The author is restricted and the message was deleted
    /// - `Ok(false)` - The author is not restricted
    /// - `Err(AppError::PlatformErr)` - Deletion failed
    pub async fn enforce_message(
        &self,
        author: MemberKey,
        channel_id: ChannelId,
        message_id: MessageId,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        if self.state.restrictions.active(author, now).await.is_none() {
            return Ok(false);
        }

        match self.platform.delete_message(channel_id, message_id).await {
            Ok(()) | Err(PlatformError::NotFound(_)) => {}
            Err(e) => return Err(e.into()),
        }

        tracing::debug!("Deleted message {} of restricted member {}", message_id, author);

        Ok(true)
    }

    /// Reverts a restricted member's voice channel join.
    ///
    /// # Returns
    /// - `Ok(true)` - The member is restricted and was removed from voice
    /// - `Ok(false)` - Not restricted, or the change was not a join
    /// - `Err(AppError::PlatformErr)` - The disconnect failed
    pub async fn enforce_voice_join(
        &self,
        member: MemberKey,
        new_channel: Option<ChannelId>,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        if new_channel.is_none() {
            return Ok(false);
        }
        let Some(restriction) = self.state.restrictions.active(member, now).await else {
            return Ok(false);
        };

        self.platform
            .disconnect_member(member.guild_id, member.user_id)
            .await?;

        tracing::info!("Removed restricted member {} from voice", member);

        notice::send_direct(
            &*self.platform,
            member.user_id,
            &text::voice_blocked(&restriction, now),
        )
        .await;

        Ok(true)
    }

    /// Re-applies a role swap restriction to a member who rejoined the guild.
    ///
    /// Roles are lost on leave while native timeouts survive a rejoin, so only role swap
    /// restrictions need restoring.
    ///
    /// # Returns
    /// - `Ok(true)` - The restricted role was granted again
    /// - `Ok(false)` - The member has no active role swap restriction
    pub async fn restore_on_join(
        &self,
        member: MemberKey,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let Some(restriction) = self.state.restrictions.active(member, now).await else {
            return Ok(false);
        };
        if !matches!(restriction.mode, RestrictionMode::RoleSwap { .. }) {
            return Ok(false);
        }

        self.enforce(&restriction, now).await?;

        tracing::info!("Restored restriction of rejoined member {}", member);

        Ok(true)
    }
}
