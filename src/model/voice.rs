//! Voice presence monitoring models.

use chrono::{DateTime, Duration, Utc};
use serenity::all::{ChannelId, GuildId, UserId};

use crate::{
    error::AppError,
    model::key::MemberKey,
    util::parse::{parse_seconds, parse_snowflake},
};

/// Occupancy tracking settings for a guild's monitored voice channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceMonitorConfig {
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    /// Continuous presence after which the member is warned.
    pub warn_after: Duration,
    /// Continuous presence after which the member is disconnected. Never below `warn_after`.
    pub disconnect_after: Duration,
    /// Channel that receives a notice for every forced disconnect.
    pub log_channel_id: Option<ChannelId>,
    /// Delay after which a disconnect notice is deleted again.
    pub log_delete_after: Option<Duration>,
}

impl VoiceMonitorConfig {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(VoiceMonitorConfig)` - Successfully converted configuration
    /// - `Err(AppError::DataCorruption)` - Stored ids or spans could not be parsed
    pub fn from_entity(entity: entity::voice_monitor_config::Model) -> Result<Self, AppError> {
        let log_channel_id = match entity.log_channel_id {
            Some(id) => Some(ChannelId::new(parse_snowflake("log_channel_id", &id)?)),
            None => None,
        };

        let log_delete_after = match entity.log_delete_after_secs {
            Some(secs) => Some(parse_seconds("log_delete_after_secs", secs)?),
            None => None,
        };

        Ok(Self {
            guild_id: GuildId::new(parse_snowflake("guild_id", &entity.guild_id)?),
            channel_id: ChannelId::new(parse_snowflake("channel_id", &entity.channel_id)?),
            warn_after: parse_seconds("warn_after_secs", entity.warn_after_secs)?,
            disconnect_after: parse_seconds("disconnect_after_secs", entity.disconnect_after_secs)?,
            log_channel_id,
            log_delete_after,
        })
    }
}

/// In-memory record of a member continuously present in a monitored channel.
///
/// Exists only while the member stays in the channel; leaving, switching or being
/// disconnected deletes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccupancyRecord {
    pub entered_at: DateTime<Utc>,
    /// Set once the warning notice has been sent. Never reset.
    pub warned: bool,
}

impl OccupancyRecord {
    pub fn new(entered_at: DateTime<Utc>) -> Self {
        Self {
            entered_at,
            warned: false,
        }
    }
}

/// A member currently connected to a voice channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceMember {
    pub user_id: UserId,
    pub is_bot: bool,
}

/// Outcome of one voice presence tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceTickReport {
    pub warned: Vec<MemberKey>,
    pub disconnected: Vec<MemberKey>,
    /// Records dropped because the member was no longer in the channel.
    pub pruned: Vec<MemberKey>,
}

impl VoiceTickReport {
    pub fn is_empty(&self) -> bool {
        self.warned.is_empty() && self.disconnected.is_empty() && self.pruned.is_empty()
    }
}
