//! Voice presence monitoring.
//!
//! Each guild may configure one monitored voice channel. A member continuously present
//! in it walks through `ABSENT -> PRESENT -> WARNED -> disconnected`:
//!
//! - Entering the channel creates an occupancy record stamped with the entry time
//! - A tick past the warning threshold sends one direct warning
//! - A tick past the disconnect threshold removes the member from the channel and
//!   posts a notice to the log channel
//!
//! Leaving or switching channels deletes the record immediately. Records live in memory
//! only; after a restart the next tick starts measuring from scratch.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use chrono::{DateTime, Duration, Utc};
use dioxus_logger::tracing;
use serenity::all::{ChannelId, GuildId, UserId};
use tokio::sync::Mutex;

use crate::{
    data::voice_monitor_config::VoiceMonitorConfigRepository,
    error::{platform::PlatformError, AppError},
    model::{
        key::MemberKey,
        voice::{OccupancyRecord, VoiceMonitorConfig, VoiceTickReport},
    },
    platform::Platform,
    service::notice,
    state::GovernanceState,
    util::duration::humanize,
};

/// Occupancy records of members present in monitored channels.
///
/// Holds at most one record per member key. No lock is held across an `.await`.
#[derive(Default)]
pub struct OccupancyStore {
    records: Mutex<HashMap<MemberKey, OccupancyRecord>>,
}

impl OccupancyStore {
    /// Starts tracking a member unless a record already exists.
    ///
    /// # Returns
    /// The member's record, either the existing one or the newly created one.
    pub async fn enter(&self, key: MemberKey, now: DateTime<Utc>) -> OccupancyRecord {
        *self
            .records
            .lock()
            .await
            .entry(key)
            .or_insert_with(|| OccupancyRecord::new(now))
    }

    pub async fn get(&self, key: MemberKey) -> Option<OccupancyRecord> {
        self.records.lock().await.get(&key).copied()
    }

    pub async fn remove(&self, key: MemberKey) -> Option<OccupancyRecord> {
        self.records.lock().await.remove(&key)
    }

    /// Flags the member as warned.
    ///
    /// # Returns
    /// - `true` - The flag transitioned from unset to set
    /// - `false` - No record exists or the member was already warned
    pub async fn mark_warned(&self, key: MemberKey) -> bool {
        match self.records.lock().await.get_mut(&key) {
            Some(record) if !record.warned => {
                record.warned = true;
                true
            }
            _ => false,
        }
    }

    /// Lists the members of a guild that currently have a record.
    pub async fn members_of(&self, guild_id: GuildId) -> Vec<MemberKey> {
        self.records
            .lock()
            .await
            .keys()
            .filter(|key| key.guild_id == guild_id)
            .copied()
            .collect()
    }

    /// Drops every record of a guild.
    pub async fn forget_guild(&self, guild_id: GuildId) -> usize {
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|key, _| key.guild_id != guild_id);
        before - records.len()
    }
}

pub struct VoiceService<'a> {
    state: &'a GovernanceState,
    platform: Arc<dyn Platform>,
}

impl<'a> VoiceService<'a> {
    pub fn new(state: &'a GovernanceState, platform: Arc<dyn Platform>) -> Self {
        Self { state, platform }
    }

    /// Applies a voice state change to the member's occupancy record.
    ///
    /// Joining the monitored channel creates the record; any other destination (another
    /// channel or none) deletes it. Changes that keep the channel (mute, deafen) and
    /// bots are ignored.
    pub async fn handle_voice_state(
        &self,
        member: MemberKey,
        is_bot: bool,
        old_channel: Option<ChannelId>,
        new_channel: Option<ChannelId>,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        if is_bot || old_channel == new_channel {
            return Ok(());
        }

        let _guard = self.state.voice_locks.lock(member).await;

        let monitored = VoiceMonitorConfigRepository::new(&self.state.db)
            .find(member.guild_id)
            .await?
            .map(|config| config.channel_id);

        match monitored {
            Some(channel_id) if new_channel == Some(channel_id) => {
                self.state.occupancy.enter(member, now).await;
                tracing::debug!("Member {} entered monitored channel {}", member, channel_id);
            }
            _ => {
                if self.state.occupancy.remove(member).await.is_some() {
                    tracing::debug!("Member {} left the monitored channel", member);
                }
            }
        }

        Ok(())
    }

    /// Forgets the occupancy record of a member who left the guild.
    pub async fn handle_member_leave(&self, member: MemberKey) {
        let _guard = self.state.voice_locks.lock(member).await;
        self.state.occupancy.remove(member).await;
    }

    /// Scans every configured guild's monitored channel and applies the threshold rules.
    ///
    /// Guilds are processed independently: a guild whose configuration cannot be read or
    /// whose channel members cannot be listed is skipped for this tick.
    ///
    /// # Returns
    /// - `Ok(VoiceTickReport)` - Members warned, disconnected and pruned
    /// - `Err(AppError::DbErr)` - Configurations could not be loaded at all
    pub async fn tick(&self, now: DateTime<Utc>) -> Result<VoiceTickReport, AppError> {
        let records = VoiceMonitorConfigRepository::new(&self.state.db)
            .get_all_records()
            .await?;

        let mut report = VoiceTickReport::default();
        for record in records {
            let config = match VoiceMonitorConfig::from_entity(record) {
                Ok(config) => config,
                Err(e) => {
                    tracing::error!("Skipping unreadable voice monitor configuration: {}", e);
                    continue;
                }
            };

            if let Err(e) = self.tick_guild(&config, now, &mut report).await {
                tracing::warn!(
                    "Voice presence tick skipped guild {}: {}",
                    config.guild_id,
                    e
                );
            }
        }

        Ok(report)
    }

    async fn tick_guild(
        &self,
        config: &VoiceMonitorConfig,
        now: DateTime<Utc>,
        report: &mut VoiceTickReport,
    ) -> Result<(), AppError> {
        let mut candidates = self.present_members(config).await?;
        candidates.extend(
            self.state
                .occupancy
                .members_of(config.guild_id)
                .await
                .into_iter()
                .map(|key| key.user_id),
        );

        for user_id in candidates {
            let key = MemberKey::new(config.guild_id, user_id);
            let _guard = self.state.voice_locks.lock(key).await;

            // Presence may have changed while waiting for the lock
            if !self.present_members(config).await?.contains(&user_id) {
                // Left without us seeing the event
                if self.state.occupancy.remove(key).await.is_some() {
                    report.pruned.push(key);
                }
                continue;
            }

            let record = self.state.occupancy.enter(key, now).await;
            let elapsed = now - record.entered_at;

            if elapsed >= config.disconnect_after {
                if self.disconnect(config, key, elapsed).await {
                    report.disconnected.push(key);
                }
            } else if elapsed >= config.warn_after && self.state.occupancy.mark_warned(key).await {
                self.warn(config, key).await;
                report.warned.push(key);
            }
        }

        Ok(())
    }

    /// Non-bot members currently in the monitored channel.
    async fn present_members(
        &self,
        config: &VoiceMonitorConfig,
    ) -> Result<HashSet<UserId>, PlatformError> {
        Ok(self
            .platform
            .voice_channel_members(config.guild_id, config.channel_id)
            .await?
            .into_iter()
            .filter(|member| !member.is_bot)
            .map(|member| member.user_id)
            .collect())
    }

    async fn warn(&self, config: &VoiceMonitorConfig, key: MemberKey) {
        let content = format!(
            "You have been in <#{}> for over {}. You will be disconnected once you reach {}.",
            config.channel_id,
            humanize(config.warn_after),
            humanize(config.disconnect_after)
        );

        notice::send_direct(&*self.platform, key.user_id, &content).await;

        tracing::info!("Warned member {} about voice channel occupancy", key);
    }

    /// Removes the member from voice and deletes the record. Caller holds the member's
    /// voice lock.
    ///
    /// # Returns
    /// `true` if the member was disconnected. On a permission or transient failure the
    /// record stays and the next tick retries.
    async fn disconnect(
        &self,
        config: &VoiceMonitorConfig,
        key: MemberKey,
        elapsed: Duration,
    ) -> bool {
        match self
            .platform
            .disconnect_member(key.guild_id, key.user_id)
            .await
        {
            Ok(()) => {}
            Err(PlatformError::NotFound(_)) => {
                self.state.occupancy.remove(key).await;
                return false;
            }
            Err(e) => {
                tracing::warn!("Failed to disconnect member {}: {}", key, e);
                return false;
            }
        }

        self.state.occupancy.remove(key).await;
        tracing::info!(
            "Disconnected member {} after {} in voice channel {}",
            key,
            humanize(elapsed),
            config.channel_id
        );

        if let Some(log_channel_id) = config.log_channel_id {
            self.post_log_notice(config, log_channel_id, key, elapsed)
                .await;
        }

        true
    }

    async fn post_log_notice(
        &self,
        config: &VoiceMonitorConfig,
        log_channel_id: ChannelId,
        key: MemberKey,
        elapsed: Duration,
    ) {
        let content = format!(
            "<@{}> was disconnected from <#{}> after {}.",
            key.user_id,
            config.channel_id,
            humanize(elapsed)
        );

        let message_id = match self.platform.post_to_channel(log_channel_id, &content).await {
            Ok(message_id) => message_id,
            Err(e) => {
                tracing::warn!(
                    "Failed to post disconnect notice to channel {}: {}",
                    log_channel_id,
                    e
                );
                return;
            }
        };

        if let Some(delay) = config.log_delete_after.and_then(|delay| delay.to_std().ok()) {
            notice::schedule_deletion(self.platform.clone(), log_channel_id, message_id, delay);
        }
    }

    /// Stores the monitored channel configuration of a guild.
    ///
    /// Existing occupancy records of the guild are dropped since they may refer to the
    /// previously monitored channel; the next tick recreates them.
    ///
    /// # Returns
    /// - `Ok(())` - Configuration stored
    /// - `Err(AppError::BadRequest)` - Non-positive threshold or delay, or disconnect
    ///   threshold below the warning threshold
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn configure_voice_monitor(
        &self,
        config: &VoiceMonitorConfig,
    ) -> Result<(), AppError> {
        validate_config(config)?;

        VoiceMonitorConfigRepository::new(&self.state.db)
            .upsert(config)
            .await?;
        self.state.occupancy.forget_guild(config.guild_id).await;

        tracing::info!(
            "Monitoring voice channel {} of guild {} (warn {}, disconnect {})",
            config.channel_id,
            config.guild_id,
            humanize(config.warn_after),
            humanize(config.disconnect_after)
        );

        Ok(())
    }

    /// Stops monitoring a guild's voice channel and forgets its occupancy.
    ///
    /// # Returns
    /// - `Ok(true)` - A configuration was removed
    /// - `Ok(false)` - The guild had no configuration
    pub async fn clear_voice_monitor(&self, guild_id: GuildId) -> Result<bool, AppError> {
        let removed = VoiceMonitorConfigRepository::new(&self.state.db)
            .delete(guild_id)
            .await?;
        self.state.occupancy.forget_guild(guild_id).await;

        Ok(removed)
    }
}

fn validate_config(config: &VoiceMonitorConfig) -> Result<(), AppError> {
    if config.warn_after <= Duration::zero() {
        return Err(AppError::BadRequest(
            "Warning threshold must be positive".to_string(),
        ));
    }
    if config.disconnect_after < config.warn_after {
        return Err(AppError::BadRequest(
            "Disconnect threshold must not be below the warning threshold".to_string(),
        ));
    }
    if matches!(config.log_delete_after, Some(delay) if delay <= Duration::zero()) {
        return Err(AppError::BadRequest(
            "Log notice deletion delay must be positive".to_string(),
        ));
    }

    Ok(())
}
